mod complete_reminder;
mod create_reminder;
mod delete_reminder;
mod delete_reminders;
mod get_reminder;
mod get_reminders;
mod get_reminders_summary;
mod update_reminder;

use actix_web::web;
use complete_reminder::complete_reminder_controller;
use create_reminder::{create_reminder_admin_controller, create_reminder_controller};
use delete_reminder::delete_reminder_controller;
use delete_reminders::delete_reminders_controller;
use get_reminder::get_reminder_controller;
use get_reminders::{get_reminders_admin_controller, get_reminders_controller};
use get_reminders_summary::{
    get_reminders_summary_admin_controller, get_reminders_summary_controller,
};
use update_reminder::update_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    cfg.route(
        "/user/{user_id}/reminders",
        web::post().to(create_reminder_admin_controller),
    );

    cfg.route("/reminders", web::get().to(get_reminders_controller));
    cfg.route(
        "/user/{user_id}/reminders",
        web::get().to(get_reminders_admin_controller),
    );

    // Registered before `/reminders/{reminder_id}` so they are not taken for ids
    cfg.route(
        "/reminders/summary",
        web::get().to(get_reminders_summary_controller),
    );
    cfg.route(
        "/user/{user_id}/reminders/summary",
        web::get().to(get_reminders_summary_admin_controller),
    );
    cfg.route(
        "/reminders/bulk-delete",
        web::post().to(delete_reminders_controller),
    );

    cfg.route(
        "/reminders/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::put().to(update_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/complete",
        web::post().to(complete_reminder_controller),
    );
}
