mod get_category_report;
mod get_dashboard;
mod get_monthly_report;

use actix_web::web;
use get_category_report::{get_category_report_admin_controller, get_category_report_controller};
use get_dashboard::{get_dashboard_admin_controller, get_dashboard_controller};
use get_monthly_report::{get_monthly_report_admin_controller, get_monthly_report_controller};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reports/dashboard", web::get().to(get_dashboard_controller));
    cfg.route(
        "/user/{user_id}/reports/dashboard",
        web::get().to(get_dashboard_admin_controller),
    );

    cfg.route(
        "/reports/categories",
        web::get().to(get_category_report_controller),
    );
    cfg.route(
        "/user/{user_id}/reports/categories",
        web::get().to(get_category_report_admin_controller),
    );

    cfg.route("/reports/monthly", web::get().to(get_monthly_report_controller));
    cfg.route(
        "/user/{user_id}/reports/monthly",
        web::get().to(get_monthly_report_admin_controller),
    );
}
