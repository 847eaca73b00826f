mod create_transaction;
mod delete_transaction;
mod delete_transactions;
mod get_transaction;
mod get_transactions;
mod update_transaction;

use actix_web::web;
use create_transaction::{create_transaction_admin_controller, create_transaction_controller};
use delete_transaction::delete_transaction_controller;
use delete_transactions::delete_transactions_controller;
use get_transaction::get_transaction_controller;
use get_transactions::{get_transactions_admin_controller, get_transactions_controller};
use update_transaction::update_transaction_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/transactions", web::post().to(create_transaction_controller));
    cfg.route(
        "/user/{user_id}/transactions",
        web::post().to(create_transaction_admin_controller),
    );

    cfg.route("/transactions", web::get().to(get_transactions_controller));
    cfg.route(
        "/user/{user_id}/transactions",
        web::get().to(get_transactions_admin_controller),
    );

    cfg.route(
        "/transactions/bulk-delete",
        web::post().to(delete_transactions_controller),
    );

    cfg.route(
        "/transactions/{transaction_id}",
        web::get().to(get_transaction_controller),
    );
    cfg.route(
        "/transactions/{transaction_id}",
        web::put().to(update_transaction_controller),
    );
    cfg.route(
        "/transactions/{transaction_id}",
        web::delete().to(delete_transaction_controller),
    );
}
