mod create_account;
mod get_account;
mod set_account_pub_key;

use actix_web::web;
use create_account::create_account_controller;
use get_account::get_account_controller;
use set_account_pub_key::set_account_pub_key_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/account", web::post().to(create_account_controller));
    cfg.route("/account", web::get().to(get_account_controller));
    cfg.route(
        "/account/pubkey",
        web::put().to(set_account_pub_key_controller),
    );
}
