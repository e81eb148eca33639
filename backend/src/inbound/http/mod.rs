//! HTTP inbound adapter serving the server-rendered inventory site.

pub mod auth;
pub mod error;
pub mod flash;
pub mod forms;
pub mod health;
pub mod inventory;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use error::ApiResult;

use actix_web::web;

use crate::domain::Error;

/// Register every page, form target and probe.
///
/// Each path is a single resource, so a request with the wrong method gets
/// `405 Method Not Allowed` instead of falling through to another handler.
/// In particular `GET /delete_item/{id}` never mutates.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(inventory::index)))
        .service(
            web::resource("/register")
                .route(web::get().to(auth::register_form))
                .route(web::post().to(auth::register)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(auth::login_form))
                .route(web::post().to(auth::login)),
        )
        .service(web::resource("/logout").route(web::get().to(auth::logout)))
        .service(web::resource("/add_item").route(web::post().to(inventory::add_item)))
        .service(
            web::resource("/delete_item/{id}").route(web::post().to(inventory::delete_item)),
        )
        .service(web::resource("/health/ready").route(web::get().to(health::ready)))
        .service(web::resource("/health/live").route(web::get().to(health::live)));
}

/// Fallback for unknown paths.
pub async fn not_found() -> ApiResult<actix_web::HttpResponse> {
    Err(Error::not_found("The requested page does not exist."))
}
