//! Registration, login and logout handlers.
//!
//! ```text
//! GET  /register   registration form
//! POST /register   username=..&password=..
//! GET  /login      login form
//! POST /login      username=..&password=..
//! GET  /logout
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tracing::info;

use crate::domain::{Credentials, ErrorCode, INVALID_CREDENTIALS_MESSAGE};
use crate::inbound::http::ApiResult;
use crate::inbound::http::flash::Flash;
use crate::inbound::http::forms::CredentialsForm;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views;

/// Flash shown after a successful registration.
pub const REGISTERED_MESSAGE: &str = "Registration successful. Please login.";
/// Flash shown after a successful login.
pub const LOGGED_IN_MESSAGE: &str = "Login successful.";
/// Flash shown after logout.
pub const LOGGED_OUT_MESSAGE: &str = "You have been logged out.";

/// Render the registration form.
pub async fn register_form(session: SessionContext) -> ApiResult<HttpResponse> {
    let flashes = session.take_flashes()?;
    Ok(views::html(StatusCode::OK, views::register_page(&flashes)))
}

/// Create an account, then send the user to the login page.
///
/// Invalid input and taken usernames bounce back to the form with a message.
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = match Credentials::try_from(form.into_inner()) {
        Ok(credentials) => credentials,
        Err(err) => {
            session.push_flash(Flash::danger(err.to_string()))?;
            return Ok(views::redirect("/register"));
        }
    };

    match state.registration.register(&credentials).await {
        Ok(_) => {
            session.push_flash(Flash::success(REGISTERED_MESSAGE))?;
            Ok(views::redirect("/login"))
        }
        Err(err) if err.code() == ErrorCode::Conflict => {
            session.push_flash(Flash::danger(err.message()))?;
            Ok(views::redirect("/register"))
        }
        Err(err) => Err(err),
    }
}

/// Render the login form.
pub async fn login_form(session: SessionContext) -> ApiResult<HttpResponse> {
    let flashes = session.take_flashes()?;
    Ok(views::html(StatusCode::OK, views::login_page(&flashes)))
}

/// Authenticate and establish a session.
///
/// Failures re-render the form directly rather than redirecting, with
/// `400` for malformed input and `401` for rejected credentials.
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = match Credentials::try_from(form.into_inner()) {
        Ok(credentials) => credentials,
        Err(err) => {
            return login_failure(&session, StatusCode::BAD_REQUEST, err.to_string());
        }
    };

    match state.login.authenticate(&credentials).await {
        Ok(user) => {
            session.persist_user(user.id())?;
            session.push_flash(Flash::success(LOGGED_IN_MESSAGE))?;
            Ok(views::redirect("/"))
        }
        Err(err) if err.code() == ErrorCode::Unauthorized => login_failure(
            &session,
            StatusCode::UNAUTHORIZED,
            INVALID_CREDENTIALS_MESSAGE.to_owned(),
        ),
        Err(err) => Err(err),
    }
}

fn login_failure(
    session: &SessionContext,
    status: StatusCode,
    message: String,
) -> ApiResult<HttpResponse> {
    let mut flashes = session.take_flashes()?;
    flashes.push(Flash::danger(message));
    Ok(views::html(status, views::login_page(&flashes)))
}

/// End the session and return to the login page.
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    if let Some(user_id) = session.user_id()? {
        info!(%user_id, "user logged out");
    }
    session.logout();
    session.push_flash(Flash::info(LOGGED_OUT_MESSAGE))?;
    Ok(views::redirect("/login"))
}
