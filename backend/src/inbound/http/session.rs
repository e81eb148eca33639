//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers deal in domain terms: the
//! signed-in user, queued flash messages and the confirmation token that
//! guards state-changing forms.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use rand::RngCore;
use tracing::warn;

use crate::domain::{Error, UserId};

use super::flash::Flash;

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASH_KEY: &str = "flashes";
pub(crate) const CONFIRMATION_TOKEN_KEY: &str = "csrf_token";

const CONFIRMATION_TOKEN_BYTES: usize = 32;

fn session_read_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

fn session_write_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Sign a user in, rotating the session so a pre-login cookie cannot be
    /// replayed as an authenticated one.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0.renew();
        self.0.remove(CONFIRMATION_TOKEN_KEY);
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(session_write_error)
    }

    /// Fetch the current user id; a malformed value counts as signed out.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let Some(raw) = self
            .0
            .get::<i32>(USER_ID_KEY)
            .map_err(session_read_error)?
        else {
            return Ok(None);
        };
        match UserId::new(raw) {
            Ok(id) => Ok(Some(id)),
            Err(error) => {
                warn!("invalid user id in session cookie: {error}");
                Ok(None)
            }
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Sign the user out. Queued messages survive so the next page can
    /// confirm the logout.
    pub fn logout(&self) {
        self.0.remove(USER_ID_KEY);
        self.0.remove(CONFIRMATION_TOKEN_KEY);
        self.0.renew();
    }

    /// Queue a message for the next rendered page.
    pub fn push_flash(&self, flash: Flash) -> Result<(), Error> {
        let mut queue = self.read_flashes()?;
        queue.push(flash);
        self.0.insert(FLASH_KEY, queue).map_err(session_write_error)
    }

    /// Drain every queued message, oldest first.
    pub fn take_flashes(&self) -> Result<Vec<Flash>, Error> {
        let queue = self.read_flashes()?;
        if !queue.is_empty() {
            self.0.remove(FLASH_KEY);
        }
        Ok(queue)
    }

    fn read_flashes(&self) -> Result<Vec<Flash>, Error> {
        match self.0.get::<Vec<Flash>>(FLASH_KEY) {
            Ok(queue) => Ok(queue.unwrap_or_default()),
            Err(error) => {
                warn!("discarding unreadable flash queue: {error}");
                self.0.remove(FLASH_KEY);
                Ok(Vec::new())
            }
        }
    }

    /// Return the session's confirmation token, minting one on first use.
    pub fn confirmation_token(&self) -> Result<String, Error> {
        if let Some(token) = self
            .0
            .get::<String>(CONFIRMATION_TOKEN_KEY)
            .map_err(session_read_error)?
        {
            return Ok(token);
        }
        let mut bytes = [0_u8; CONFIRMATION_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        self.0
            .insert(CONFIRMATION_TOKEN_KEY, &token)
            .map_err(session_write_error)?;
        Ok(token)
    }

    /// Check a submitted confirmation token against the session's.
    ///
    /// # Errors
    ///
    /// Returns `403 Forbidden` when no token was issued or the values differ.
    pub fn verify_confirmation_token(&self, submitted: &str) -> Result<(), Error> {
        let expected = self
            .0
            .get::<String>(CONFIRMATION_TOKEN_KEY)
            .map_err(session_read_error)?;
        match expected {
            Some(expected) if constant_time_eq(expected.as_bytes(), submitted.as_bytes()) => {
                Ok(())
            }
            _ => {
                warn!("rejected form with a missing or stale confirmation token");
                Err(Error::forbidden("The form has expired. Please try again."))
            }
        }
    }
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
