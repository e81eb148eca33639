//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, User};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Hash the password and persist a new user.
    ///
    /// A taken username yields [`ErrorCode::Conflict`](crate::domain::ErrorCode::Conflict).
    async fn register(&self, credentials: &Credentials) -> Result<User, Error>;
}
