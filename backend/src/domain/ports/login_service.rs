//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! infrastructure, so handler tests can substitute a test double.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the matching user.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized) so
    /// callers cannot probe which usernames exist.
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, Error>;
}
