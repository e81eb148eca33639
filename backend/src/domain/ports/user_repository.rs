//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{PasswordDigest, User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique constraint on usernames rejected the insert.
        DuplicateUsername { username: String } => "username already exists: {username}",
    }
}

/// A user together with the digest needed to verify their password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    /// The account.
    pub user: User,
    /// Salted digest of the account password.
    pub password_digest: PasswordDigest,
}

/// Port for storing and looking up accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// Uniqueness is enforced by the store; a clash is reported as
    /// [`UserPersistenceError::DuplicateUsername`] rather than checked up front.
    async fn insert(
        &self,
        username: &Username,
        password_digest: &PasswordDigest,
    ) -> Result<User, UserPersistenceError>;

    /// Fetch an account by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredUser>, UserPersistenceError>;

    /// Number of stored accounts.
    async fn count(&self) -> Result<u64, UserPersistenceError>;
}
