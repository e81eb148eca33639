//! Registration and login use-cases backed by the `UserRepository` port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{LoginService, RegistrationService, UserPersistenceError, UserRepository};
use crate::domain::{Credentials, Error, PasswordDigest, PasswordDigestError, User};

/// Message shown for any failed login, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";
/// Message shown when a username is already registered.
pub const DUPLICATE_USERNAME_MESSAGE: &str = "Username already exists!";

/// Identity use-cases over a user repository.
#[derive(Clone)]
pub struct IdentityService {
    users: Arc<dyn UserRepository>,
}

impl IdentityService {
    /// Create a service backed by the given repository.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateUsername { .. } => Error::conflict(DUPLICATE_USERNAME_MESSAGE),
    }
}

fn map_digest_error(error: PasswordDigestError) -> Error {
    error!(%error, "password digest operation failed");
    Error::internal("password verification unavailable")
}

/// Run CPU-heavy work on Tokio's blocking pool so request workers stay free.
async fn off_runtime<T, F>(work: F) -> Result<T, Error>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|err| {
        error!(%err, "password task aborted");
        Error::internal("password verification unavailable")
    })
}

async fn hash_password(password: &str) -> Result<PasswordDigest, Error> {
    let password = Zeroizing::new(password.to_owned());
    off_runtime(move || PasswordDigest::hash(&password))
        .await?
        .map_err(map_digest_error)
}

async fn verify_password(digest: PasswordDigest, password: &str) -> Result<bool, Error> {
    let password = Zeroizing::new(password.to_owned());
    off_runtime(move || digest.verify(&password))
        .await?
        .map_err(map_digest_error)
}

#[async_trait]
impl RegistrationService for IdentityService {
    async fn register(&self, credentials: &Credentials) -> Result<User, Error> {
        let digest = hash_password(credentials.password()).await?;
        let user = self
            .users
            .insert(credentials.username(), &digest)
            .await
            .map_err(|err| {
                if matches!(err, UserPersistenceError::DuplicateUsername { .. }) {
                    info!(username = %credentials.username(), "registration rejected: username taken");
                }
                map_user_persistence_error(err)
            })?;
        info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl LoginService for IdentityService {
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, Error> {
        let stored = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_persistence_error)?;

        let Some(stored) = stored else {
            warn!(username = %credentials.username(), "login failed: unknown username");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        if !verify_password(stored.password_digest.clone(), credentials.password()).await? {
            warn!(user_id = %stored.user.id(), "login failed: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        info!(user_id = %stored.user.id(), "user authenticated");
        Ok(stored.user)
    }
}
