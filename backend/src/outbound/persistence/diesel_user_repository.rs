//! SQLite-backed `UserRepository` implementation using Diesel ORM.
//!
//! Username uniqueness is the table's `UNIQUE` constraint; this adapter
//! translates the resulting violation into
//! [`UserPersistenceError::DuplicateUsername`] instead of checking first.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{StoredUser, UserPersistenceError, UserRepository};
use crate::domain::{PasswordDigest, User, UserId, Username};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(id: i32, username: &str) -> Result<User, UserPersistenceError> {
    let id = UserId::new(id)
        .map_err(|err| UserPersistenceError::query(format!("invalid stored user id: {err}")))?;
    let username = Username::new(username)
        .map_err(|err| UserPersistenceError::query(format!("invalid stored username: {err}")))?;
    Ok(User::new(id, username))
}

fn row_to_stored_user(row: UserRow) -> Result<StoredUser, UserPersistenceError> {
    let user = row_to_user(row.id, &row.username)?;
    let password_digest = PasswordDigest::from_stored(row.password_hash).map_err(|err| {
        warn!(user_id = row.id, "stored password digest is malformed");
        UserPersistenceError::query(err.to_string())
    })?;
    Ok(StoredUser {
        user,
        password_digest,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        username: &Username,
        password_digest: &PasswordDigest,
    ) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            username: username.as_ref(),
            password_hash: password_digest.as_str(),
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserPersistenceError::duplicate_username(username.as_ref())
                } else {
                    map_diesel_error(err)
                }
            })?;

        row_to_user(row.id, &row.username)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_stored_user).transpose()
    }

    async fn count(&self) -> Result<u64, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        u64::try_from(total)
            .map_err(|_| UserPersistenceError::query("negative row count"))
    }
}
