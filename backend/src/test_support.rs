//! Test utilities shared by unit and integration tests.
//!
//! Compiled only with the `test-support` feature. Provides a migrated SQLite
//! database in a temporary directory and an app assembled the same way the
//! binary assembles it.

use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use tempfile::TempDir;

use crate::Trace;
use crate::domain::{IdentityService, InventoryService};
use crate::inbound::http::health::HealthState;
use crate::inbound::http::session_config::{DEFAULT_SESSION_TTL_MINUTES, SessionSettings};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{configure, not_found};
use crate::outbound::persistence::{
    DbPool, DieselInventoryRepository, DieselUserRepository, MigrationError, PoolConfig,
    PoolError, run_migrations,
};

/// Failures while preparing a test database.
#[derive(Debug, thiserror::Error)]
pub enum TestDatabaseError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[from] std::io::Error),
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// A migrated SQLite file that is deleted when dropped.
pub struct TestDatabase {
    _dir: TempDir,
    url: String,
    pool: DbPool,
}

impl TestDatabase {
    /// Create the file, apply migrations and open a small pool.
    pub async fn new() -> Result<Self, TestDatabaseError> {
        let dir = tempfile::tempdir()?;
        let url = dir.path().join("inventory.db").to_string_lossy().into_owned();
        run_migrations(&url).await?;
        let pool = DbPool::new(PoolConfig::new(url.as_str()).with_max_size(2)).await?;
        Ok(Self {
            _dir: dir,
            url,
            pool,
        })
    }

    /// Path of the SQLite file.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// A handle on the shared pool.
    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Handler state backed by the real services and Diesel repositories.
    pub fn http_state(&self) -> HttpState {
        let identity = Arc::new(IdentityService::new(Arc::new(DieselUserRepository::new(
            self.pool(),
        ))));
        let items = Arc::new(InventoryService::new(Arc::new(
            DieselInventoryRepository::new(self.pool()),
        )));
        HttpState::new(identity.clone(), identity, items.clone(), items)
    }
}

/// Session settings suitable for plain-HTTP tests.
pub fn session_settings() -> SessionSettings {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
        ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
    }
}

/// The full application: tracing, sessions, every route and the 404 page.
///
/// Settings are taken by value so the returned factory borrows nothing and
/// can be handed to `actix_web::test::init_service`.
pub fn app(
    state: HttpState,
    session: SessionSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    App::new()
        .app_data(web::Data::new(state))
        .app_data(health)
        .wrap(session.middleware())
        .wrap(Trace)
        .configure(configure)
        .default_service(web::to(not_found))
}
