//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by a single SQLite file via Diesel, with async access through
//! `diesel-async`'s sync connection wrapper and `bb8` pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel rows and domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Store-enforced invariants**: username uniqueness and non-negative
//!   quantities are table constraints, so concurrent writers cannot race
//!   past them.
//!
//! # Example
//!
//! ```ignore
//! use inventory::outbound::persistence::{
//!     DbPool, DieselInventoryRepository, PoolConfig, run_migrations,
//! };
//!
//! run_migrations("inventory.db").await?;
//! let pool = DbPool::new(PoolConfig::new("inventory.db")).await?;
//! let repo = DieselInventoryRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_inventory_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_inventory_repository::DieselInventoryRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
