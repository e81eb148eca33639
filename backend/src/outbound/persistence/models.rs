//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use super::schema::{inventory, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the inventory table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = inventory)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct InventoryRow {
    pub id: i32,
    pub item_name: String,
    pub quantity: i32,
}

/// Insertable struct for creating new inventory records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = inventory)]
pub(crate) struct NewInventoryRow<'a> {
    pub item_name: &'a str,
    pub quantity: i32,
}
