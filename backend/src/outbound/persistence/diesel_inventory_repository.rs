//! SQLite-backed `InventoryRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{InventoryPersistenceError, InventoryRepository};
use crate::domain::{InventoryItem, ItemId, ItemName, NewInventoryItem, Quantity};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{InventoryRow, NewInventoryRow};
use super::pool::{DbPool, PoolError};
use super::schema::inventory;

/// Diesel-backed implementation of the `InventoryRepository` port.
#[derive(Clone)]
pub struct DieselInventoryRepository {
    pool: DbPool,
}

impl DieselInventoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> InventoryPersistenceError {
    map_basic_pool_error(error, InventoryPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> InventoryPersistenceError {
    map_basic_diesel_error(
        error,
        InventoryPersistenceError::query,
        InventoryPersistenceError::connection,
    )
}

/// Convert a database row into a domain item, rejecting corrupt rows.
fn row_to_item(row: InventoryRow) -> Result<InventoryItem, InventoryPersistenceError> {
    let invalid = |err: crate::domain::InventoryValidationError| {
        InventoryPersistenceError::query(format!("invalid stored item {}: {err}", row.id))
    };
    let id = ItemId::new(row.id).map_err(invalid)?;
    let name = ItemName::new(&row.item_name).map_err(invalid)?;
    let quantity = Quantity::new(row.quantity).map_err(invalid)?;
    Ok(InventoryItem::new(id, name, quantity))
}

#[async_trait]
impl InventoryRepository for DieselInventoryRepository {
    async fn list_all(&self) -> Result<Vec<InventoryItem>, InventoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<InventoryRow> = inventory::table
            .order(inventory::id.asc())
            .select(InventoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_item).collect()
    }

    async fn insert(
        &self,
        item: &NewInventoryItem,
    ) -> Result<InventoryItem, InventoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewInventoryRow {
            item_name: item.name().as_ref(),
            quantity: item.quantity().get(),
        };

        let row: InventoryRow = diesel::insert_into(inventory::table)
            .values(&new_row)
            .returning(InventoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_item(row)
    }

    async fn delete(&self, id: ItemId) -> Result<bool, InventoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(inventory::table.filter(inventory::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
