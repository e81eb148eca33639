//! Port abstraction for inventory persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{InventoryItem, ItemId, NewInventoryItem};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by inventory repository adapters.
    pub enum InventoryPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "inventory repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "inventory repository query failed: {message}",
    }
}

/// Port for the inventory table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Return every stored item ordered by identifier.
    async fn list_all(&self) -> Result<Vec<InventoryItem>, InventoryPersistenceError>;

    /// Insert an item and return it with its assigned identifier.
    async fn insert(
        &self,
        item: &NewInventoryItem,
    ) -> Result<InventoryItem, InventoryPersistenceError>;

    /// Delete an item; returns `false` when no row matched.
    async fn delete(&self, id: ItemId) -> Result<bool, InventoryPersistenceError>;
}
