//! Driving port for mutating the shared inventory.

use async_trait::async_trait;

use crate::domain::{Error, InventoryItem, ItemId, NewInventoryItem};

/// Domain use-case port for adding and removing inventory items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryCommand: Send + Sync {
    /// Store a new item and return it with its assigned identifier.
    async fn add_item(&self, item: &NewInventoryItem) -> Result<InventoryItem, Error>;

    /// Remove an item.
    ///
    /// A missing item yields [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound)
    /// and leaves the store unchanged.
    async fn delete_item(&self, id: ItemId) -> Result<(), Error>;
}
