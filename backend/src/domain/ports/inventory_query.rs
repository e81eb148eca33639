//! Driving port for reading the shared inventory.

use async_trait::async_trait;

use crate::domain::{Error, InventoryItem};

/// Domain use-case port for listing inventory items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryQuery: Send + Sync {
    /// Return every item in insertion order.
    async fn list_items(&self) -> Result<Vec<InventoryItem>, Error>;
}
