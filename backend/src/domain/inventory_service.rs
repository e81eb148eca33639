//! Inventory use-cases backed by the `InventoryRepository` port.
//!
//! The inventory is shared: every authenticated user sees and edits the same
//! list, so none of these operations take a user identifier.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    InventoryCommand, InventoryPersistenceError, InventoryQuery, InventoryRepository,
};
use crate::domain::{Error, InventoryItem, ItemId, NewInventoryItem};

/// Inventory use-cases over a repository.
#[derive(Clone)]
pub struct InventoryService {
    items: Arc<dyn InventoryRepository>,
}

impl InventoryService {
    /// Create a service backed by the given repository.
    pub fn new(items: Arc<dyn InventoryRepository>) -> Self {
        Self { items }
    }
}

fn map_inventory_persistence_error(error: InventoryPersistenceError) -> Error {
    match error {
        InventoryPersistenceError::Connection { message } => Error::service_unavailable(message),
        InventoryPersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl InventoryQuery for InventoryService {
    async fn list_items(&self) -> Result<Vec<InventoryItem>, Error> {
        self.items
            .list_all()
            .await
            .map_err(map_inventory_persistence_error)
    }
}

#[async_trait]
impl InventoryCommand for InventoryService {
    async fn add_item(&self, item: &NewInventoryItem) -> Result<InventoryItem, Error> {
        let stored = self
            .items
            .insert(item)
            .await
            .map_err(map_inventory_persistence_error)?;
        info!(item_id = %stored.id(), quantity = %stored.quantity(), "inventory item added");
        Ok(stored)
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), Error> {
        let removed = self
            .items
            .delete(id)
            .await
            .map_err(map_inventory_persistence_error)?;
        if !removed {
            return Err(Error::not_found(format!("inventory item {id} not found")));
        }
        info!(item_id = %id, "inventory item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockInventoryRepository;
    use crate::domain::{ErrorCode, ItemName, Quantity};
    use rstest::rstest;

    fn laptop(id: i32) -> InventoryItem {
        InventoryItem::new(
            ItemId::new(id).expect("valid id"),
            ItemName::new("Laptop").expect("valid name"),
            Quantity::new(5).expect("valid quantity"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn add_item_returns_stored_record() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_insert()
            .withf(|item| item.name().as_ref() == "Laptop" && item.quantity().get() == 5)
            .times(1)
            .returning(|_| Ok(laptop(1)));
        let service = InventoryService::new(Arc::new(repo));

        let item = NewInventoryItem::try_from_parts("Laptop", "5").expect("valid item");
        let stored = service.add_item(&item).await.expect("insert succeeds");

        assert_eq!(stored, laptop(1));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_missing_item_is_not_found() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(false));
        let service = InventoryService::new(Arc::new(repo));

        let err = service
            .delete_item(ItemId::new(99).expect("valid id"))
            .await
            .expect_err("missing item must fail");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_existing_item_succeeds() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_delete()
            .withf(|id| id.get() == 1)
            .returning(|_| Ok(true));
        let service = InventoryService::new(Arc::new(repo));

        service
            .delete_item(ItemId::new(1).expect("valid id"))
            .await
            .expect("delete succeeds");
    }

    #[rstest]
    #[case(InventoryPersistenceError::connection("pool exhausted"), ErrorCode::ServiceUnavailable)]
    #[case(InventoryPersistenceError::query("no such table"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn list_items_maps_repository_errors(
        #[case] failure: InventoryPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockInventoryRepository::new();
        repo.expect_list_all().returning(move || Err(failure.clone()));
        let service = InventoryService::new(Arc::new(repo));

        let err = service.list_items().await.expect_err("failure surfaces");
        assert_eq!(err.code(), expected);
    }
}
