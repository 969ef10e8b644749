//! Inventory store actions

use erpwire_domain::{Result, StockMovement};
use serde_json::Value;
use tracing::debug;

use super::ports::StockActions;
use super::resource::{Refetch, ResourceStore};

impl<A: StockActions> ResourceStore<A> {
    /// Receive stock into an existing record, then re-fetch the current page.
    pub async fn stock_in(&self, movement: &StockMovement) -> Result<Value> {
        debug!(store = self.name(), id = %movement.id, quantity = movement.quantity, "stock in");
        self.mutate(Refetch::CurrentPage, self.api.stock_in(movement)).await
    }

    /// Issue stock from an existing record, then re-fetch the current page.
    pub async fn stock_out(&self, movement: &StockMovement) -> Result<Value> {
        debug!(store = self.name(), id = %movement.id, quantity = movement.quantity, "stock out");
        self.mutate(Refetch::CurrentPage, self.api.stock_out(movement)).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use erpwire_domain::{
        ErpError, InventoryDraft, InventoryItem, ListPayload, PageRequest, ResourceId,
    };
    use parking_lot::Mutex;

    use super::*;
    use crate::stores::ports::ResourceApi;

    #[derive(Default)]
    struct FakeInventoryApi {
        items: Mutex<Vec<InventoryItem>>,
        lists: Mutex<usize>,
    }

    impl FakeInventoryApi {
        fn adjust(&self, movement: &StockMovement, sign: i64) -> Result<Value> {
            let mut items = self.items.lock();
            let item = items
                .iter_mut()
                .find(|i| i.id == Some(movement.id))
                .ok_or(ErpError::NotFound)?;
            if sign < 0 && item.quantity < movement.quantity {
                return Err(ErpError::Application { code: 400, message: "insufficient stock".into() });
            }
            item.quantity += sign * movement.quantity;
            Ok(Value::Null)
        }
    }

    #[async_trait]
    impl ResourceApi for FakeInventoryApi {
        type Item = InventoryItem;
        type Draft = InventoryDraft;

        async fn list(&self, _request: PageRequest) -> Result<ListPayload<InventoryItem>> {
            *self.lists.lock() += 1;
            Ok(ListPayload::Flat(self.items.lock().clone()))
        }

        async fn get(&self, _id: ResourceId) -> Result<InventoryItem> {
            Err(ErpError::NotFound)
        }

        async fn create(&self, _draft: &InventoryDraft) -> Result<Value> {
            Ok(Value::Null)
        }

        async fn update(&self, _id: ResourceId, _draft: &InventoryDraft) -> Result<Value> {
            Ok(Value::Null)
        }

        async fn delete(&self, _id: ResourceId) -> Result<Value> {
            Ok(Value::Null)
        }
    }

    #[async_trait]
    impl StockActions for FakeInventoryApi {
        async fn stock_in(&self, movement: &StockMovement) -> Result<Value> {
            self.adjust(movement, 1)
        }

        async fn stock_out(&self, movement: &StockMovement) -> Result<Value> {
            self.adjust(movement, -1)
        }
    }

    fn store_with(quantity: i64) -> (Arc<FakeInventoryApi>, ResourceStore<FakeInventoryApi>) {
        let api = Arc::new(FakeInventoryApi::default());
        api.items.lock().push(InventoryItem {
            id: Some(ResourceId::new(1)),
            product_name: "bolt".into(),
            quantity,
            ..Default::default()
        });
        let store = ResourceStore::new("inventory", api.clone(), 10);
        (api, store)
    }

    #[tokio::test]
    async fn stock_movements_refetch_the_collection() {
        let (api, store) = store_with(5);
        store.list(0, 10).await.unwrap();

        store.stock_in(&StockMovement::new(ResourceId::new(1), 3)).await.unwrap();
        assert_eq!(store.items()[0].quantity, 8);

        store.stock_out(&StockMovement::new(ResourceId::new(1), 2)).await.unwrap();
        assert_eq!(store.items()[0].quantity, 6);
        assert_eq!(*api.lists.lock(), 3);
    }

    #[tokio::test]
    async fn rejected_stock_out_keeps_cached_quantity() {
        let (api, store) = store_with(1);
        store.list(0, 10).await.unwrap();

        let err = store.stock_out(&StockMovement::new(ResourceId::new(1), 5)).await.unwrap_err();

        assert!(matches!(err, ErpError::Application { code: 400, .. }));
        assert_eq!(store.items()[0].quantity, 1);
        assert_eq!(*api.lists.lock(), 1);
    }
}
