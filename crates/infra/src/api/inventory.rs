//! Inventory API

use async_trait::async_trait;
use serde_json::Value;

use erpwire_core::{ResourceApi, StockActions};
use erpwire_domain::{
    InventoryDraft, InventoryItem, ListPayload, PageRequest, ResourceId, Result, StockMovement,
};

use super::Collection;
use crate::http::{ApiRequest, HttpClient};

const INVENTORY: Collection = Collection::new("/api/inventory");

#[derive(Clone)]
pub struct InventoryApi {
    http: HttpClient,
}

impl InventoryApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    async fn move_stock(&self, action: &str, movement: &StockMovement) -> Result<Value> {
        let path = format!("{}/{action}", INVENTORY.root());
        self.http.execute(ApiRequest::post(path).json(movement)?).await
    }
}

#[async_trait]
impl ResourceApi for InventoryApi {
    type Item = InventoryItem;
    type Draft = InventoryDraft;

    async fn list(&self, request: PageRequest) -> Result<ListPayload<InventoryItem>> {
        INVENTORY.list(&self.http, request).await
    }

    async fn get(&self, id: ResourceId) -> Result<InventoryItem> {
        INVENTORY.get(&self.http, id).await
    }

    async fn create(&self, draft: &InventoryDraft) -> Result<Value> {
        INVENTORY.create(&self.http, draft).await
    }

    async fn update(&self, id: ResourceId, draft: &InventoryDraft) -> Result<Value> {
        INVENTORY.update(&self.http, id, draft).await
    }

    async fn delete(&self, id: ResourceId) -> Result<Value> {
        INVENTORY.delete(&self.http, id).await
    }
}

#[async_trait]
impl StockActions for InventoryApi {
    async fn stock_in(&self, movement: &StockMovement) -> Result<Value> {
        self.move_stock("stock-in", movement).await
    }

    async fn stock_out(&self, movement: &StockMovement) -> Result<Value> {
        self.move_stock("stock-out", movement).await
    }
}
