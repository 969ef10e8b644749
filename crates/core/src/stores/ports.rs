//! Port interfaces for resource API modules
//!
//! Each resource module maps logical operations onto HTTP calls and nothing
//! else. Stores own the reconciliation policy on top of these traits.

use async_trait::async_trait;
use erpwire_domain::{
    FinanceFilter, FinanceRecord, FinanceStatistics, ListPayload, NliReply, NliRequest,
    PageRequest, Resource, ResourceId, Result, StockMovement,
};
use serde_json::Value;

/// CRUD surface of a paginated resource
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// Entity held in the store's collection
    type Item: Resource + Clone + Send + Sync + 'static;

    /// Create/update body
    type Draft: Send + Sync;

    /// Fetch one page; the payload may be paginated or a flat list
    async fn list(&self, request: PageRequest) -> Result<ListPayload<Self::Item>>;

    async fn get(&self, id: ResourceId) -> Result<Self::Item>;

    async fn create(&self, draft: &Self::Draft) -> Result<Value>;

    async fn update(&self, id: ResourceId, draft: &Self::Draft) -> Result<Value>;

    async fn delete(&self, id: ResourceId) -> Result<Value>;
}

/// Order-specific actions
#[async_trait]
pub trait OrderActions: ResourceApi {
    /// Confirm an order, charging `freight`
    async fn confirm(&self, id: ResourceId, freight: f64) -> Result<Value>;
}

/// Inventory stock movements
#[async_trait]
pub trait StockActions: ResourceApi {
    async fn stock_in(&self, movement: &StockMovement) -> Result<Value>;

    async fn stock_out(&self, movement: &StockMovement) -> Result<Value>;
}

/// Finance statistics and records
#[async_trait]
pub trait FinanceApi: Send + Sync {
    async fn statistics(&self) -> Result<FinanceStatistics>;

    async fn records(&self, filter: &FinanceFilter) -> Result<Vec<FinanceRecord>>;

    async fn create_record(&self, record: &FinanceRecord) -> Result<Value>;

    async fn update_record(&self, id: ResourceId, record: &FinanceRecord) -> Result<Value>;

    async fn delete_record(&self, id: ResourceId) -> Result<Value>;
}

/// Single-shot natural-language query
#[async_trait]
pub trait NliApi: Send + Sync {
    async fn parse(&self, request: &NliRequest) -> Result<NliReply>;
}
