//! Resource API modules
//!
//! Thin declarative mappings from logical operations to HTTP calls on the
//! shared [`HttpClient`]. No control logic lives here: reconciliation is the
//! stores' job, classification the response interceptor's.
//!
//! # Endpoints
//!
//! - companies: `/api/company/list`, `/api/company[/{id}]`
//! - inventory: `/api/inventory/list`, `/api/inventory[/{id}]`,
//!   `/api/inventory/stock-in`, `/api/inventory/stock-out`
//! - orders: `/api/customer-order/list`, `/orders/type/{type}`,
//!   `/api/customer-order[/{id}]`, `/api/customer-order/{id}/confirm`
//! - finance: `/api/finance/statistics`, `/api/finance[/{id}]`
//! - auth: `/api/auth/login`, `/api/auth/user`, `/api/auth/logout`
//! - natural-language query: configurable, `/ai/parse` by default

pub mod auth;
pub mod company;
pub mod finance;
pub mod inventory;
pub mod nli;
pub mod orders;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use erpwire_domain::{ListPayload, PageRequest, ResourceId, Result};

use crate::http::{ApiRequest, HttpClient};

pub use auth::AuthApi;
pub use company::CompanyApi;
pub use finance::FinanceClient;
pub use inventory::InventoryApi;
pub use nli::NliClient;
pub use orders::OrderApi;

/// CRUD paths rooted at one collection, e.g. `/api/company`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Collection {
    root: &'static str,
}

impl Collection {
    pub(crate) const fn new(root: &'static str) -> Self {
        Self { root }
    }

    pub(crate) fn root(&self) -> &'static str {
        self.root
    }

    pub(crate) fn list_path(&self) -> String {
        format!("{}/list", self.root)
    }

    pub(crate) fn item_path(&self, id: ResourceId) -> String {
        format!("{}/{id}", self.root)
    }

    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        http: &HttpClient,
        request: PageRequest,
    ) -> Result<ListPayload<T>> {
        fetch_list(http, ApiRequest::get(self.list_path()).page(request)).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        http: &HttpClient,
        id: ResourceId,
    ) -> Result<T> {
        http.execute_json(ApiRequest::get(self.item_path(id))).await
    }

    pub(crate) async fn create<B: Serialize + Sync + ?Sized>(
        &self,
        http: &HttpClient,
        body: &B,
    ) -> Result<Value> {
        http.execute(ApiRequest::post(self.root).json(body)?).await
    }

    pub(crate) async fn update<B: Serialize + Sync + ?Sized>(
        &self,
        http: &HttpClient,
        id: ResourceId,
        body: &B,
    ) -> Result<Value> {
        http.execute(ApiRequest::put(self.item_path(id)).json(body)?).await
    }

    pub(crate) async fn delete(&self, http: &HttpClient, id: ResourceId) -> Result<Value> {
        http.execute(ApiRequest::delete(self.item_path(id))).await
    }
}

/// Execute a list call and interpret the payload as a page or a flat list.
pub(crate) async fn fetch_list<T: DeserializeOwned>(
    http: &HttpClient,
    request: ApiRequest,
) -> Result<ListPayload<T>> {
    let payload = http.execute(request).await?;
    ListPayload::from_value(payload)
}
