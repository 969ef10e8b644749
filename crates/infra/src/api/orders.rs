//! Order API, scoped to all, customer or purchase orders
//!
//! A scoped API lists only its order type and stamps that type on drafts
//! that leave it empty. Detail and mutation paths are shared by all scopes.

use std::borrow::Cow;

use async_trait::async_trait;
use serde_json::Value;

use erpwire_core::{OrderActions, ResourceApi};
use erpwire_domain::{
    ListPayload, Order, OrderDraft, OrderScope, PageRequest, ResourceId, Result,
};

use super::{fetch_list, Collection};
use crate::http::{ApiRequest, HttpClient};

const ORDERS: Collection = Collection::new("/api/customer-order");
const ORDERS_BY_TYPE: &str = "/orders/type";

#[derive(Clone)]
pub struct OrderApi {
    http: HttpClient,
    scope: OrderScope,
}

impl OrderApi {
    pub fn new(http: HttpClient, scope: OrderScope) -> Self {
        Self { http, scope }
    }

    pub fn scope(&self) -> OrderScope {
        self.scope
    }

    fn list_path(&self) -> String {
        match self.scope.order_type() {
            Some(order_type) => format!("{ORDERS_BY_TYPE}/{order_type}"),
            None => ORDERS.list_path(),
        }
    }

    fn scoped<'a>(&self, draft: &'a OrderDraft) -> Cow<'a, OrderDraft> {
        match (self.scope.order_type(), &draft.kind) {
            (Some(order_type), None) => Cow::Owned(OrderDraft {
                kind: Some(order_type.to_string()),
                ..draft.clone()
            }),
            _ => Cow::Borrowed(draft),
        }
    }
}

#[async_trait]
impl ResourceApi for OrderApi {
    type Item = Order;
    type Draft = OrderDraft;

    async fn list(&self, request: PageRequest) -> Result<ListPayload<Order>> {
        fetch_list(&self.http, ApiRequest::get(self.list_path()).page(request)).await
    }

    async fn get(&self, id: ResourceId) -> Result<Order> {
        ORDERS.get(&self.http, id).await
    }

    async fn create(&self, draft: &OrderDraft) -> Result<Value> {
        let body = self.scoped(draft);
        ORDERS.create(&self.http, &*body).await
    }

    async fn update(&self, id: ResourceId, draft: &OrderDraft) -> Result<Value> {
        ORDERS.update(&self.http, id, draft).await
    }

    async fn delete(&self, id: ResourceId) -> Result<Value> {
        ORDERS.delete(&self.http, id).await
    }
}

#[async_trait]
impl OrderActions for OrderApi {
    async fn confirm(&self, id: ResourceId, freight: f64) -> Result<Value> {
        let path = format!("{}/confirm", ORDERS.item_path(id));
        self.http.execute(ApiRequest::post(path).query("freight", freight)).await
    }
}
