//! Finance API

use async_trait::async_trait;
use serde_json::Value;

use erpwire_core::FinanceApi;
use erpwire_domain::{
    FinanceFilter, FinanceRecord, FinanceStatistics, ListPayload, ResourceId, Result,
};

use super::{fetch_list, Collection};
use crate::http::{ApiRequest, HttpClient};

const FINANCE: Collection = Collection::new("/api/finance");

#[derive(Clone)]
pub struct FinanceClient {
    http: HttpClient,
}

impl FinanceClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl FinanceApi for FinanceClient {
    async fn statistics(&self) -> Result<FinanceStatistics> {
        let path = format!("{}/statistics", FINANCE.root());
        self.http.execute_json(ApiRequest::get(path)).await
    }

    async fn records(&self, filter: &FinanceFilter) -> Result<Vec<FinanceRecord>> {
        let request = ApiRequest::get(FINANCE.root()).query_pairs(filter.query_pairs());
        Ok(match fetch_list(&self.http, request).await? {
            ListPayload::Paginated(page) => page.content,
            ListPayload::Flat(records) => records,
        })
    }

    async fn create_record(&self, record: &FinanceRecord) -> Result<Value> {
        FINANCE.create(&self.http, record).await
    }

    async fn update_record(&self, id: ResourceId, record: &FinanceRecord) -> Result<Value> {
        FINANCE.update(&self.http, id, record).await
    }

    async fn delete_record(&self, id: ResourceId) -> Result<Value> {
        FINANCE.delete(&self.http, id).await
    }
}
