//! Company master-data API

use async_trait::async_trait;
use serde_json::Value;

use erpwire_core::ResourceApi;
use erpwire_domain::{Company, CompanyDraft, ListPayload, PageRequest, ResourceId, Result};

use super::Collection;
use crate::http::HttpClient;

const COMPANIES: Collection = Collection::new("/api/company");

#[derive(Clone)]
pub struct CompanyApi {
    http: HttpClient,
}

impl CompanyApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ResourceApi for CompanyApi {
    type Item = Company;
    type Draft = CompanyDraft;

    async fn list(&self, request: PageRequest) -> Result<ListPayload<Company>> {
        COMPANIES.list(&self.http, request).await
    }

    async fn get(&self, id: ResourceId) -> Result<Company> {
        COMPANIES.get(&self.http, id).await
    }

    async fn create(&self, draft: &CompanyDraft) -> Result<Value> {
        COMPANIES.create(&self.http, draft).await
    }

    async fn update(&self, id: ResourceId, draft: &CompanyDraft) -> Result<Value> {
        COMPANIES.update(&self.http, id, draft).await
    }

    async fn delete(&self, id: ResourceId) -> Result<Value> {
        COMPANIES.delete(&self.http, id).await
    }
}
