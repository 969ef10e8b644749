//! In-memory resource API used by store tests

use std::collections::HashMap;

use async_trait::async_trait;
use erpwire_domain::{
    Company, CompanyDraft, ErpError, ListPayload, PageRequest, ResourceId, Result, ServerPage,
};
use parking_lot::Mutex;
use serde_json::{json, Value};

use super::ports::ResourceApi;

pub fn company(id: i64, name: &str) -> Company {
    Company { id: Some(ResourceId::new(id)), name: name.to_string(), ..Default::default() }
}

#[derive(Default)]
struct FakeState {
    items: Vec<Company>,
    server_page: Option<(u32, u32, u64)>,
    details: HashMap<ResourceId, Company>,
    list_requests: Vec<PageRequest>,
    get_calls: usize,
    mutation_calls: usize,
    fail_list: Option<ErpError>,
    fail_mutation: Option<ErpError>,
}

/// Company backend that applies mutations to an in-memory table
#[derive(Default)]
pub struct FakeCompanyApi {
    state: Mutex<FakeState>,
}

impl FakeCompanyApi {
    pub fn flat(items: Vec<Company>) -> Self {
        Self { state: Mutex::new(FakeState { items, ..Default::default() }) }
    }

    pub fn paged(items: Vec<Company>, number: u32, size: u32, total: u64) -> Self {
        Self {
            state: Mutex::new(FakeState {
                items,
                server_page: Some((number, size, total)),
                ..Default::default()
            }),
        }
    }

    pub fn insert_detail(&self, item: Company) {
        if let Some(id) = item.id {
            self.state.lock().details.insert(id, item);
        }
    }

    pub fn fail_next_list(&self, err: ErpError) {
        self.state.lock().fail_list = Some(err);
    }

    pub fn fail_next_mutation(&self, err: ErpError) {
        self.state.lock().fail_mutation = Some(err);
    }

    pub fn list_requests(&self) -> Vec<PageRequest> {
        self.state.lock().list_requests.clone()
    }

    pub fn clear_list_requests(&self) {
        self.state.lock().list_requests.clear();
    }

    pub fn get_calls(&self) -> usize {
        self.state.lock().get_calls
    }

    pub fn total_calls(&self) -> usize {
        let state = self.state.lock();
        state.list_requests.len() + state.get_calls + state.mutation_calls
    }

    fn begin_mutation(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.mutation_calls += 1;
        match state.fail_mutation.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ResourceApi for FakeCompanyApi {
    type Item = Company;
    type Draft = CompanyDraft;

    async fn list(&self, request: PageRequest) -> Result<ListPayload<Company>> {
        let mut state = self.state.lock();
        state.list_requests.push(request);
        if let Some(err) = state.fail_list.take() {
            return Err(err);
        }
        let content = state.items.clone();
        Ok(match state.server_page {
            Some((number, size, total_elements)) => ListPayload::Paginated(ServerPage {
                content,
                number,
                size,
                total_elements,
                total_pages: erpwire_domain::total_pages(total_elements, size),
            }),
            None => ListPayload::Flat(content),
        })
    }

    async fn get(&self, id: ResourceId) -> Result<Company> {
        let mut state = self.state.lock();
        state.get_calls += 1;
        state.details.get(&id).cloned().ok_or(ErpError::NotFound)
    }

    async fn create(&self, draft: &CompanyDraft) -> Result<Value> {
        self.begin_mutation()?;
        let mut state = self.state.lock();
        let next = state.items.iter().filter_map(|c| c.id).map(ResourceId::get).max();
        let id = next.unwrap_or(0) + 1;
        state.items.push(company(id, &draft.name));
        Ok(json!({ "id": id }))
    }

    async fn update(&self, id: ResourceId, draft: &CompanyDraft) -> Result<Value> {
        self.begin_mutation()?;
        let mut state = self.state.lock();
        let item = state.items.iter_mut().find(|c| c.id == Some(id)).ok_or(ErpError::NotFound)?;
        item.name = draft.name.clone();
        Ok(Value::Null)
    }

    async fn delete(&self, id: ResourceId) -> Result<Value> {
        self.begin_mutation()?;
        self.state.lock().items.retain(|c| c.id != Some(id));
        Ok(Value::Null)
    }
}
