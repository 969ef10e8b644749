//! Resource store - cached collection reconciled with the server
//!
//! Every store follows the same rules:
//! - `list` replaces the cached collection in full and recomputes pagination
//! - `get_by_id` is cache-aside and never populates the cache
//! - mutations are never applied locally; a successful mutation re-fetches
//!   the list so the cache reflects server-confirmed state

use std::future::Future;
use std::sync::Arc;

use erpwire_domain::{IntoResourceId, Page, PageRequest, Resource, ResourceId, Result};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::loading::LoadingFlag;
use super::ports::ResourceApi;

/// Which page to re-fetch after a successful mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refetch {
    /// Page 0 with the current page size (after create)
    FirstPage,
    /// The currently cached page and size (after update/delete/actions)
    CurrentPage,
}

/// Snapshot of a store's state
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState<T> {
    pub collection: Page<T>,
    pub selected: Option<T>,
    pub loading: bool,
}

#[derive(Debug)]
struct Inner<T> {
    collection: Page<T>,
    selected: Option<T>,
}

impl<T> Inner<T> {
    fn initial(page_size: u32) -> Self {
        Self { collection: Page::empty(page_size), selected: None }
    }
}

/// Store for one resource: cached page, pagination, selection, loading flag
pub struct ResourceStore<A: ResourceApi> {
    name: &'static str,
    pub(crate) api: Arc<A>,
    default_page_size: u32,
    state: RwLock<Inner<A::Item>>,
    loading: LoadingFlag,
}

impl<A: ResourceApi> ResourceStore<A> {
    /// Create a store in its initial empty shape
    ///
    /// # Arguments
    /// * `name` - Store key, used in log events
    /// * `api` - Resource API module backing the store
    /// * `default_page_size` - Page size until the first list call
    pub fn new(name: &'static str, api: Arc<A>, default_page_size: u32) -> Self {
        let default_page_size = PageRequest::new(0, default_page_size).size;
        Self {
            name,
            api,
            default_page_size,
            state: RwLock::new(Inner::initial(default_page_size)),
            loading: LoadingFlag::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fetch a page and replace the cached collection with it.
    ///
    /// On failure the previous collection is kept and the error propagates.
    pub async fn list(&self, page: u32, size: u32) -> Result<Page<A::Item>> {
        let request = PageRequest::new(page, size);
        let _loading = self.loading.begin();
        debug!(store = self.name, page = request.page, size = request.size, "fetching list");

        let payload = self.api.list(request).await.map_err(|err| {
            warn!(store = self.name, error = %err, "list fetch failed, keeping cached collection");
            err
        })?;

        let collection = payload.into_page(request);
        info!(
            store = self.name,
            page = collection.page,
            items = collection.len(),
            total_elements = collection.total_elements,
            "collection refreshed"
        );
        self.state.write().collection = collection.clone();
        Ok(collection)
    }

    /// Look up one item, cached collection first.
    ///
    /// A hit returns the cached item without a network call. A miss fetches
    /// the item and returns it without inserting it into the collection.
    pub async fn get_by_id(&self, id: impl IntoResourceId + Send) -> Result<A::Item> {
        let id = ResourceId::parse(id)?;
        if let Some(item) = self.cached(id) {
            debug!(store = self.name, %id, "cache hit");
            return Ok(item);
        }
        debug!(store = self.name, %id, "cache miss, fetching item");
        self.api.get(id).await
    }

    /// Create an item, then re-fetch page 0 with the current page size.
    pub async fn create(&self, draft: &A::Draft) -> Result<Value> {
        self.mutate(Refetch::FirstPage, self.api.create(draft)).await
    }

    /// Update an item, then re-fetch the current page.
    pub async fn update(&self, id: impl IntoResourceId + Send, draft: &A::Draft) -> Result<Value> {
        let id = ResourceId::parse(id)?;
        self.mutate(Refetch::CurrentPage, self.api.update(id, draft)).await
    }

    /// Delete an item, then re-fetch the current page.
    pub async fn delete(&self, id: impl IntoResourceId + Send) -> Result<Value> {
        let id = ResourceId::parse(id)?;
        self.mutate(Refetch::CurrentPage, self.api.delete(id)).await
    }

    /// Run a server mutation under the refetch-after-write rule.
    ///
    /// The cache is only touched by the follow-up list call, which is awaited
    /// before this returns. A failed mutation leaves the cache untouched; a
    /// failed re-fetch propagates its error.
    pub async fn mutate<R, F>(&self, refetch: Refetch, mutation: F) -> Result<R>
    where
        F: Future<Output = Result<R>> + Send,
        R: Send,
    {
        let response = mutation.await.map_err(|err| {
            warn!(store = self.name, error = %err, "mutation failed");
            err
        })?;

        let current = self.state.read().collection.request();
        let target = match refetch {
            Refetch::FirstPage => PageRequest::first(current.size),
            Refetch::CurrentPage => current,
        };
        self.list(target.page, target.size).await?;
        Ok(response)
    }

    /// Select an item. Local only; the value is trusted as given.
    pub fn set_current(&self, item: Option<A::Item>) {
        self.state.write().selected = item;
    }

    pub fn current(&self) -> Option<A::Item> {
        self.state.read().selected.clone()
    }

    /// Restore the initial empty shape. Local only.
    pub fn reset(&self) {
        *self.state.write() = Inner::initial(self.default_page_size);
        debug!(store = self.name, "store reset");
    }

    pub fn collection(&self) -> Page<A::Item> {
        self.state.read().collection.clone()
    }

    pub fn items(&self) -> Vec<A::Item> {
        self.state.read().collection.items.clone()
    }

    /// Current page coordinates
    pub fn pagination(&self) -> PageRequest {
        self.state.read().collection.request()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn snapshot(&self) -> StoreState<A::Item> {
        let state = self.state.read();
        StoreState {
            collection: state.collection.clone(),
            selected: state.selected.clone(),
            loading: self.loading.is_loading(),
        }
    }

    fn cached(&self, id: ResourceId) -> Option<A::Item> {
        self.state
            .read()
            .collection
            .items
            .iter()
            .find(|item| item.resource_id() == Some(id))
            .cloned()
    }
}
