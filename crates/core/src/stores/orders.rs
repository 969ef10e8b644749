//! Order store actions

use erpwire_domain::{IntoResourceId, ResourceId, Result};
use serde_json::Value;

use super::ports::OrderActions;
use super::resource::{Refetch, ResourceStore};

impl<A: OrderActions> ResourceStore<A> {
    /// Confirm an order, then re-fetch the current page.
    ///
    /// `freight` defaults to zero when not given.
    pub async fn confirm(
        &self,
        id: impl IntoResourceId + Send,
        freight: Option<f64>,
    ) -> Result<Value> {
        let id = ResourceId::parse(id)?;
        let freight = freight.unwrap_or(0.0);
        self.mutate(Refetch::CurrentPage, self.api.confirm(id, freight)).await
    }
}
