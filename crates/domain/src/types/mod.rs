//! Domain types and wire models
//!
//! Entities keep the backend's camelCase field names on the wire and carry
//! unknown fields through untouched.

pub mod auth;
pub mod company;
pub mod envelope;
pub mod finance;
pub mod id;
pub mod inventory;
pub mod nli;
pub mod order;
pub mod page;

pub use auth::{LoginRequest, LoginResponse, UserInfo};
pub use company::{Company, CompanyDraft};
pub use envelope::{error_detail, unwrap_envelope};
pub use finance::{FinanceFilter, FinanceRecord, FinanceStatistics};
pub use id::{IntoResourceId, ResourceId};
pub use inventory::{InventoryDraft, InventoryItem, StockMovement};
pub use nli::{NliReply, NliRequest};
pub use order::{Order, OrderDraft, OrderLine, OrderScope};
pub use page::{total_pages, ListPayload, Page, PageRequest, ServerPage};

/// A server-side entity addressable by a numeric identifier.
///
/// Entities not yet persisted have no identifier and never match a
/// cache-aside lookup.
pub trait Resource {
    fn resource_id(&self) -> Option<ResourceId>;
}
