//! # erpwire Core
//!
//! Client-side business rules - no HTTP or platform code.
//!
//! This crate contains:
//! - Port interfaces (traits) for resource APIs, credential tiers and
//!   notifications
//! - The two-tier credential source
//! - Resource stores and their reconciliation rules
//! - The bounded timeout retry and the natural-language query service
//!
//! ## Architecture Principles
//! - Only depends on `erpwire-domain`
//! - All transport access via traits implemented in `erpwire-infra`
//! - Store state is never held across an `.await`

pub mod credentials;
pub mod notification_ports;
pub mod query;
pub mod retry;
pub mod stores;

pub use credentials::{CredentialSource, Credentials, SessionState, TokenCache};
pub use notification_ports::{Notifier, SilentNotifier};
pub use query::NliService;
pub use retry::call_with_retry;
pub use stores::{
    Device, FinanceApi, FinanceStore, LayoutState, LayoutStore, NliApi, OrderActions, Refetch,
    ResourceApi, ResourceStore, Sidebar, StockActions, StoreState,
};
