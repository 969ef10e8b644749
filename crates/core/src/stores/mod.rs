//! Client-side stores
//!
//! Stores hold cached server state and reconcile it with the backend through
//! the resource API ports. Store state is never held across an `.await`.

pub mod finance;
pub mod inventory;
pub mod layout;
pub mod loading;
pub mod orders;
pub mod ports;
pub mod resource;

#[cfg(test)]
pub(crate) mod testing;

pub use finance::FinanceStore;
pub use layout::{Device, LayoutState, LayoutStore, Sidebar};
pub use loading::{LoadingFlag, LoadingGuard};
pub use ports::{FinanceApi, NliApi, OrderActions, ResourceApi, StockActions};
pub use resource::{Refetch, ResourceStore, StoreState};
