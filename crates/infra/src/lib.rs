//! # erpwire Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The reqwest transport client and its request/response interceptors
//! - Resource API modules (companies, inventory, orders, finance, auth,
//!   natural-language query)
//! - In-process credential tiers and the failure notification channel
//! - Configuration loading and tracing initialisation
//! - [`ErpClient`], the store registry
//!
//! ## Architecture
//! - Implements traits defined in `erpwire-core`
//! - Contains all "impure" code (network I/O, environment, files)

pub mod api;
pub mod client;
pub mod config;
pub mod credentials;
pub mod http;
pub mod notify;
pub mod observability;

pub use api::{AuthApi, CompanyApi, FinanceClient, InventoryApi, NliClient, OrderApi};
pub use client::{CompanyStore, ErpClient, FinanceStatisticsStore, InventoryStore, OrderStore};
pub use credentials::{MemoryTokenCache, SharedSession};
pub use http::{ApiRequest, HttpClient, HttpClientBuilder, TransportFailure};
pub use notify::{Notice, NotificationChannel};
pub use observability::init_tracing;
