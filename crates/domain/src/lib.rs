//! # erpwire Domain
//!
//! Wire types and the error taxonomy for the erpwire data-access layer.
//!
//! This crate contains:
//! - The [`ErpError`] taxonomy and `Result` alias
//! - Envelope unwrapping and paginated payload shapes
//! - Resource entities (orders, inventory, companies, finance, queries)
//! - Client configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other erpwire crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
