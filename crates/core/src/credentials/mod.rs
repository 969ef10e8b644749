//! Credential source: a two-tier token lookup shared by every request

pub mod ports;
pub mod service;

pub use ports::{CredentialSource, SessionState, TokenCache};
pub use service::Credentials;
