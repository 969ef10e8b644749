//! Transport client and its request/response pipeline

pub mod classify;
pub mod client;
pub mod interceptors;
pub mod request;

pub use classify::{classify, TransportFailure};
pub use client::{HttpClient, HttpClientBuilder};
pub use interceptors::{RequestInterceptor, ResponseInterceptor};
pub use request::ApiRequest;
