//! Natural-language query service

use std::sync::Arc;

use erpwire_domain::constants::DEFAULT_MAX_RETRIES;
use erpwire_domain::{NliReply, NliRequest, Result};
use tracing::{debug, instrument};

use crate::retry::call_with_retry;
use crate::stores::ports::NliApi;

/// Sends free-text commands to the assistant endpoint.
///
/// A reply with `need_confirm` set asks the caller to send the same input
/// again with `confirmed = true`.
pub struct NliService<A: NliApi> {
    api: Arc<A>,
    max_retries: u32,
}

impl<A: NliApi> NliService<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api, max_retries: DEFAULT_MAX_RETRIES }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Single attempt.
    #[instrument(skip(self, input))]
    pub async fn ask(&self, input: &str, confirmed: bool) -> Result<NliReply> {
        let request = NliRequest { input: input.to_string(), confirmed };
        let reply = self.api.parse(&request).await?;
        debug!(need_confirm = reply.need_confirm, "assistant replied");
        Ok(reply)
    }

    /// Retries on timeout up to the configured bound.
    pub async fn ask_with_retry(&self, input: &str, confirmed: bool) -> Result<NliReply> {
        call_with_retry(self.max_retries, || self.ask(input, confirmed)).await
    }
}
