//! Request and response interceptors
//!
//! Every call passes through both: the request side attaches the credential,
//! the response side unwraps the envelope or classifies the failure exactly
//! once and announces it.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use erpwire_core::{CredentialSource, Notifier};
use erpwire_domain::constants::{AUTHORIZATION_HEADER, CANCEL_SIGNAL_PARAM};
use erpwire_domain::{unwrap_envelope, ErpError, Result};

use super::classify::{classify, TransportFailure};
use super::request::ApiRequest;

/// Attaches the current credential to outbound requests.
#[derive(Clone)]
pub struct RequestInterceptor {
    credentials: Arc<dyn CredentialSource>,
}

impl RequestInterceptor {
    pub fn new(credentials: Arc<dyn CredentialSource>) -> Self {
        Self { credentials }
    }

    /// Set `Authorization` to the token verbatim when one exists and drop
    /// any cancellation-signal query parameter.
    pub fn intercept(&self, request: &mut ApiRequest) {
        if let Some(token) = self.credentials.token() {
            request.set_header(AUTHORIZATION_HEADER, token);
        }
        request.remove_query(CANCEL_SIGNAL_PARAM);
    }
}

/// Unwraps success envelopes and classifies failures.
#[derive(Clone)]
pub struct ResponseInterceptor {
    credentials: Arc<dyn CredentialSource>,
    notifier: Arc<dyn Notifier>,
}

impl ResponseInterceptor {
    pub fn new(credentials: Arc<dyn CredentialSource>, notifier: Arc<dyn Notifier>) -> Self {
        Self { credentials, notifier }
    }

    /// Handle a 2xx body. A non-200 envelope code is rejected and announced.
    pub fn on_success(&self, body: Value) -> Result<Value> {
        unwrap_envelope(body).map_err(|err| {
            debug!(error = %err, "envelope rejected");
            self.announce(&err);
            err
        })
    }

    /// Classify a transport failure, invalidating the credential on 401.
    pub fn on_failure(&self, failure: TransportFailure) -> ErpError {
        let err = classify(failure);
        if matches!(err, ErpError::Unauthorized) {
            warn!("authorization rejected, invalidating credential");
            self.credentials.invalidate();
        }
        self.announce(&err);
        err
    }

    /// Announce a payload that did not decode into the expected shape.
    pub fn on_decode_failure(&self, detail: String) -> ErpError {
        let err = ErpError::Decode(detail);
        debug!(error = %err, "payload rejected");
        self.announce(&err);
        err
    }

    fn announce(&self, err: &ErpError) {
        if !matches!(err, ErpError::Cancelled) {
            self.notifier.notify(err);
        }
    }
}
