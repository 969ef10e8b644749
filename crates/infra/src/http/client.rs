use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client as ReqwestClient, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use erpwire_core::{CredentialSource, Credentials, Notifier, SilentNotifier};
use erpwire_domain::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use erpwire_domain::{ErpError, Result};

use super::classify::TransportFailure;
use super::interceptors::{RequestInterceptor, ResponseInterceptor};
use super::request::ApiRequest;
use crate::credentials::{MemoryTokenCache, SharedSession};

/// Shared transport client: one base URL, one default timeout, and the
/// request/response interceptors every call goes through.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
    credentials: Arc<dyn CredentialSource>,
    request_interceptor: RequestInterceptor,
    response_interceptor: ResponseInterceptor,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialSource> {
        &self.credentials
    }

    /// Send `request` and return the unwrapped payload.
    ///
    /// # Errors
    ///
    /// Every failure is classified once by the response interceptor; see
    /// [`ErpError`] for the categories.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, mut request: ApiRequest) -> Result<Value> {
        self.request_interceptor.intercept(&mut request);
        let timeout = request.timeout.unwrap_or(self.timeout);
        let cancel = request.cancel.take();

        let outbound = match self.build(&request, timeout) {
            Ok(outbound) => outbound,
            Err(failure) => return Err(self.response_interceptor.on_failure(failure)),
        };

        let method = outbound.method().clone();
        let url = outbound.url().clone();
        debug!(%method, %url, ?timeout, "sending HTTP request");

        let sent = self.client.execute(outbound);
        let outcome = match cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => Err(TransportFailure::Cancelled),
                result = sent => result.map_err(|err| TransportFailure::from_reqwest(&err, timeout)),
            },
            None => sent.await.map_err(|err| TransportFailure::from_reqwest(&err, timeout)),
        };

        let response = match outcome {
            Ok(response) => response,
            Err(failure) => {
                debug!(%method, %url, ?failure, "HTTP request failed");
                return Err(self.response_interceptor.on_failure(failure));
            }
        };

        let status = response.status();
        debug!(%method, %url, %status, "received HTTP response");

        // A non-2xx status classifies the call even if its body is unreadable.
        let body = match read_body(response).await {
            Ok(body) => body,
            Err(err) if status.is_success() => {
                return Err(self
                    .response_interceptor
                    .on_failure(TransportFailure::from_reqwest(&err, timeout)));
            }
            Err(err) => {
                debug!(%method, %url, %status, error = %err, "failed to read error body");
                Value::Null
            }
        };

        if status.is_success() {
            self.response_interceptor.on_success(body)
        } else {
            let body = (!body.is_null()).then_some(body);
            Err(self
                .response_interceptor
                .on_failure(TransportFailure::Status { status: status.as_u16(), body }))
        }
    }

    /// Send `request` and decode the unwrapped payload into `T`.
    pub async fn execute_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let path = request.path.clone();
        let payload = self.execute(request).await?;
        serde_json::from_value(payload).map_err(|e| {
            self.response_interceptor
                .on_decode_failure(format!("unexpected payload from {path}: {e}"))
        })
    }

    fn build(
        &self,
        request: &ApiRequest,
        timeout: Duration,
    ) -> std::result::Result<reqwest::Request, TransportFailure> {
        let url = self.resolve(&request.path)?;
        let mut builder = self.client.request(request.method.clone(), url).timeout(timeout);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder.build().map_err(|err| TransportFailure::NotSent { detail: err.to_string() })
    }

    fn resolve(&self, path: &str) -> std::result::Result<Url, TransportFailure> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined)
            .map_err(|err| TransportFailure::NotSent { detail: format!("invalid URL {joined}: {err}") })
    }
}

/// Response body as JSON. Empty bodies are `null`; non-JSON text is kept as a
/// JSON string.
async fn read_body(response: Response) -> std::result::Result<Value, reqwest::Error> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

/// Builder for [`HttpClient`].
pub struct HttpClientBuilder {
    base_url: String,
    timeout: Duration,
    credentials: Option<Arc<dyn CredentialSource>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            credentials: None,
            notifier: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn credentials(mut self, credentials: Arc<dyn CredentialSource>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// # Errors
    ///
    /// Returns [`ErpError::Config`] for an unparsable base URL or when the
    /// reqwest client cannot be built.
    pub fn build(self) -> Result<HttpClient> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| ErpError::Config(format!("invalid base URL {}: {e}", self.base_url)))?;

        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .no_proxy()
            .build()
            .map_err(|e| ErpError::Config(format!("failed to build HTTP client: {e}")))?;

        let credentials = self.credentials.unwrap_or_else(|| {
            Arc::new(Credentials::new(
                Arc::new(MemoryTokenCache::default()),
                Arc::new(SharedSession::default()),
            ))
        });
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(SilentNotifier));

        Ok(HttpClient {
            client,
            base_url,
            timeout: self.timeout,
            request_interceptor: RequestInterceptor::new(credentials.clone()),
            response_interceptor: ResponseInterceptor::new(credentials.clone(), notifier),
            credentials,
        })
    }
}
