//! Natural-language query API

use std::time::Duration;

use async_trait::async_trait;

use erpwire_core::{call_with_retry, NliApi};
use erpwire_domain::{NliConfig, NliReply, NliRequest, Result};

use crate::http::{ApiRequest, HttpClient};

/// Posts `{input, confirmed}` to the configured assistant endpoint with its
/// own timeout, longer than the client default.
#[derive(Clone)]
pub struct NliClient {
    http: HttpClient,
    path: String,
    timeout: Duration,
}

impl NliClient {
    pub fn new(http: HttpClient, config: &NliConfig) -> Self {
        Self { http, path: config.path.clone(), timeout: config.timeout() }
    }

    /// [`NliApi::parse`] retried on timeout, at most `max_retries + 1` attempts.
    pub async fn parse_with_retry(
        &self,
        input: &str,
        confirmed: bool,
        max_retries: u32,
    ) -> Result<NliReply> {
        let request = NliRequest { input: input.to_string(), confirmed };
        call_with_retry(max_retries, || self.parse(&request)).await
    }
}

#[async_trait]
impl NliApi for NliClient {
    async fn parse(&self, request: &NliRequest) -> Result<NliReply> {
        let call = ApiRequest::post(self.path.as_str()).json(request)?.timeout(self.timeout);
        self.http.execute_json(call).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use erpwire_domain::ErpError;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer, timeout_ms: u64) -> NliClient {
        let config = NliConfig { path: "/ai/parse".into(), timeout_ms };
        NliClient::new(HttpClient::builder().base_url(server.uri()).build().unwrap(), &config)
    }

    #[tokio::test]
    async fn parse_posts_input_and_reads_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ai/parse"))
            .and(body_json(json!({"input": "stock of bolts", "confirmed": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "reply": "40 bolts in A1",
                "needConfirm": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = NliRequest { input: "stock of bolts".into(), confirmed: false };
        let reply = client(&server, 30_000).parse(&request).await.unwrap();

        assert_eq!(reply.reply, "40 bolts in A1");
        assert!(!reply.need_confirm);
    }

    #[tokio::test]
    async fn retry_stops_after_three_timeouts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
            .expect(3)
            .mount(&server)
            .await;

        let err = client(&server, 50).parse_with_retry("hello", false, 2).await.unwrap_err();

        assert_eq!(err, ErpError::Timeout(Duration::from_millis(50)));
    }

    #[tokio::test]
    async fn retry_returns_first_timely_reply() {
        let server = MockServer::start().await;
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        Mock::given(method("POST"))
            .respond_with(move |_req: &Request| {
                let template =
                    ResponseTemplate::new(200).set_body_json(json!({"reply": "ok", "needConfirm": true}));
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    template.set_delay(Duration::from_millis(300))
                } else {
                    template
                }
            })
            .mount(&server)
            .await;

        let reply = client(&server, 50).parse_with_retry("delete order 3", false, 2).await.unwrap();

        assert!(reply.need_confirm);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
