//! Integration tests for the client context against a mock backend
//!
//! **Coverage:**
//! - Login stores the credential; subsequent calls carry it verbatim
//! - 401 clears the credential and publishes a notice
//! - Refetch-after-write: create re-lists page 0 before resolving
//! - Cache-aside lookup and identifier validation
//! - Envelope errors on 2xx responses
//! - Finance statistics fallback
//! - Logout resets the stores

#![allow(dead_code)]

#[path = "support.rs"]
mod support;

use erpwire_domain::{CompanyDraft, ErpError, FinanceStatistics, OrderScope, PageRequest};
use serde_json::json;
use support::{client_for, mount_login, ok, TOKEN};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn login_attaches_token_to_later_calls() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/company/list"))
        .and(header("Authorization", TOKEN))
        .respond_with(ok(json!([{"id": 1, "name": "Acme"}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let user = client.login("admin", "123456").await.unwrap();
    assert_eq!(user.name, "admin");
    assert!(client.is_authenticated());

    let page = client.companies().list(0, 10).await.unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn unauthorized_clears_credential_and_publishes_notice() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/inventory/list"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut notices = client.notifications();
    client.login("admin", "123456").await.unwrap();

    let err = client.inventory().list(0, 10).await.unwrap_err();

    assert_eq!(err, ErpError::Unauthorized);
    assert!(!client.is_authenticated());
    assert_eq!(notices.recv().await.unwrap().kind, "unauthorized");
}

#[tokio::test]
async fn create_relists_first_page_before_resolving() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/company"))
        .respond_with(ok(json!({"id": 2})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/company/list"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .respond_with(ok(json!({
            "content": [{"id": 2, "name": "X"}],
            "number": 0,
            "size": 10,
            "totalElements": 1,
            "totalPages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let companies = client.companies();
    let draft = CompanyDraft { name: "X".into(), ..Default::default() };

    let created = companies.create(&draft).await.unwrap();

    assert_eq!(created, json!({"id": 2}));
    assert!(companies.items().iter().any(|c| c.name == "X"));
    assert_eq!(companies.pagination(), PageRequest::new(0, 10));
}

#[tokio::test]
async fn cache_hit_and_invalid_identifier_issue_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/customer-order/list"))
        .respond_with(ok(json!([{"id": 5, "orderNo": "SO-5"}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let orders = client.orders(OrderScope::All);
    orders.list(0, 10).await.unwrap();

    let cached = orders.get_by_id("5").await.unwrap();
    assert_eq!(cached.order_no.as_deref(), Some("SO-5"));

    let err = orders.get_by_id("abc").await.unwrap_err();
    assert!(matches!(err, ErpError::InvalidIdentifier(_)));

    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn envelope_error_keeps_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/company/list"))
        .and(query_param("page", "0"))
        .respond_with(ok(json!([{"id": 1, "name": "Acme"}])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/company/list"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 403, "error": "no access"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let companies = client.companies();
    let before = companies.list(0, 10).await.unwrap();

    let err = companies.list(1, 10).await.unwrap_err();

    assert_eq!(err, ErpError::Application { code: 403, message: "no access".into() });
    assert_eq!(companies.collection(), before);
}

#[tokio::test]
async fn finance_statistics_fall_back_to_zeroes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/finance/statistics"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "report failed"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    assert_eq!(client.finance().statistics().await, FinanceStatistics::default());
}

#[tokio::test]
async fn logout_resets_stores_even_when_server_fails() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/company/list"))
        .respond_with(ok(json!([{"id": 1, "name": "Acme"}])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.login("admin", "123456").await.unwrap();
    client.companies().list(0, 10).await.unwrap();

    let result = client.logout().await;

    assert!(matches!(result, Err(ErpError::Server { .. })));
    assert!(!client.is_authenticated());
    assert!(client.user().is_none());
    assert!(client.companies().items().is_empty());
}
