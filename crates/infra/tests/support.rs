use erpwire_domain::{ClientConfig, Environment};
use erpwire_infra::ErpClient;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "Bearer integration-token";

/// MD5 of the password `"123456"` used by every login.
pub const PASSWORD_DIGEST: &str = "e10adc3949ba59abbe56e057f20f883e";

/// Client pointed at `server`, in production so notices are published.
pub fn client_for(server: &MockServer) -> ErpClient {
    let config = ClientConfig {
        base_url: server.uri(),
        environment: Environment::Production,
        ..Default::default()
    };
    ErpClient::new(config).expect("client should build")
}

/// `{code: 200, data}` success envelope
pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": 200, "message": "success", "data": data}))
}

/// Mount login (expecting [`PASSWORD_DIGEST`]) and user-info endpoints
/// issuing [`TOKEN`].
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "admin", "password": PASSWORD_DIGEST})))
        .respond_with(ok(json!({"token": TOKEN})))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/user"))
        .respond_with(ok(json!({"name": "admin", "roles": ["admin"]})))
        .mount(server)
        .await;
}
