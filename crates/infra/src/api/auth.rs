//! Authentication API
//!
//! Login sends the hex MD5 digest of the password and returns a
//! ready-to-send credential (already carrying its scheme, e.g.
//! `"Bearer ..."`). Storing it is the caller's job.

use md5::{Digest, Md5};
use serde_json::Value;
use tracing::instrument;

use erpwire_domain::{LoginRequest, LoginResponse, Result, UserInfo};

use crate::http::{ApiRequest, HttpClient};

const LOGIN_PATH: &str = "/api/auth/login";
const USER_PATH: &str = "/api/auth/user";
const LOGOUT_PATH: &str = "/api/auth/logout";

#[derive(Clone)]
pub struct AuthApi {
    http: HttpClient,
}

impl AuthApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Log in with the plain `password`; only its digest leaves the process.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password_digest(password),
        };
        self.http.execute_json(ApiRequest::post(LOGIN_PATH).json(&request)?).await
    }

    pub async fn user_info(&self) -> Result<UserInfo> {
        self.http.execute_json(ApiRequest::get(USER_PATH)).await
    }

    pub async fn logout(&self) -> Result<Value> {
        self.http.execute(ApiRequest::get(LOGOUT_PATH)).await
    }
}

/// Lowercase hex MD5 of `password`, the form the backend stores.
pub fn password_digest(password: &str) -> String {
    hex::encode(Md5::digest(password.as_bytes()))
}
