//! Two-tier credential lookup

use std::sync::Arc;

use tracing::{debug, info};

use super::ports::{CredentialSource, SessionState, TokenCache};

/// Credential service over a fast cache and the shared session.
///
/// Reads prefer the cache and only fall back to the session on a miss.
/// Writes and invalidation always touch both tiers so they never diverge.
pub struct Credentials {
    cache: Arc<dyn TokenCache>,
    session: Arc<dyn SessionState>,
}

impl Credentials {
    pub fn new(cache: Arc<dyn TokenCache>, session: Arc<dyn SessionState>) -> Self {
        Self { cache, session }
    }
}

impl CredentialSource for Credentials {
    fn token(&self) -> Option<String> {
        if let Some(token) = self.cache.get().filter(|t| !t.is_empty()) {
            return Some(token);
        }
        let token = self.session.token().filter(|t| !t.is_empty());
        if token.is_some() {
            debug!("credential cache miss, using session token");
        }
        token
    }

    fn store(&self, token: &str) {
        self.cache.set(token);
        self.session.set_token(token);
        info!("credential stored");
    }

    fn invalidate(&self) {
        self.cache.clear();
        self.session.reset_token();
        info!("credential invalidated");
    }
}
