//! In-process credential tiers
//!
//! [`MemoryTokenCache`] is the fast keyed cache; [`SharedSession`] is the
//! application session that also carries the logged-in user's profile.

use std::collections::HashMap;

use parking_lot::RwLock;

use erpwire_core::{SessionState, TokenCache};
use erpwire_domain::constants::DEFAULT_TOKEN_KEY;
use erpwire_domain::UserInfo;

/// Keyed token cache. Several clients may share one map under distinct keys.
#[derive(Debug)]
pub struct MemoryTokenCache {
    key: String,
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTokenCache {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), entries: RwLock::new(HashMap::new()) }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Default for MemoryTokenCache {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_KEY)
    }
}

impl TokenCache for MemoryTokenCache {
    fn get(&self) -> Option<String> {
        self.entries.read().get(&self.key).cloned()
    }

    fn set(&self, token: &str) {
        self.entries.write().insert(self.key.clone(), token.to_string());
    }

    fn clear(&self) {
        self.entries.write().remove(&self.key);
    }
}

#[derive(Debug, Default, Clone)]
struct SessionData {
    token: Option<String>,
    user: Option<UserInfo>,
}

/// Application session: token plus the profile fetched with it.
#[derive(Debug, Default)]
pub struct SharedSession {
    data: RwLock<SessionData>,
}

impl SharedSession {
    pub fn user(&self) -> Option<UserInfo> {
        self.data.read().user.clone()
    }

    pub fn set_user(&self, user: UserInfo) {
        self.data.write().user = Some(user);
    }
}

impl SessionState for SharedSession {
    fn token(&self) -> Option<String> {
        self.data.read().token.clone()
    }

    fn set_token(&self, token: &str) {
        self.data.write().token = Some(token.to_string());
    }

    fn reset_token(&self) {
        *self.data.write() = SessionData::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_is_keyed() {
        let cache = MemoryTokenCache::default();
        assert_eq!(cache.key(), "Admin-Token");
        assert_eq!(cache.get(), None);

        cache.set("Bearer abc");
        assert_eq!(cache.get().as_deref(), Some("Bearer abc"));

        cache.clear();
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn reset_drops_token_and_profile() {
        let session = SharedSession::default();
        session.set_token("Bearer abc");
        session.set_user(UserInfo { name: "admin".into(), ..Default::default() });

        session.reset_token();

        assert_eq!(session.token(), None);
        assert_eq!(session.user(), None);
    }
}
