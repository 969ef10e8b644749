//! Port interfaces for credential storage
//!
//! A credential lives in two tiers that must stay consistent: a fast token
//! cache consulted first, and the shared session object consulted only on a
//! cache miss.

/// Fast tier: opaque key/value lookup for the token.
pub trait TokenCache: Send + Sync {
    /// Cached token, if any
    fn get(&self) -> Option<String>;

    /// Replace the cached token
    fn set(&self, token: &str);

    /// Remove the cached token
    fn clear(&self);
}

/// Shared tier: the application session holding the token.
pub trait SessionState: Send + Sync {
    fn token(&self) -> Option<String>;

    fn set_token(&self, token: &str);

    /// Drop the token and anything derived from it (user profile).
    fn reset_token(&self);
}

/// Source of the credential attached to outbound requests.
///
/// Implemented by [`super::Credentials`]; tests substitute fakes.
pub trait CredentialSource: Send + Sync {
    /// Current credential, if one is available
    fn token(&self) -> Option<String>;

    /// Record a freshly issued credential (login)
    fn store(&self, token: &str);

    /// Forget the credential everywhere (authorization failure, logout)
    fn invalidate(&self);

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}
