//! Notification port for failed calls
//!
//! Every failure classified by the response pipeline is announced once on a
//! single global channel. How loudly (user-facing notice or console warning)
//! is an environment policy of the implementation.

use erpwire_domain::ErpError;

/// Announces failed calls to the user or the developer console.
pub trait Notifier: Send + Sync {
    fn notify(&self, error: &ErpError);
}

/// Notifier that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _error: &ErpError) {}
}
