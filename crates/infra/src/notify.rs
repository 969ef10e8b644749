//! Global failure notification channel
//!
//! Production publishes a user-facing [`Notice`] to every subscriber and logs
//! at `error`; development only logs a `warn` for the developer console.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{error, warn};

use erpwire_core::Notifier;
use erpwire_domain::constants::NOTIFICATION_CHANNEL_CAPACITY;
use erpwire_domain::{Environment, ErpError};

/// User-facing notice for one failed call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: String,
    pub message: String,
}

impl From<&ErpError> for Notice {
    fn from(err: &ErpError) -> Self {
        Self { kind: err.label().to_string(), message: err.user_message() }
    }
}

/// Broadcast-backed [`Notifier`] with an environment policy.
#[derive(Debug, Clone)]
pub struct NotificationChannel {
    environment: Environment,
    sender: broadcast::Sender<Notice>,
}

impl NotificationChannel {
    pub fn new(environment: Environment) -> Self {
        let (sender, _) = broadcast::channel(NOTIFICATION_CHANNEL_CAPACITY);
        Self { environment, sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }
}

impl Notifier for NotificationChannel {
    fn notify(&self, err: &ErpError) {
        if self.environment.is_production() {
            error!(error = %err, kind = err.label(), "request failed");
            // No subscribers is not an error
            let _ = self.sender.send(Notice::from(err));
        } else {
            warn!(error = %err, kind = err.label(), "request failed");
        }
    }
}
