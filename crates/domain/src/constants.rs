//! Application constants
//!
//! Wire-level and default configuration constants shared by every crate.

// Envelope
pub const SUCCESS_CODE: i64 = 200;
pub const ENVELOPE_CODE_FIELD: &str = "code";
pub const ENVELOPE_DATA_FIELD: &str = "data";
pub const ENVELOPE_ERROR_FIELD: &str = "error";
pub const ENVELOPE_MESSAGE_FIELD: &str = "message";
pub const DEFAULT_FAILURE_MESSAGE: &str = "request failed";
pub const DEFAULT_SERVER_ERROR_MESSAGE: &str =
    "internal server error, please contact the administrator";

// Paginated payload
pub const PAGE_CONTENT_FIELD: &str = "content";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// Transport
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const CANCEL_SIGNAL_PARAM: &str = "signal";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_TOKEN_KEY: &str = "Admin-Token";

// Natural-language query
pub const DEFAULT_NLI_PATH: &str = "/ai/parse";
pub const DEFAULT_NLI_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_MAX_RETRIES: u32 = 2;

// Notifications
pub const NOTIFICATION_CHANNEL_CAPACITY: usize = 64;
