//! Client configuration structures

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_NLI_PATH, DEFAULT_NLI_TIMEOUT_MS, DEFAULT_PAGE_SIZE,
    DEFAULT_TIMEOUT_MS, DEFAULT_TOKEN_KEY,
};

/// Build environment. Selects the failure-notification verbosity only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parse `"production"`/`"prod"` and `"development"`/`"dev"` (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

/// Natural-language query endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NliConfig {
    #[serde(default = "default_nli_path")]
    pub path: String,
    #[serde(default = "default_nli_timeout_ms")]
    pub timeout_ms: u64,
}

impl NliConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for NliConfig {
    fn default() -> Self {
        Self { path: default_nli_path(), timeout_ms: default_nli_timeout_ms() }
    }
}

/// Top-level client configuration
///
/// `base_url` and `timeout_ms` configure the shared transport client and are
/// fixed once the client is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default = "default_token_key")]
    pub token_key: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    #[serde(default)]
    pub nli: NliConfig,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            environment: Environment::default(),
            token_key: default_token_key(),
            default_page_size: default_page_size(),
            nli: NliConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_token_key() -> String {
    DEFAULT_TOKEN_KEY.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_nli_path() -> String {
    DEFAULT_NLI_PATH.to_string()
}

fn default_nli_timeout_ms() -> u64 {
    DEFAULT_NLI_TIMEOUT_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url": "http://erp.internal"}"#).unwrap();
        assert_eq!(config.base_url, "http://erp.internal");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.nli.path, "/ai/parse");
        assert_eq!(config.nli.timeout(), Duration::from_secs(30));
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn parses_environment_aliases() {
        assert_eq!(Environment::parse("PROD"), Some(Environment::Production));
        assert_eq!(Environment::parse(" dev "), Some(Environment::Development));
        assert_eq!(Environment::parse("staging"), None);
    }
}
