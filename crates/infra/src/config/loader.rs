//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `ERPWIRE_BASE_API` is not set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `ERPWIRE_BASE_API`: Backend base URL (required for env loading)
//! - `ERPWIRE_TIMEOUT_MS`: Default request timeout in milliseconds
//! - `ERPWIRE_ENV`: `development` or `production`
//! - `ERPWIRE_TOKEN_KEY`: Key of the token in the credential cache
//! - `ERPWIRE_PAGE_SIZE`: Default page size of the stores
//! - `ERPWIRE_NLI_PATH`: Natural-language query endpoint path
//! - `ERPWIRE_NLI_TIMEOUT_MS`: Natural-language query timeout in milliseconds
//!
//! ## File Locations
//! The loader probes `config.{json,toml}` and `erpwire.{json,toml}` in the
//! current directory and up to two parents, then next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use erpwire_domain::{ClientConfig, Environment, ErpError, NliConfig, Result};

const CONFIG_FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "erpwire.json", "erpwire.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `ErpError::Config` if configuration cannot be loaded from either
/// source or a value is invalid.
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!(base_url = %config.base_url, "Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `ERPWIRE_BASE_API` is required; every other variable falls back to
/// its default.
///
/// # Errors
/// Returns `ErpError::Config` if the base URL is missing or a variable has
/// an invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    let defaults = ClientConfig::default();
    let base_url = env_var("ERPWIRE_BASE_API")?;

    let environment = match std::env::var("ERPWIRE_ENV") {
        Ok(raw) => Environment::parse(&raw)
            .ok_or_else(|| ErpError::Config(format!("Invalid environment: {raw}")))?,
        Err(_) => defaults.environment,
    };

    Ok(ClientConfig {
        base_url,
        timeout_ms: env_parse("ERPWIRE_TIMEOUT_MS", defaults.timeout_ms)?,
        environment,
        token_key: std::env::var("ERPWIRE_TOKEN_KEY").unwrap_or(defaults.token_key),
        default_page_size: env_parse("ERPWIRE_PAGE_SIZE", defaults.default_page_size)?,
        nli: NliConfig {
            path: std::env::var("ERPWIRE_NLI_PATH").unwrap_or(defaults.nli.path),
            timeout_ms: env_parse("ERPWIRE_NLI_TIMEOUT_MS", defaults.nli.timeout_ms)?,
        },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ErpError::Config` if the file is missing, unreadable or invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ErpError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ErpError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ErpError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration, format detected by file extension.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ErpError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ErpError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ErpError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join("..")]);
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| ErpError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse an optional numeric variable, `default` when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ErpError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}
