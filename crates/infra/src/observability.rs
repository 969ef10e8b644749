//! Tracing initialisation

use tracing_subscriber::EnvFilter;

use erpwire_domain::Environment;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise development logs at `debug` and
/// production at `info`. Production emits JSON lines. An already installed
/// subscriber (e.g. in tests) is left in place.
pub fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if environment.is_production() { "info" } else { "debug" })
    });

    let result = if environment.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }
}
