//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use quarry_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "QUARRY_LOG";

/// Initialize the global subscriber with structured JSON output.
///
/// Respects `QUARRY_LOG`; defaults to `info`. Returns `false` if a global
/// subscriber was already installed.
pub fn init_tracing() -> bool {
    init_tracing_with_config(&ObservabilityConfig::default())
}

/// Initialize the global subscriber from config. `QUARRY_LOG` still wins over
/// `config.log_level` when set.
pub fn init_tracing_with_config(config: &ObservabilityConfig) -> bool {
    let filter = build_filter(&config.log_level);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json {
        builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
            .is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        tracing::debug!(json = config.json, "tracing initialized");
    }
    installed
}

/// Filter from `QUARRY_LOG`, falling back to `default_directive`, then to `info`.
pub fn build_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
