//! Tracing setup for hosts that do not install their own subscriber.

use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;

const DEFAULT_DIRECTIVE: &str = "segmented_input=warn";
const DEBUG_DIRECTIVE: &str = "segmented_input=debug";

/// Filter used when `RUST_LOG` is not set.
pub fn default_directive(config: &EnvConfig) -> &'static str {
    if config.debug {
        DEBUG_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    }
}

/// Installs a compact fmt subscriber. Returns false when a global subscriber already exists.
pub fn init_tracing(config: &EnvConfig) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
