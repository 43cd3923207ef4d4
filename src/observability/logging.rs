//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Honour `RUST_LOG` over the configured level
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - The library never installs a subscriber itself; only the binary does

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for `log_level`.
pub fn default_directive(log_level: &str) -> String {
    format!("switchyard={level},tower_http={level}", level = log_level.to_ascii_lowercase())
}

/// Install the global subscriber. `RUST_LOG` wins over `log_level` when set.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive(log_level).into());

    if tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_targets_crate_and_http_layer() {
        assert_eq!(default_directive("DEBUG"), "switchyard=debug,tower_http=debug");
    }
}
