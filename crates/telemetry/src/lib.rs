//! nexus-telemetry - tracing setup

use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

/// `RUST_LOG` wins over the configured level
fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// Install the global subscriber, human readable output
pub fn init_tracing(log_level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(build_filter(log_level))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

/// Install the global subscriber, one JSON object per line
pub fn init_tracing_json(log_level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(build_filter(log_level))
        .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails_instead_of_panicking() {
        let _ = init_tracing("info");
        assert!(init_tracing_json("debug").is_err());
    }
}
