//! Tracing setup for processes that embed the fee services

use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

/// Install a global fmt subscriber.
///
/// Meant for the binary that embeds the fee services, called once at startup.
/// `RUST_LOG` wins when set; otherwise `default_directive` (for example
/// `"services=info"`) is used.
pub fn init_tracing(default_directive: &str) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        // Only one global subscriber may exist per process
        let _ = init_tracing("utils=debug");
        assert!(init_tracing("utils=debug").is_err());
    }
}
