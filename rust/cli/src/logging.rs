//! Process-wide `tracing` subscriber.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Builds the filter: `RUST_LOG` wins over the configured directive, which
/// falls back to `info` when it does not parse.
pub fn filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a fmt subscriber writing to stderr. Safe to call more than once;
/// later calls leave the first subscriber in place.
pub fn init(configured: &str) {
    let result = fmt()
        .with_env_filter(filter(configured))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init("warn");
        init("debug");
    }

    #[test]
    fn bad_directive_falls_back() {
        let f = filter("adaptive_ai=[[[");
        assert!(!f.to_string().is_empty());
    }
}
