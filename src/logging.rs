//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with values printed on stdout.
//! The filter is taken from `FIELDSEAL_LOG` if set, otherwise from the
//! CLI flag or config value passed in.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides every other log filter.
pub const LOG_ENV: &str = "FIELDSEAL_LOG";

/// Build the filter: `FIELDSEAL_LOG`, then `fallback`, then "warn".
pub fn build_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Calling this twice is a no-op.
pub fn init(fallback: &str) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(fallback))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
