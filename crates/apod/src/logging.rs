//! Tracing bootstrap for the command line.

use std::env;
use std::io;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,apod=info,apod_fetch=info";

/// Install the global subscriber, writing to stderr.
///
/// Precedence:
/// 1) `RUST_LOG`
/// 2) `APOD_LOG`
/// 3) internal default filter
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_target(true)
        .with_writer(io::stderr)
        .with_env_filter(filter_from_env())
        .try_init();
}

fn filter_from_env() -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if let Some(value) = env::var("APOD_LOG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        && let Ok(filter) = EnvFilter::try_new(value)
    {
        return filter;
    }

    EnvFilter::new(DEFAULT_FILTER)
}
