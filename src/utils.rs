// System
use std::fmt::Display;

// Third Party
use chrono::{DateTime, TimeZone};
use tracing_subscriber::EnvFilter;

/// Wall-clock format used in pod event log lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The log filter from `RUST_LOG`, or `default_filter` when it is unset or invalid.
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install the global fmt subscriber, writing to stderr.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(std::io::stderr)
        .init();
}

pub fn format_timestamp<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format(TIMESTAMP_FORMAT).to_string()
}
