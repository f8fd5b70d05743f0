use std::time::Duration;
use tracing::warn;

/// Statistics endpoint polled when no URL override is given
pub const DEFAULT_STATS_URL: &str = "http://srv.msk01.gigacorp.local/_stats";

/// Interval used when `POLL_INTERVAL_MS` is missing or invalid
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Client-level timeout for a single request
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// Environment variable holding the poll interval
pub const POLL_INTERVAL_ENV: &str = "POLL_INTERVAL_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct PollerConfig {
    /// Statistics endpoint URL
    pub url: String,

    /// Delay between the end of one poll cycle and the start of the next
    pub interval: Duration,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_STATS_URL.to_string(),
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl PollerConfig {
    /// Build a config from raw CLI/environment values.
    ///
    /// The interval is taken as raw text so that a bad value degrades to the
    /// default instead of aborting startup.
    pub fn from_parts(url: String, interval_raw: Option<&str>, timeout_secs: u64) -> Self {
        let timeout_secs = if timeout_secs == 0 {
            warn!("Timeout of 0s is not usable, using {}s", DEFAULT_TIMEOUT_SECS);
            DEFAULT_TIMEOUT_SECS
        } else {
            timeout_secs
        };

        Self {
            url,
            interval: parse_interval(interval_raw),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Parse a poll interval in milliseconds.
///
/// Only a positive integer is accepted; anything else yields the default.
pub fn parse_interval(raw: Option<&str>) -> Duration {
    let Some(raw) = raw else {
        return Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);
    };

    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Duration::from_millis(ms),
        _ => {
            if !raw.is_empty() {
                warn!(
                    "Invalid {} value {:?}, using {} ms",
                    POLL_INTERVAL_ENV, raw, DEFAULT_POLL_INTERVAL_MS
                );
            }
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
        }
    }
}
