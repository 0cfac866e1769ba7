//! TOML configuration schema for the dashboard.
//!
//! All structs derive `Deserialize` with defaults via `#[serde(default)]`, so
//! any subset of keys is a valid file.
//!
//! Duration fields use human-readable strings (e.g. `"1s"`, `"500ms"`)
//! parsed by the `humantime` crate through the accessor methods.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::error::ConfigError;

/// Root configuration.
///
/// ```toml
/// [display]
/// [stream]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Table appearance.
    pub display: DisplayConfig,
    /// Event feed location and reconnection.
    pub stream: StreamConfig,
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Table appearance.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Text drawn in the title position. Only the first 17 characters fit
    /// before the clock.
    pub title: String,
    /// Interval of the clock-only repaint. `"0s"` disables it.
    pub clock_refresh: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Jamulus stream".to_string(),
            clock_refresh: "1s".to_string(),
        }
    }
}

impl DisplayConfig {
    /// Parsed clock refresh interval; `None` when disabled.
    pub fn clock_refresh(&self) -> Result<Option<Duration>, ConfigError> {
        let interval = parse_duration("display.clock_refresh", &self.clock_refresh)?;
        Ok((!interval.is_zero()).then_some(interval))
    }
}

// ---------------------------------------------------------------------------
// Stream
// ---------------------------------------------------------------------------

/// Event feed settings. The endpoint is `<scheme>://<host><path>`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StreamConfig {
    /// URL scheme.
    pub scheme: String,
    /// Path appended to the host.
    pub path: String,
    /// Delay before reconnecting after the feed drops.
    pub reconnect_delay: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            path: "/events".to_string(),
            reconnect_delay: "3s".to_string(),
        }
    }
}

impl StreamConfig {
    /// Parsed reconnect delay.
    pub fn reconnect_delay(&self) -> Result<Duration, ConfigError> {
        parse_duration("stream.reconnect_delay", &self.reconnect_delay)
    }

    /// Full endpoint URL for `host`.
    pub fn endpoint(&self, host: &str) -> String {
        format!("{}://{}{}", self.scheme, host, self.path)
    }
}

fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value).map_err(|source| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
        source,
    })
}
