//! Logging initialization for the dashboard.
//!
//! The dashboard owns the terminal, so log output never goes to stdout or
//! stderr. When `JAMDASH_LOG` is set, a `tracing` subscriber appends to a
//! log file in the state directory; otherwise no subscriber is installed.
//!
//! # Usage
//!
//! ```bash
//! # Debug level, written to ~/.local/state/jamulus-dashboard/jamdash.log
//! JAMDASH_LOG=debug jamdash jamulus.example.org
//!
//! # Module-specific filtering
//! JAMDASH_LOG=jamulus_dashboard::stream=debug,warn jamdash jamulus.example.org
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::xdg;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "JAMDASH_LOG";

/// Initialize the tracing subscriber if `JAMDASH_LOG` is set.
///
/// Invalid directives fall back to `info`. Returns the log file path when a
/// subscriber was installed.
pub fn init() -> std::io::Result<Option<PathBuf>> {
    let Ok(directives) = std::env::var(LOG_ENV) else {
        return Ok(None);
    };
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));

    let path = xdg::log_path();
    if let Some(dir) = path.parent() {
        xdg::ensure_dir(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::AlreadyExists, e))?;

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::EnvFilter;

    #[test]
    fn env_filter_parses_valid_directives() {
        for d in ["info", "debug", "warn", "error", "trace"] {
            assert!(EnvFilter::try_new(d).is_ok(), "failed to parse directive: {d}");
        }
    }

    #[test]
    fn env_filter_parses_module_directive() {
        assert!(EnvFilter::try_new("jamulus_dashboard::stream=debug,warn").is_ok());
    }
}
