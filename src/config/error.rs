//! Configuration error types for loading and parsing TOML config files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or interpreting configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read configuration file: {path}")]
    ReadError {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("Invalid configuration at {path}:{line}:{column}: {message}")]
    ParseError {
        /// Path to the file containing the error.
        path: PathBuf,
        /// One-based line of the error (0 if unknown).
        line: usize,
        /// One-based column of the error (0 if unknown).
        column: usize,
        /// Human-readable description of the parse failure.
        message: String,
    },

    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {path}")]
    NotFound {
        /// Path that was requested but does not exist.
        path: PathBuf,
    },

    /// A duration field holds something `humantime` cannot parse.
    #[error("Invalid duration for {field}: '{value}'")]
    InvalidDuration {
        /// Dotted key of the offending field.
        field: &'static str,
        /// Raw value from the file.
        value: String,
        /// Parser error.
        #[source]
        source: humantime::DurationError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_read_error() {
        let err = ConfigError::ReadError {
            path: PathBuf::from("/etc/app/config.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/app/config.toml"));
        assert!(msg.contains("Failed to read"));
    }

    #[test]
    fn display_parse_error() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("config.toml"),
            line: 5,
            column: 12,
            message: "expected `=`".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("5:12"), "ParseError should include line:column");
        assert!(msg.contains("expected `=`"));
    }

    #[test]
    fn display_invalid_duration() {
        let source = humantime::parse_duration("soon").expect_err("not a duration");
        let err = ConfigError::InvalidDuration {
            field: "stream.reconnect_delay",
            value: "soon".to_string(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("stream.reconnect_delay"));
        assert!(msg.contains("'soon'"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn read_error_source_chain() {
        let err = ConfigError::ReadError {
            path: PathBuf::from("/secret"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
