//! Platform-aware path resolution for jamulus-dashboard.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/jamulus-dashboard` or `~/.config/jamulus-dashboard`
//! - State (logs): `$XDG_STATE_HOME/jamulus-dashboard` or `~/.local/state/jamulus-dashboard`
//!
//! On **macOS**, config and state default to `~/Library/Application Support`,
//! with the same XDG env var overrides.

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "jamulus-dashboard";

/// Returns the configuration directory.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/jamulus-dashboard` (if env var set, any platform)
/// 2. Platform default
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_config_dir().join(APP_NAME)
}

/// Returns the path to the main configuration file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the directory for persistent state such as the log file.
pub fn state_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_state_dir().join(APP_NAME)
}

/// Returns the path of the log file.
pub fn log_path() -> PathBuf {
    state_dir().join("jamdash.log")
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Platform-native config base directory (without XDG override).
fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::config_dir().unwrap_or_else(|| home_dir().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".config")
    }
}

/// Platform-native state base directory (without XDG override).
fn platform_state_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        platform_config_dir()
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".local/state")
    }
}

/// Creates a directory and all parent directories with mode 0700.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}
