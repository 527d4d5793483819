// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for the data and config directories.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **Environment variables** (`SUBTITLE_OVERLAY_DATA_DIR`, `SUBTITLE_OVERLAY_CONFIG_DIR`)
//! 3. **Platform default** - via `dirs` crate

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "SubtitleOverlay";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "SUBTITLE_OVERLAY_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "SUBTITLE_OVERLAY_CONFIG_DIR";

/// Returns the data directory holding persisted subtitle layouts.
///
/// - Linux: `~/.local/share/SubtitleOverlay/`
/// - macOS: `~/Library/Application Support/SubtitleOverlay/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\SubtitleOverlay\`
///
/// Returns `None` if the data directory cannot be determined.
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the data directory path with an optional override.
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, ENV_DATA_DIR, dirs::data_dir())
}

/// Returns the config directory holding `settings.toml`.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the config directory path with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, ENV_CONFIG_DIR, dirs::config_dir())
}

fn resolve(
    override_path: Option<PathBuf>,
    env_var: &str,
    platform_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(env_var) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    platform_dir.map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
