// SPDX-License-Identifier: MPL-2.0
//! This module handles the layout engine's configuration, loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[layout]` - Locking, resize debounce, auto-adjust threshold, expand padding
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `SUBTITLE_OVERLAY_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use subtitle_overlay::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Lock the overlay
//! config.layout.locked = Some(true);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Subtitle overlay layout settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// Disables dragging and resizing of the subtitle box and mask frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,

    /// Delay before a burst of window resizes triggers a recompute (ms).
    #[serde(
        default = "default_resize_debounce_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub resize_debounce_ms: Option<u64>,

    /// Minimum change (percentage points) before the mask frame follows the video.
    #[serde(
        default = "default_auto_adjust_threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub auto_adjust_threshold_percent: Option<f64>,

    /// Padding kept inside the video edges by "expand horizontally" (percent).
    #[serde(
        default = "default_expand_padding",
        skip_serializing_if = "Option::is_none"
    )]
    pub expand_padding_percent: Option<f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            locked: Some(DEFAULT_LAYOUT_LOCKED),
            resize_debounce_ms: default_resize_debounce_ms(),
            auto_adjust_threshold_percent: default_auto_adjust_threshold(),
            expand_padding_percent: default_expand_padding(),
        }
    }
}

/// Layout engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Subtitle overlay layout settings.
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl Config {
    /// Resolves the optional settings into bounded values.
    #[must_use]
    pub fn layout_options(&self) -> LayoutOptions {
        let layout = &self.layout;
        LayoutOptions {
            locked: layout.locked.unwrap_or(DEFAULT_LAYOUT_LOCKED),
            resize_debounce: Duration::from_millis(
                layout
                    .resize_debounce_ms
                    .unwrap_or(DEFAULT_RESIZE_DEBOUNCE_MS)
                    .min(MAX_RESIZE_DEBOUNCE_MS),
            ),
            auto_adjust_threshold: bounded(
                layout.auto_adjust_threshold_percent,
                DEFAULT_AUTO_ADJUST_THRESHOLD_PERCENT,
                MIN_AUTO_ADJUST_THRESHOLD_PERCENT,
                MAX_AUTO_ADJUST_THRESHOLD_PERCENT,
            ),
            expand_padding: bounded(
                layout.expand_padding_percent,
                DEFAULT_EXPAND_PADDING_PERCENT,
                0.0,
                MAX_EXPAND_PADDING_PERCENT,
            ),
        }
    }
}

fn bounded(value: Option<f64>, default: f64, min: f64, max: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(min, max),
        _ => default,
    }
}

/// Effective layout options, always within their valid ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub locked: bool,
    pub resize_debounce: Duration,
    pub auto_adjust_threshold: f64,
    pub expand_padding: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Config::default().layout_options()
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_resize_debounce_ms() -> Option<u64> {
    Some(DEFAULT_RESIZE_DEBOUNCE_MS)
}

fn default_auto_adjust_threshold() -> Option<f64> {
    Some(DEFAULT_AUTO_ADJUST_THRESHOLD_PERCENT)
}

fn default_expand_padding() -> Option<f64> {
    Some(DEFAULT_EXPAND_PADDING_PERCENT)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(error) => {
                    log::warn!("Ignoring unreadable config {}: {}", path.display(), error);
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(Error::from)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    match get_config_path_with_override(base_dir) {
        Some(path) => save_to_path(config, &path),
        None => Err(Error::Config(
            "could not determine the config directory".to_string(),
        )),
    }
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
