// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used by the layout engine. Geometry bounds that are part of the layout
//! rules themselves live in [`crate::domain::layout::layout_bounds`].
//!
//! # Categories
//!
//! - **Interaction**: layout locking
//! - **Window Resize**: debounce delay and auto-adjust threshold
//! - **Actions**: padding used by "expand horizontally"

// ==========================================================================
// Interaction Defaults
// ==========================================================================

/// Whether the overlay starts locked (drag and resize disabled).
pub const DEFAULT_LAYOUT_LOCKED: bool = false;

// ==========================================================================
// Window Resize Defaults
// ==========================================================================

/// Delay collapsing a burst of window resize events into one recompute (ms).
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 100;

/// Maximum accepted debounce delay (ms).
pub const MAX_RESIZE_DEBOUNCE_MS: u64 = 2_000;

/// Percentage points a recomputed mask frame must differ by before it
/// replaces the current one.
pub const DEFAULT_AUTO_ADJUST_THRESHOLD_PERCENT: f64 = 2.0;

/// Minimum accepted auto-adjust threshold.
pub const MIN_AUTO_ADJUST_THRESHOLD_PERCENT: f64 = 0.1;

/// Maximum accepted auto-adjust threshold.
pub const MAX_AUTO_ADJUST_THRESHOLD_PERCENT: f64 = 25.0;

// ==========================================================================
// Action Defaults
// ==========================================================================

/// Padding added inside the video edges by "expand horizontally" (percent).
pub const DEFAULT_EXPAND_PADDING_PERCENT: f64 = 2.0;

/// Maximum accepted expand padding (percent).
pub const MAX_EXPAND_PADDING_PERCENT: f64 = 20.0;
