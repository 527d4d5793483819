// SPDX-License-Identifier: MPL-2.0
//! Iced presentation of the layout engine.
//!
//! - [`overlay`] - Canvas program drawing the subtitle box and mask frame and
//!   publishing layout messages for mouse input
//! - [`theme`] - Overlay colors and sizes

pub mod overlay;
pub mod theme;
