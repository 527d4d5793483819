// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core layout rules with ZERO external dependencies.
//!
//! This module contains pure value objects and geometry rules. It has no
//! dependencies on external crates (except `std`) so the layout math can be
//! tested without a window, a persistence backend or a renderer.
//!
//! # Modules
//!
//! - [`layout`]: Subtitle box and mask frame types
//!   ([`Margins`](layout::Margins), [`MaskFrame`](layout::MaskFrame),
//!   [`LayoutSettings`](layout::LayoutSettings)) and the geometry functions
//!   validating them.

pub mod layout;
