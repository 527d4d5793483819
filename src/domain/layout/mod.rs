// SPDX-License-Identifier: MPL-2.0
//! Subtitle overlay layout domain.
//!
//! - [`types`]: value objects ([`Margins`], [`MaskFrame`], [`LayoutSettings`], ...)
//! - [`geometry`]: total functions validating and transforming those values

pub mod geometry;
pub mod types;

pub use geometry::{
    clamp_drag_margins, compute_video_display_rect, nest_in_frame, scale_frame_to_container,
    unnest_from_frame, validate_margins, validate_mask_frame,
};
pub use types::{
    layout_bounds, BackgroundType, ContainerSize, Corner, LayoutRect, LayoutSettings, Margins,
    MaskFrame, PixelRect, Point,
};
