// SPDX-License-Identifier: MPL-2.0
//! Pure layout geometry.
//!
//! Every function here is total: out-of-range or non-finite numbers are
//! clamped to the nearest valid geometry instead of being rejected. Persisted
//! values pass through these functions on load, so a corrupted record can only
//! ever snap, never crash the overlay.

use super::types::layout_bounds::{
    DEFAULT_VIDEO_ASPECT_RATIO, FULL, MAX_SINGLE_MARGIN, MIN_FRAME_SIZE, MIN_TOTAL_HEIGHT,
    MIN_TOTAL_WIDTH,
};
use super::types::{ContainerSize, LayoutRect, Margins, MaskFrame};

/// Number of steps per percent kept after rounding (3 decimals).
const PRECISION: f64 = 1000.0;

/// Slack accepted when comparing sums of rounded values.
const TOLERANCE: f64 = 1e-9;

/// Rounds to 3 decimals so repeated drag updates do not accumulate drift.
#[must_use]
pub fn round3(value: f64) -> f64 {
    let scaled = value * PRECISION;
    if scaled.is_finite() {
        scaled.round() / PRECISION
    } else {
        value
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

// =============================================================================
// Video display rectangle
// =============================================================================

/// Computes where a video of `video_aspect_ratio` is shown inside `container`
/// when scaled to fit entirely (letterboxed or pillarboxed), centered on the
/// axis with leftover space.
#[must_use]
pub fn compute_video_display_rect(video_aspect_ratio: f64, container: ContainerSize) -> MaskFrame {
    if !container.is_usable() {
        return MaskFrame::FULL;
    }

    let aspect = if video_aspect_ratio.is_finite() && video_aspect_ratio > 0.0 {
        video_aspect_ratio
    } else {
        DEFAULT_VIDEO_ASPECT_RATIO
    };

    let (display_width, display_height, offset_x, offset_y) =
        if aspect > container.aspect_ratio() {
            // Video is wider - fit to width
            let display_height = container.width / aspect;
            let offset_y = (container.height - display_height) / 2.0;
            (container.width, display_height, 0.0, offset_y)
        } else {
            // Video is taller - fit to height
            let display_width = container.height * aspect;
            let offset_x = (container.width - display_width) / 2.0;
            (display_width, container.height, offset_x, 0.0)
        };

    validate_mask_frame(MaskFrame {
        left: (offset_x / container.width * FULL).clamp(0.0, FULL),
        top: (offset_y / container.height * FULL).clamp(0.0, FULL),
        width: (display_width / container.width * FULL).clamp(MIN_FRAME_SIZE, FULL),
        height: (display_height / container.height * FULL).clamp(MIN_FRAME_SIZE, FULL),
    })
}

// =============================================================================
// Margin validation
// =============================================================================

/// Normalizes margins so the subtitle box keeps its minimum size.
///
/// Order: negatives to zero, rounding, minimum total width/height (shrinking
/// the pair proportionally), then the per-margin cap. The cap runs last
/// because it can only grow the box.
#[must_use]
pub fn validate_margins(margins: Margins) -> Margins {
    let mut left = round3(non_negative(margins.left));
    let mut top = round3(non_negative(margins.top));
    let mut right = round3(non_negative(margins.right));
    let mut bottom = round3(non_negative(margins.bottom));

    (left, right) = fit_pair(left, right, FULL - MIN_TOTAL_WIDTH);
    (top, bottom) = fit_pair(top, bottom, FULL - MIN_TOTAL_HEIGHT);

    Margins {
        left: left.min(MAX_SINGLE_MARGIN),
        top: top.min(MAX_SINGLE_MARGIN),
        right: right.min(MAX_SINGLE_MARGIN),
        bottom: bottom.min(MAX_SINGLE_MARGIN),
    }
}

/// Margin normalization for drags: caps each margin but never rebalances,
/// so the box keeps its exact size while it moves.
#[must_use]
pub fn clamp_drag_margins(margins: Margins) -> Margins {
    let clamp = |value: f64| round3(non_negative(value)).min(MAX_SINGLE_MARGIN);
    Margins {
        left: clamp(margins.left),
        top: clamp(margins.top),
        right: clamp(margins.right),
        bottom: clamp(margins.bottom),
    }
}

/// Shrinks two opposite margins so their sum does not exceed `allowed`,
/// keeping their ratio.
fn fit_pair(first: f64, second: f64, allowed: f64) -> (f64, f64) {
    let total = first + second;
    if total <= allowed + TOLERANCE {
        return (first, second);
    }
    let first = round3(first / total * allowed);
    (first, round3(allowed - first))
}

// =============================================================================
// Mask frame validation
// =============================================================================

/// Normalizes a mask frame so it is at least 10% on each axis and lies
/// fully inside the container.
///
/// When the frame overflows, its position gives way first; only a frame
/// larger than the container is shrunk.
#[must_use]
pub fn validate_mask_frame(frame: MaskFrame) -> MaskFrame {
    let (left, width) = fit_axis(frame.left, frame.width);
    let (top, height) = fit_axis(frame.top, frame.height);
    MaskFrame {
        left,
        top,
        width,
        height,
    }
}

fn fit_axis(position: f64, size: f64) -> (f64, f64) {
    let size = round3(size.max(MIN_FRAME_SIZE));
    if size > FULL {
        return (0.0, FULL);
    }
    let position = round3(position.max(0.0));
    if position + size > FULL + TOLERANCE {
        (round3(FULL - size), size)
    } else {
        (position, size)
    }
}

/// Rescales a frame uniformly by the smaller of the two axis factors, then
/// pulls it back inside the container.
#[must_use]
pub fn scale_frame_to_container(frame: MaskFrame, scale_x: f64, scale_y: f64) -> MaskFrame {
    let frame = validate_mask_frame(frame);
    let factor = scale_x.min(scale_y);
    if !factor.is_finite() || factor <= 0.0 {
        return frame;
    }

    let width = (frame.width * factor).clamp(MIN_FRAME_SIZE, FULL);
    let height = (frame.height * factor).clamp(MIN_FRAME_SIZE, FULL);
    validate_mask_frame(MaskFrame {
        left: (frame.left * factor).clamp(0.0, FULL - width),
        top: (frame.top * factor).clamp(0.0, FULL - height),
        width,
        height,
    })
}

// =============================================================================
// Nested percentage frames
// =============================================================================

/// Maps a rectangle expressed in percent of `frame` to percent of the container.
#[must_use]
pub fn nest_in_frame(inner: LayoutRect, frame: &MaskFrame) -> LayoutRect {
    LayoutRect {
        left: frame.left + inner.left * frame.width / FULL,
        top: frame.top + inner.top * frame.height / FULL,
        width: inner.width * frame.width / FULL,
        height: inner.height * frame.height / FULL,
    }
}

/// Inverse of [`nest_in_frame`]: maps a container rectangle into percent of `frame`.
#[must_use]
pub fn unnest_from_frame(outer: LayoutRect, frame: &MaskFrame) -> LayoutRect {
    let frame_width = frame.width.max(MIN_FRAME_SIZE);
    let frame_height = frame.height.max(MIN_FRAME_SIZE);
    LayoutRect {
        left: (outer.left - frame.left) * FULL / frame_width,
        top: (outer.top - frame.top) * FULL / frame_height,
        width: outer.width * FULL / frame_width,
        height: outer.height * FULL / frame_height,
    }
}
