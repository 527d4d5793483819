// SPDX-License-Identifier: MPL-2.0
//! Layout value objects.
//!
//! Every rectangle in this module is expressed in percentages (0–100) of the
//! container that hosts the video, so the same values survive any window size.

// =============================================================================
// Layout Bounds
// =============================================================================

/// Bounds shared by the subtitle box and the mask frame.
pub mod layout_bounds {
    /// Minimum width of the subtitle box, in percent of its reference frame.
    pub const MIN_TOTAL_WIDTH: f64 = 20.0;
    /// Minimum height of the subtitle box, in percent of its reference frame.
    pub const MIN_TOTAL_HEIGHT: f64 = 10.0;
    /// Maximum value of any single margin.
    pub const MAX_SINGLE_MARGIN: f64 = 80.0;
    /// Minimum width and height of the mask frame.
    pub const MIN_FRAME_SIZE: f64 = 10.0;
    /// Upper bound of every percentage axis.
    pub const FULL: f64 = 100.0;
    /// Aspect ratio assumed until the video metadata is known.
    pub const DEFAULT_VIDEO_ASPECT_RATIO: f64 = 16.0 / 9.0;
}

use layout_bounds::FULL;

// =============================================================================
// Margins
// =============================================================================

/// Distance of the subtitle box from each edge of its reference frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the box these margins leave.
    #[must_use]
    pub fn width(&self) -> f64 {
        FULL - self.left - self.right
    }

    /// Height of the box these margins leave.
    #[must_use]
    pub fn height(&self) -> f64 {
        FULL - self.top - self.bottom
    }

    /// Returns the rectangle described by these margins.
    #[must_use]
    pub fn layout(&self) -> LayoutRect {
        LayoutRect {
            left: self.left,
            top: self.top,
            width: self.width(),
            height: self.height(),
        }
    }

    /// Builds margins from a box position and size.
    #[must_use]
    pub fn from_layout(rect: LayoutRect) -> Self {
        Self {
            left: rect.left,
            top: rect.top,
            right: FULL - rect.left - rect.width,
            bottom: FULL - rect.top - rect.height,
        }
    }
}

impl Default for Margins {
    /// Bottom band, 60% wide, centered horizontally.
    fn default() -> Self {
        Self::new(20.0, 75.0, 20.0, 5.0)
    }
}

// =============================================================================
// LayoutRect
// =============================================================================

/// A positioned rectangle, as consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutRect {
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Converts this rectangle to pixels inside `container`.
    #[must_use]
    pub fn to_pixels(&self, container: ContainerSize) -> PixelRect {
        PixelRect {
            x: self.left * container.width / FULL,
            y: self.top * container.height / FULL,
            width: self.width * container.width / FULL,
            height: self.height * container.height / FULL,
        }
    }
}

// =============================================================================
// MaskFrame
// =============================================================================

/// Region tracking the video's displayed area inside the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskFrame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl MaskFrame {
    /// Frame covering the whole container.
    pub const FULL: Self = Self {
        left: 0.0,
        top: 0.0,
        width: FULL,
        height: FULL,
    };

    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn as_rect(&self) -> LayoutRect {
        LayoutRect {
            left: self.left,
            top: self.top,
            width: self.width,
            height: self.height,
        }
    }

    /// Largest absolute difference between the four values of two frames.
    #[must_use]
    pub fn max_difference(&self, other: &MaskFrame) -> f64 {
        (self.left - other.left)
            .abs()
            .max((self.top - other.top).abs())
            .max((self.width - other.width).abs())
            .max((self.height - other.height).abs())
    }
}

impl Default for MaskFrame {
    fn default() -> Self {
        Self::FULL
    }
}

// =============================================================================
// BackgroundType
// =============================================================================

/// Background drawn behind the subtitle text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackgroundType {
    #[default]
    Transparent,
    Blur,
    SolidDark,
    SolidLight,
}

impl BackgroundType {
    /// All variants, in cycling order.
    pub const ALL: [BackgroundType; 4] = [
        BackgroundType::Transparent,
        BackgroundType::Blur,
        BackgroundType::SolidDark,
        BackgroundType::SolidLight,
    ];

    /// Returns the next background in the cycle.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            BackgroundType::Transparent => BackgroundType::Blur,
            BackgroundType::Blur => BackgroundType::SolidDark,
            BackgroundType::SolidDark => BackgroundType::SolidLight,
            BackgroundType::SolidLight => BackgroundType::Transparent,
        }
    }
}

// =============================================================================
// LayoutSettings
// =============================================================================

/// Everything remembered about the overlay of one video.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutSettings {
    pub margins: Margins,
    pub background_type: BackgroundType,
    pub is_mask_mode: bool,
    pub mask_frame: MaskFrame,
}

// =============================================================================
// Pointer geometry
// =============================================================================

/// Corner carrying a resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Top-left.
    NorthWest,
    /// Top-right.
    NorthEast,
    /// Bottom-left.
    SouthWest,
    /// Bottom-right.
    SouthEast,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::NorthWest,
        Corner::NorthEast,
        Corner::SouthWest,
        Corner::SouthEast,
    ];

    /// Returns true for the two corners on the left edge.
    #[must_use]
    pub fn is_west(self) -> bool {
        matches!(self, Corner::NorthWest | Corner::SouthWest)
    }

    /// Returns true for the two corners on the top edge.
    #[must_use]
    pub fn is_north(self) -> bool {
        matches!(self, Corner::NorthWest | Corner::NorthEast)
    }
}

/// Pointer position in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel size of the element hosting the video.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns true when both dimensions can be divided by.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// A rectangle in container pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}
