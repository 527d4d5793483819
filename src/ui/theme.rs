// SPDX-License-Identifier: MPL-2.0
//! Colors and sizes of the layout overlay.

use crate::domain::layout::BackgroundType;
use iced::Color;

const WHITE: Color = Color::WHITE;
const BLACK: Color = Color::BLACK;
const ACCENT: Color = Color::from_rgb(0.26, 0.62, 0.96);

mod opacity {
    pub const SUBTLE: f32 = 0.25;
    pub const MEDIUM: f32 = 0.5;
    pub const STRONG: f32 = 0.8;
}

pub mod sizing {
    /// Side length of a corner handle, in logical pixels.
    pub const HANDLE_SIZE: f32 = 12.0;
    pub const OUTLINE_WIDTH: f32 = 2.0;
    pub const HANDLE_BORDER_WIDTH: f32 = 1.0;
}

/// Fill drawn behind the subtitle text, if any.
#[must_use]
pub fn subtitle_background_color(background: BackgroundType) -> Option<Color> {
    match background {
        BackgroundType::Transparent => None,
        // Blur itself is applied by the host renderer; the tint marks the area.
        BackgroundType::Blur => Some(Color {
            a: opacity::SUBTLE,
            ..WHITE
        }),
        BackgroundType::SolidDark => Some(Color {
            a: opacity::STRONG,
            ..BLACK
        }),
        BackgroundType::SolidLight => Some(Color {
            a: opacity::STRONG,
            ..WHITE
        }),
    }
}

/// Outline of the subtitle box while hovered or manipulated.
#[must_use]
pub fn box_outline_color(active: bool) -> Color {
    if active {
        ACCENT
    } else {
        Color {
            a: opacity::MEDIUM,
            ..WHITE
        }
    }
}

/// Outline of the mask frame.
#[must_use]
pub fn frame_outline_color(active: bool) -> Color {
    Color {
        a: if active { 1.0 } else { opacity::MEDIUM },
        ..ACCENT
    }
}

/// Dimmed area outside the mask frame.
#[must_use]
pub fn frame_outside_color() -> Color {
    Color {
        a: opacity::SUBTLE,
        ..BLACK
    }
}

#[must_use]
pub fn handle_color() -> Color {
    WHITE
}

#[must_use]
pub fn handle_border_color() -> Color {
    BLACK
}
