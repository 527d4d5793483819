// SPDX-License-Identifier: MPL-2.0
//! Messages accepted by the layout orchestrator and the events it returns.

use super::subtitle_box::PointerTarget;
use crate::domain::layout::{ContainerSize, Corner, Point};
use std::time::Instant;

/// Input to [`super::LayoutOrchestrator::update`].
///
/// Pointer positions are in container pixels; `container` is the pixel size
/// of the element hosting the video when the event happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    BoxPointerDown {
        target: PointerTarget,
        position: Point,
        container: ContainerSize,
    },
    BoxResizeHandleDown {
        corner: Corner,
        position: Point,
        container: ContainerSize,
    },
    BoxHovered(bool),
    FramePointerDown {
        position: Point,
        container: ContainerSize,
    },
    FrameResizeHandleDown {
        corner: Corner,
        position: Point,
        container: ContainerSize,
    },
    FrameHovered(bool),
    PointerMoved {
        position: Point,
        container: ContainerSize,
    },
    PointerReleased,
    /// The pointer stream was interrupted (focus loss, capture lost).
    PointerCancelled,
    /// The overlay is going away; any gesture must end now.
    Teardown,
    WindowResized {
        size: ContainerSize,
        at: Instant,
    },
    /// Drives the resize debouncer.
    Tick(Instant),
    VideoAspectRatioChanged {
        ratio: f64,
        container: ContainerSize,
    },
    LayoutLockChanged(bool),
    ToggleMaskMode {
        container: ContainerSize,
    },
    ToggleBackground,
    Reset {
        container: ContainerSize,
    },
    ResetMaskFrame {
        container: ContainerSize,
    },
    ExpandHorizontally {
        container: ContainerSize,
    },
}

/// What the host should do after a message was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Event {
    /// Nothing visible changed.
    #[default]
    None,
    /// Geometry or styling changed; redraw.
    LayoutChanged,
    /// A gesture ended and its final state was persisted; redraw.
    Committed,
}

impl Event {
    /// Returns true when the overlay must be redrawn.
    #[must_use]
    pub fn needs_redraw(self) -> bool {
        !matches!(self, Event::None)
    }
}
