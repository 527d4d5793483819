// SPDX-License-Identifier: MPL-2.0
//! Interactive state of the subtitle box.
//!
//! Margins are percentages of a reference rectangle: the whole container in
//! normal mode, the mask frame in mask mode. Pointer positions are always in
//! container pixels and are translated into the reference rectangle here.

use super::interaction::{Gesture, Interaction, ResizeStart};
use crate::domain::layout::layout_bounds::FULL;
use crate::domain::layout::{
    clamp_drag_margins, validate_margins, ContainerSize, Corner, LayoutRect, LayoutSettings,
    Margins, PixelRect, Point,
};

/// What the pointer pressed inside the subtitle box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty area of the box (background, line gaps).
    Box,
    /// A clickable word; the press belongs to word lookup.
    WordToken,
}

/// Pixel rectangle the margins of `settings` are relative to.
#[must_use]
pub fn reference_rect(settings: &LayoutSettings, container: ContainerSize) -> PixelRect {
    let frame = if settings.is_mask_mode {
        settings.mask_frame.as_rect()
    } else {
        LayoutRect {
            left: 0.0,
            top: 0.0,
            width: FULL,
            height: FULL,
        }
    };
    frame.to_pixels(container)
}

/// Drag and resize behavior of the subtitle box.
#[derive(Debug, Clone, Default)]
pub struct SubtitleBoxController {
    interaction: Interaction<Margins>,
}

impl SubtitleBoxController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn interaction(&self) -> &Interaction<Margins> {
        &self.interaction
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.interaction.is_active()
    }

    pub fn on_hover_enter(&mut self) -> bool {
        self.interaction.set_hovering(true)
    }

    pub fn on_hover_leave(&mut self) -> bool {
        self.interaction.set_hovering(false)
    }

    /// Starts dragging the box. Returns false when the press is rejected.
    pub fn on_pointer_down(
        &mut self,
        target: PointerTarget,
        settings: &LayoutSettings,
        position: Point,
        container: ContainerSize,
        locked: bool,
    ) -> bool {
        if locked || target == PointerTarget::WordToken {
            return false;
        }
        let reference = reference_rect(settings, container);
        let layout = settings.margins.layout();
        let origin_x = reference.x + layout.left * reference.width / FULL;
        let origin_y = reference.y + layout.top * reference.height / FULL;
        self.interaction
            .begin_drag(Point::new(position.x - origin_x, position.y - origin_y));
        log::debug!("Subtitle box drag started at {:?}", position);
        true
    }

    /// Starts resizing from `corner`. Returns false when the layout is locked.
    pub fn on_pointer_down_resize_handle(
        &mut self,
        corner: Corner,
        settings: &LayoutSettings,
        position: Point,
        locked: bool,
    ) -> bool {
        if locked {
            return false;
        }
        self.interaction
            .begin_resize(corner, validate_margins(settings.margins), position);
        log::debug!("Subtitle box resize started from {:?}", corner);
        true
    }

    /// Applies a pointer move to the active gesture.
    pub fn on_pointer_move(
        &mut self,
        settings: &LayoutSettings,
        position: Point,
        container: ContainerSize,
    ) -> Option<Margins> {
        let reference = reference_rect(settings, container);
        if !(reference.width > 0.0 && reference.height > 0.0) {
            return None;
        }

        match *self.interaction.gesture() {
            Gesture::Idle => None,
            Gesture::Dragging { offset } => {
                Some(drag_box(&settings.margins, position, offset, &reference))
            }
            Gesture::Resizing(start) => Some(resize_box(&start, position, &reference)),
        }
    }

    /// Ends the gesture, returning whether one was active.
    pub fn on_pointer_up(&mut self) -> bool {
        let was_active = self.interaction.finish();
        if was_active {
            log::debug!("Subtitle box gesture finished");
        }
        was_active
    }

    pub fn cancel(&mut self) -> bool {
        self.on_pointer_up()
    }
}

fn drag_box(margins: &Margins, position: Point, offset: Point, reference: &PixelRect) -> Margins {
    let layout = margins.layout();
    let left = (position.x - reference.x - offset.x) / reference.width * FULL;
    let top = (position.y - reference.y - offset.y) / reference.height * FULL;
    clamp_drag_margins(Margins::from_layout(LayoutRect {
        left: left.min(FULL - layout.width).max(0.0),
        top: top.min(FULL - layout.height).max(0.0),
        ..layout
    }))
}

fn resize_box(start: &ResizeStart<Margins>, position: Point, reference: &PixelRect) -> Margins {
    let dx = (position.x - start.pointer_start.x) / reference.width * FULL;
    let dy = (position.y - start.pointer_start.y) / reference.height * FULL;
    let s = start.snapshot;

    let resized = match start.corner {
        // Grows symmetrically around the box center.
        Corner::SouthEast => Margins::new(
            s.left - dx / 2.0,
            s.top - dy / 2.0,
            s.right - dx / 2.0,
            s.bottom - dy / 2.0,
        ),
        Corner::SouthWest => Margins::new(s.left + dx, s.top, s.right, s.bottom - dy),
        Corner::NorthEast => Margins::new(s.left, s.top + dy, s.right - dx, s.bottom),
        Corner::NorthWest => Margins::new(s.left + dx, s.top + dy, s.right, s.bottom),
    };
    validate_margins(resized)
}
