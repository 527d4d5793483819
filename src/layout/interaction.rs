// SPDX-License-Identifier: MPL-2.0
//! Pointer gesture state shared by the subtitle box and mask frame controllers.
//!
//! A controller is either idle, dragging, or resizing from one corner; the
//! resize variant carries a snapshot of the geometry taken at pointer-down so
//! every move is computed from the gesture start, never from the previous move.

use crate::domain::layout::{Corner, Point};

/// Geometry captured when a resize gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStart<S> {
    /// Handle being dragged.
    pub corner: Corner,
    /// Geometry before the first move.
    pub snapshot: S,
    /// Pointer position at pointer-down, in container pixels.
    pub pointer_start: Point,
}

/// Current pointer gesture of one controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture<S> {
    /// No active gesture
    Idle,
    /// Moving the whole region
    Dragging {
        /// Pointer position minus the region's top-left corner, in pixels.
        offset: Point,
    },
    /// Dragging a corner handle
    Resizing(ResizeStart<S>),
}

/// Hover flag plus gesture state of one controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction<S> {
    hovering: bool,
    gesture: Gesture<S>,
}

impl<S> Default for Interaction<S> {
    fn default() -> Self {
        Self {
            hovering: false,
            gesture: Gesture::Idle,
        }
    }
}

impl<S> Interaction<S> {
    #[must_use]
    pub fn gesture(&self) -> &Gesture<S> {
        &self.gesture
    }

    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    #[must_use]
    pub fn is_resizing(&self) -> bool {
        matches!(self.gesture, Gesture::Resizing(_))
    }

    /// Returns true while a drag or resize owns the pointer.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// Updates the hover flag, returning whether it changed.
    pub fn set_hovering(&mut self, hovering: bool) -> bool {
        let changed = self.hovering != hovering;
        self.hovering = hovering;
        changed
    }

    pub fn begin_drag(&mut self, offset: Point) {
        self.gesture = Gesture::Dragging { offset };
    }

    pub fn begin_resize(&mut self, corner: Corner, snapshot: S, pointer_start: Point) {
        self.gesture = Gesture::Resizing(ResizeStart {
            corner,
            snapshot,
            pointer_start,
        });
    }

    /// Ends the current gesture, returning whether one was active.
    pub fn finish(&mut self) -> bool {
        let was_active = self.is_active();
        self.gesture = Gesture::Idle;
        was_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layout::MaskFrame;

    #[test]
    fn default_interaction_is_idle() {
        let interaction = Interaction::<MaskFrame>::default();
        assert!(!interaction.is_active());
        assert!(!interaction.is_hovering());
        assert_eq!(*interaction.gesture(), Gesture::Idle);
    }

    #[test]
    fn drag_and_resize_are_mutually_exclusive() {
        let mut interaction = Interaction::default();
        interaction.begin_drag(Point::new(4.0, 2.0));
        assert!(interaction.is_dragging() && !interaction.is_resizing());

        interaction.begin_resize(Corner::SouthEast, MaskFrame::FULL, Point::new(1.0, 1.0));
        assert!(interaction.is_resizing() && !interaction.is_dragging());
    }

    #[test]
    fn finish_reports_whether_a_gesture_was_active() {
        let mut interaction = Interaction::<MaskFrame>::default();
        assert!(!interaction.finish());

        interaction.begin_drag(Point::default());
        assert!(interaction.finish());
        assert!(!interaction.is_active());
    }

    #[test]
    fn hover_change_is_reported_once() {
        let mut interaction = Interaction::<MaskFrame>::default();
        assert!(interaction.set_hovering(true));
        assert!(!interaction.set_hovering(true));
        assert!(interaction.set_hovering(false));
    }
}
