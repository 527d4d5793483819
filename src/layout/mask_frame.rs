// SPDX-License-Identifier: MPL-2.0
//! Interactive state of the mask frame.
//!
//! The controller never owns the frame: callers pass the current value from
//! the store and write back whatever the controller returns.

use super::debounce::ResizeDebouncer;
use super::interaction::{Gesture, Interaction, ResizeStart};
use crate::config::LayoutOptions;
use crate::domain::layout::layout_bounds::{FULL, MIN_FRAME_SIZE};
use crate::domain::layout::{
    compute_video_display_rect, scale_frame_to_container, validate_mask_frame, ContainerSize,
    Corner, MaskFrame, Point,
};
use std::time::Instant;

/// Frames closer than this are treated as identical after a rescale.
const RESCALE_EPSILON: f64 = 1e-6;

/// Drag, resize and window-resize behavior of the mask frame.
#[derive(Debug, Clone)]
pub struct MaskFrameController {
    interaction: Interaction<MaskFrame>,
    has_user_interacted: bool,
    debouncer: ResizeDebouncer,
    threshold: f64,
    last_container: Option<ContainerSize>,
}

impl MaskFrameController {
    #[must_use]
    pub fn new(options: &LayoutOptions) -> Self {
        Self {
            interaction: Interaction::default(),
            has_user_interacted: false,
            debouncer: ResizeDebouncer::new(options.resize_debounce),
            threshold: options.auto_adjust_threshold,
            last_container: None,
        }
    }

    #[must_use]
    pub fn interaction(&self) -> &Interaction<MaskFrame> {
        &self.interaction
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.interaction.is_active()
    }

    /// Returns true once the user dragged or resized the frame.
    #[must_use]
    pub fn has_user_interacted(&self) -> bool {
        self.has_user_interacted
    }

    pub fn on_hover_enter(&mut self) -> bool {
        self.interaction.set_hovering(true)
    }

    pub fn on_hover_leave(&mut self) -> bool {
        self.interaction.set_hovering(false)
    }

    /// Starts dragging the whole frame.
    pub fn on_pointer_down_frame(
        &mut self,
        frame: &MaskFrame,
        position: Point,
        container: ContainerSize,
    ) {
        let origin = frame.as_rect().to_pixels(container);
        self.interaction
            .begin_drag(Point::new(position.x - origin.x, position.y - origin.y));
        self.last_container = Some(container);
        log::debug!("Mask frame drag started at {:?}", position);
    }

    /// Starts resizing from `corner`.
    pub fn on_pointer_down_resize_handle(
        &mut self,
        corner: Corner,
        frame: &MaskFrame,
        position: Point,
        container: ContainerSize,
    ) {
        self.interaction
            .begin_resize(corner, validate_mask_frame(*frame), position);
        self.last_container = Some(container);
        log::debug!("Mask frame resize started from {:?}", corner);
    }

    /// Applies a pointer move to the active gesture.
    ///
    /// Returns the new frame, or `None` when no gesture is active.
    pub fn on_pointer_move(
        &mut self,
        frame: &MaskFrame,
        position: Point,
        container: ContainerSize,
    ) -> Option<MaskFrame> {
        if !container.is_usable() {
            return None;
        }

        let moved = match *self.interaction.gesture() {
            Gesture::Idle => return None,
            Gesture::Dragging { offset } => drag_frame(frame, position, offset, container),
            Gesture::Resizing(start) => resize_frame(&start, position, container),
        };
        self.has_user_interacted = true;
        Some(moved)
    }

    /// Ends the gesture, returning whether one was active.
    pub fn on_pointer_up(&mut self) -> bool {
        let was_active = self.interaction.finish();
        if was_active {
            log::debug!("Mask frame gesture finished");
        }
        was_active
    }

    /// Ends the gesture after a cancelled pointer stream.
    pub fn cancel(&mut self) -> bool {
        self.on_pointer_up()
    }

    /// Resumes automatic fitting on window resize.
    pub fn reset_interaction(&mut self) {
        self.has_user_interacted = false;
    }

    /// Records the container size without triggering an adjustment.
    pub fn observe_container(&mut self, container: ContainerSize) {
        if container.is_usable() {
            self.last_container = Some(container);
        }
    }

    /// Queues a window resize; [`Self::poll_resize`] applies it once the burst ends.
    pub fn on_window_resize(&mut self, container: ContainerSize, at: Instant) {
        if container.is_usable() {
            self.debouncer.push(container, at);
        }
    }

    /// Returns true while a queued window resize has not been applied yet.
    #[must_use]
    pub fn resize_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Applies a settled window resize to `frame`.
    ///
    /// An untouched frame is refitted to the video when it drifted more than
    /// the threshold; a user-adjusted frame is rescaled by the change of the
    /// video's display area. Resizes arriving mid-gesture wait for it to end.
    pub fn poll_resize(
        &mut self,
        frame: &MaskFrame,
        video_aspect_ratio: f64,
        now: Instant,
    ) -> Option<MaskFrame> {
        let container = self.debouncer.poll(now)?;
        if self.interaction.is_active() {
            self.debouncer.push(container, now);
            return None;
        }
        let previous = self.last_container.replace(container);

        if !self.has_user_interacted {
            let ideal = compute_video_display_rect(video_aspect_ratio, container);
            if ideal.max_difference(frame) > self.threshold {
                log::debug!("Refitting mask frame to {:?}", ideal);
                return Some(ideal);
            }
            return None;
        }

        let previous = previous.filter(ContainerSize::is_usable)?;
        let before = compute_video_display_rect(video_aspect_ratio, previous);
        let after = compute_video_display_rect(video_aspect_ratio, container);
        let scaled = scale_frame_to_container(
            *frame,
            after.width / before.width,
            after.height / before.height,
        );
        (scaled.max_difference(frame) > RESCALE_EPSILON).then_some(scaled)
    }
}

fn drag_frame(
    frame: &MaskFrame,
    position: Point,
    offset: Point,
    container: ContainerSize,
) -> MaskFrame {
    let left = (position.x - offset.x) / container.width * FULL;
    let top = (position.y - offset.y) / container.height * FULL;
    validate_mask_frame(MaskFrame {
        left: left.min(FULL - frame.width).max(0.0),
        top: top.min(FULL - frame.height).max(0.0),
        ..*frame
    })
}

fn resize_frame(
    start: &ResizeStart<MaskFrame>,
    position: Point,
    container: ContainerSize,
) -> MaskFrame {
    let snapshot = start.snapshot;
    let dx = (position.x - start.pointer_start.x) / container.width * FULL;
    let dy = (position.y - start.pointer_start.y) / container.height * FULL;

    let (left, width) = if start.corner.is_west() {
        let right = snapshot.left + snapshot.width;
        let left = (snapshot.left + dx).min(right - MIN_FRAME_SIZE).max(0.0);
        (left, right - left)
    } else {
        let width = (snapshot.width + dx)
            .min(FULL - snapshot.left)
            .max(MIN_FRAME_SIZE);
        (snapshot.left, width)
    };

    let (top, height) = if start.corner.is_north() {
        let bottom = snapshot.top + snapshot.height;
        let top = (snapshot.top + dy).min(bottom - MIN_FRAME_SIZE).max(0.0);
        (top, bottom - top)
    } else {
        let height = (snapshot.height + dy)
            .min(FULL - snapshot.top)
            .max(MIN_FRAME_SIZE);
        (snapshot.top, height)
    };

    validate_mask_frame(MaskFrame {
        left,
        top,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const EPS: f64 = 1e-6;

    fn container() -> ContainerSize {
        ContainerSize::new(1000.0, 500.0)
    }

    fn controller() -> MaskFrameController {
        MaskFrameController::new(&LayoutOptions::default())
    }

    fn frame() -> MaskFrame {
        MaskFrame::new(20.0, 20.0, 50.0, 50.0)
    }

    fn resize(corner: Corner, dx: f64, dy: f64) -> MaskFrame {
        let mut controller = controller();
        let start = Point::new(500.0, 250.0);
        controller.on_pointer_down_resize_handle(corner, &frame(), start, container());
        controller
            .on_pointer_move(&frame(), Point::new(start.x + dx, start.y + dy), container())
            .expect("resizing")
    }

    #[test]
    fn move_without_gesture_is_ignored() {
        let mut controller = controller();
        assert_eq!(
            controller.on_pointer_move(&frame(), Point::new(10.0, 10.0), container()),
            None
        );
        assert!(!controller.has_user_interacted());
    }

    #[test]
    fn drag_keeps_pointer_offset() {
        let mut controller = controller();
        // Frame top-left is at (200, 100) px.
        controller.on_pointer_down_frame(&frame(), Point::new(250.0, 150.0), container());
        let moved = controller
            .on_pointer_move(&frame(), Point::new(350.0, 200.0), container())
            .expect("dragging");

        assert_eq!(moved, MaskFrame::new(30.0, 30.0, 50.0, 50.0));
        assert!(controller.has_user_interacted());
    }

    #[test]
    fn drag_is_clamped_inside_container() {
        let mut controller = controller();
        controller.on_pointer_down_frame(&frame(), Point::new(200.0, 100.0), container());

        let far = controller
            .on_pointer_move(&frame(), Point::new(5000.0, 5000.0), container())
            .expect("dragging");
        assert_eq!(far, MaskFrame::new(50.0, 50.0, 50.0, 50.0));

        let negative = controller
            .on_pointer_move(&frame(), Point::new(-5000.0, -5000.0), container())
            .expect("dragging");
        assert_eq!(negative, MaskFrame::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn south_east_resize_grows_size_only() {
        // 100 px = 10% horizontally, 50 px = 10% vertically.
        let resized = resize(Corner::SouthEast, 100.0, 50.0);
        assert_eq!(resized, MaskFrame::new(20.0, 20.0, 60.0, 60.0));

        let capped = resize(Corner::SouthEast, 5000.0, 5000.0);
        assert_eq!(capped, MaskFrame::new(20.0, 20.0, 80.0, 80.0));

        let floored = resize(Corner::SouthEast, -5000.0, -5000.0);
        assert_eq!(floored, MaskFrame::new(20.0, 20.0, 10.0, 10.0));
    }

    #[test]
    fn south_west_resize_moves_left_edge() {
        let resized = resize(Corner::SouthWest, 100.0, 50.0);
        assert_eq!(resized, MaskFrame::new(30.0, 20.0, 40.0, 60.0));

        let limited = resize(Corner::SouthWest, 5000.0, 0.0);
        assert!((limited.left - 60.0).abs() < EPS);
        assert!((limited.width - MIN_FRAME_SIZE).abs() < EPS);
    }

    #[test]
    fn north_east_resize_moves_top_edge() {
        let resized = resize(Corner::NorthEast, 100.0, -50.0);
        assert_eq!(resized, MaskFrame::new(20.0, 10.0, 60.0, 60.0));

        let limited = resize(Corner::NorthEast, 0.0, -5000.0);
        assert_eq!(limited, MaskFrame::new(20.0, 0.0, 50.0, 70.0));
    }

    #[test]
    fn north_west_resize_moves_both_edges() {
        let resized = resize(Corner::NorthWest, -100.0, -50.0);
        assert_eq!(resized, MaskFrame::new(10.0, 10.0, 60.0, 60.0));

        let limited = resize(Corner::NorthWest, 5000.0, 5000.0);
        assert!((limited.left - 60.0).abs() < EPS && (limited.top - 60.0).abs() < EPS);
        assert!((limited.width - MIN_FRAME_SIZE).abs() < EPS);
        assert!((limited.height - MIN_FRAME_SIZE).abs() < EPS);
    }

    #[test]
    fn resize_is_computed_from_snapshot() {
        let mut controller = controller();
        let start = Point::new(700.0, 350.0);
        controller.on_pointer_down_resize_handle(Corner::SouthEast, &frame(), start, container());

        let first = controller
            .on_pointer_move(&frame(), Point::new(800.0, 350.0), container())
            .expect("resizing");
        let second = controller
            .on_pointer_move(&first, Point::new(800.0, 350.0), container())
            .expect("resizing");
        assert_eq!(first, second);
    }

    #[test]
    fn pointer_up_and_cancel_end_gesture() {
        let mut controller = controller();
        controller.on_pointer_down_frame(&frame(), Point::default(), container());
        assert!(controller.on_pointer_up());
        assert!(!controller.is_active());

        controller.on_pointer_down_frame(&frame(), Point::default(), container());
        assert!(controller.cancel());
        assert!(!controller.cancel());
    }

    #[test]
    fn hover_is_tracked() {
        let mut controller = controller();
        assert!(controller.on_hover_enter());
        assert!(controller.interaction().is_hovering());
        assert!(controller.on_hover_leave());
    }

    #[test]
    fn untouched_frame_is_refitted_after_debounce() {
        let mut controller = controller();
        let start = Instant::now();
        let current = compute_video_display_rect(16.0 / 9.0, ContainerSize::new(1920.0, 1080.0));

        controller.on_window_resize(ContainerSize::new(1000.0, 1000.0), start);
        assert_eq!(controller.poll_resize(&current, 16.0 / 9.0, start), None);

        let refitted = controller
            .poll_resize(&current, 16.0 / 9.0, start + Duration::from_millis(100))
            .expect("refit");
        assert_eq!(refitted, MaskFrame::new(0.0, 21.875, 100.0, 56.25));
    }

    #[test]
    fn small_drift_is_ignored() {
        let mut controller = controller();
        let start = Instant::now();
        let current = MaskFrame::new(1.0, 0.0, 99.0, 100.0);

        controller.on_window_resize(ContainerSize::new(1920.0, 1080.0), start);
        assert_eq!(
            controller.poll_resize(&current, 16.0 / 9.0, start + Duration::from_secs(1)),
            None
        );
    }

    #[test]
    fn user_adjusted_frame_is_rescaled_not_refitted() {
        let mut controller = controller();
        let wide = ContainerSize::new(1920.0, 1080.0);
        let adjusted = MaskFrame::new(10.0, 10.0, 40.0, 40.0);
        controller.on_pointer_down_frame(&adjusted, Point::new(200.0, 200.0), wide);
        controller.on_pointer_move(&adjusted, Point::new(200.0, 200.0), wide);
        controller.on_pointer_up();

        // 16:9 video fills 1920x1080; in 1000x1000 it covers 56.25% of the height.
        let start = Instant::now();
        controller.on_window_resize(ContainerSize::new(1000.0, 1000.0), start);
        let scaled = controller
            .poll_resize(&adjusted, 16.0 / 9.0, start + Duration::from_millis(100))
            .expect("rescaled");

        assert!((scaled.width - 40.0 * 0.5625).abs() < 1e-3, "{scaled:?}");
        assert!((scaled.height - 40.0 * 0.5625).abs() < 1e-3, "{scaled:?}");
    }

    #[test]
    fn reset_interaction_resumes_refitting() {
        let mut controller = controller();
        let container = ContainerSize::new(1000.0, 1000.0);
        controller.on_pointer_down_frame(&frame(), Point::default(), container);
        controller.on_pointer_move(&frame(), Point::new(1.0, 1.0), container);
        controller.on_pointer_up();
        assert!(controller.has_user_interacted());

        controller.reset_interaction();
        assert!(!controller.has_user_interacted());
    }

    #[test]
    fn resize_during_gesture_waits_for_gesture_end() {
        let mut controller = controller();
        let start = Instant::now();
        let current = MaskFrame::FULL;
        let wide = ContainerSize::new(1920.0, 1080.0);
        controller.on_pointer_down_frame(&current, Point::default(), wide);
        controller.on_window_resize(ContainerSize::new(1000.0, 1000.0), start);

        let settled = start + Duration::from_millis(100);
        assert_eq!(controller.poll_resize(&current, 16.0 / 9.0, settled), None);
        assert!(controller.resize_pending());

        controller.cancel();
        let later = settled + Duration::from_millis(100);
        assert!(controller.poll_resize(&current, 16.0 / 9.0, later).is_some());
        assert!(!controller.resize_pending());
    }

    #[test]
    fn resize_is_pending_only_until_applied() {
        let mut controller = controller();
        assert!(!controller.resize_pending());

        let start = Instant::now();
        controller.on_window_resize(ContainerSize::new(0.0, 600.0), start);
        assert!(!controller.resize_pending());

        controller.on_window_resize(ContainerSize::new(800.0, 600.0), start);
        assert!(controller.resize_pending());
        controller.poll_resize(&MaskFrame::FULL, 16.0 / 9.0, start);
        assert!(controller.resize_pending());

        controller.poll_resize(&MaskFrame::FULL, 16.0 / 9.0, start + Duration::from_millis(100));
        assert!(!controller.resize_pending());
    }
}
