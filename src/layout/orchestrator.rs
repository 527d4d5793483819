// SPDX-License-Identifier: MPL-2.0
//! Composes the store and both controllers behind one `update` entry point.
//!
//! Exactly one controller owns the pointer during a gesture. Pointer moves
//! stage settings in memory; the gesture end (release, cancel or teardown)
//! commits them, so the final pointer state is always the last one written.

use super::mask_frame::MaskFrameController;
use super::messages::{Event, Message};
use super::persistence::LayoutPersistence;
use super::store::{LayoutStore, VideoId};
use super::subtitle_box::{PointerTarget, SubtitleBoxController};
use crate::config::LayoutOptions;
use crate::domain::layout::layout_bounds::{DEFAULT_VIDEO_ASPECT_RATIO, FULL};
use crate::domain::layout::{
    compute_video_display_rect, nest_in_frame, unnest_from_frame, ContainerSize, Corner,
    LayoutRect, LayoutSettings, Point,
};
use std::time::Instant;

/// Rectangle the subtitle box occupies, in percent of the container.
#[must_use]
pub fn compose_render_rect(settings: &LayoutSettings) -> LayoutRect {
    let layout = settings.margins.layout();
    if settings.is_mask_mode {
        nest_in_frame(layout, &settings.mask_frame)
    } else {
        layout
    }
}

/// Layout engine of the subtitle overlay for the currently open video.
#[derive(Debug)]
pub struct LayoutOrchestrator<P> {
    store: LayoutStore<P>,
    video_id: VideoId,
    video_aspect_ratio: f64,
    options: LayoutOptions,
    locked: bool,
    subtitle_box: SubtitleBoxController,
    mask_frame: MaskFrameController,
}

impl<P: LayoutPersistence> LayoutOrchestrator<P> {
    pub fn new(mut store: LayoutStore<P>, video_id: VideoId, options: LayoutOptions) -> Self {
        store.get(&video_id);
        Self {
            store,
            video_id,
            video_aspect_ratio: DEFAULT_VIDEO_ASPECT_RATIO,
            locked: options.locked,
            subtitle_box: SubtitleBoxController::new(),
            mask_frame: MaskFrameController::new(&options),
            options,
        }
    }

    /// Switches to another video, committing any gesture on the current one.
    pub fn open_video(&mut self, video_id: VideoId, video_aspect_ratio: f64) {
        self.end_gesture();
        self.store.get(&video_id);
        self.video_id = video_id;
        self.video_aspect_ratio = video_aspect_ratio;
        self.subtitle_box = SubtitleBoxController::new();
        self.mask_frame = MaskFrameController::new(&self.options);
        log::debug!("Opened layout of {}", self.video_id);
    }

    #[must_use]
    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    #[must_use]
    pub fn video_aspect_ratio(&self) -> f64 {
        self.video_aspect_ratio
    }

    #[must_use]
    pub fn settings(&self) -> LayoutSettings {
        self.store
            .peek(&self.video_id)
            .copied()
            .unwrap_or_default()
    }

    /// Subtitle box rectangle, in percent of the container.
    #[must_use]
    pub fn render_rect(&self) -> LayoutRect {
        compose_render_rect(&self.settings())
    }

    /// Mask frame rectangle while mask mode is on.
    #[must_use]
    pub fn mask_frame_rect(&self) -> Option<LayoutRect> {
        let settings = self.settings();
        settings
            .is_mask_mode
            .then(|| settings.mask_frame.as_rect())
    }

    /// Returns true while a gesture owns the pointer.
    #[must_use]
    pub fn wants_pointer(&self) -> bool {
        self.subtitle_box.is_active() || self.mask_frame.is_active()
    }

    /// Returns true while a window resize waits for its quiet period.
    ///
    /// Hosts drive [`Message::Tick`] only while this holds.
    #[must_use]
    pub fn resize_pending(&self) -> bool {
        self.mask_frame.resize_pending()
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn subtitle_box(&self) -> &SubtitleBoxController {
        &self.subtitle_box
    }

    #[must_use]
    pub fn mask_frame(&self) -> &MaskFrameController {
        &self.mask_frame
    }

    #[must_use]
    pub fn store(&self) -> &LayoutStore<P> {
        &self.store
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::BoxPointerDown {
                target,
                position,
                container,
            } => self.box_pointer_down(target, position, container),
            Message::BoxResizeHandleDown {
                corner,
                position,
                container,
            } => self.box_resize_down(corner, position, container),
            Message::BoxHovered(hovered) => {
                let changed = if hovered {
                    self.subtitle_box.on_hover_enter()
                } else {
                    self.subtitle_box.on_hover_leave()
                };
                redraw_if(changed)
            }
            Message::FramePointerDown {
                position,
                container,
            } => self.frame_pointer_down(None, position, container),
            Message::FrameResizeHandleDown {
                corner,
                position,
                container,
            } => self.frame_pointer_down(Some(corner), position, container),
            Message::FrameHovered(hovered) => {
                let changed = if hovered {
                    self.mask_frame.on_hover_enter()
                } else {
                    self.mask_frame.on_hover_leave()
                };
                redraw_if(changed)
            }
            Message::PointerMoved {
                position,
                container,
            } => self.pointer_moved(position, container),
            Message::PointerReleased | Message::PointerCancelled | Message::Teardown => {
                if self.end_gesture() {
                    Event::Committed
                } else {
                    Event::None
                }
            }
            Message::WindowResized { size, at } => {
                self.mask_frame.on_window_resize(size, at);
                Event::None
            }
            Message::Tick(now) => self.poll_resize(now),
            Message::VideoAspectRatioChanged { ratio, container } => {
                self.aspect_ratio_changed(ratio, container)
            }
            Message::LayoutLockChanged(locked) => {
                self.locked = locked;
                if locked {
                    self.end_gesture();
                }
                Event::LayoutChanged
            }
            Message::ToggleMaskMode { container } => {
                self.end_gesture();
                let enabled =
                    self.store
                        .toggle_mask_mode(&self.video_id, self.video_aspect_ratio, container);
                if enabled {
                    self.mask_frame.reset_interaction();
                }
                self.mask_frame.observe_container(container);
                Event::LayoutChanged
            }
            Message::ToggleBackground => {
                self.end_gesture();
                self.store.toggle_background_type(&self.video_id);
                Event::LayoutChanged
            }
            Message::Reset { container } => {
                self.end_gesture();
                self.store
                    .reset(&self.video_id, self.video_aspect_ratio, container);
                self.mask_frame.reset_interaction();
                self.mask_frame.observe_container(container);
                Event::LayoutChanged
            }
            Message::ResetMaskFrame { container } => {
                self.end_gesture();
                let mut settings = self.settings();
                settings.mask_frame =
                    compute_video_display_rect(self.video_aspect_ratio, container);
                self.store.update(&self.video_id, settings);
                self.mask_frame.reset_interaction();
                self.mask_frame.observe_container(container);
                Event::LayoutChanged
            }
            Message::ExpandHorizontally { container } => {
                self.end_gesture();
                self.expand_horizontally(container)
            }
        }
    }

    fn box_pointer_down(
        &mut self,
        target: PointerTarget,
        position: Point,
        container: ContainerSize,
    ) -> Event {
        if self.wants_pointer() {
            return Event::None;
        }
        self.mask_frame.observe_container(container);
        let settings = self.settings();
        let accepted =
            self.subtitle_box
                .on_pointer_down(target, &settings, position, container, self.locked);
        redraw_if(accepted)
    }

    fn box_resize_down(
        &mut self,
        corner: Corner,
        position: Point,
        container: ContainerSize,
    ) -> Event {
        if self.wants_pointer() {
            return Event::None;
        }
        self.mask_frame.observe_container(container);
        let settings = self.settings();
        let accepted =
            self.subtitle_box
                .on_pointer_down_resize_handle(corner, &settings, position, self.locked);
        redraw_if(accepted)
    }

    fn frame_pointer_down(
        &mut self,
        corner: Option<Corner>,
        position: Point,
        container: ContainerSize,
    ) -> Event {
        let settings = self.settings();
        if self.wants_pointer() || self.locked || !settings.is_mask_mode {
            return Event::None;
        }
        let frame = settings.mask_frame;
        match corner {
            Some(corner) => self
                .mask_frame
                .on_pointer_down_resize_handle(corner, &frame, position, container),
            None => self
                .mask_frame
                .on_pointer_down_frame(&frame, position, container),
        }
        Event::LayoutChanged
    }

    fn pointer_moved(&mut self, position: Point, container: ContainerSize) -> Event {
        let mut settings = self.settings();
        if self.subtitle_box.is_active() {
            let Some(margins) = self
                .subtitle_box
                .on_pointer_move(&settings, position, container)
            else {
                return Event::None;
            };
            settings.margins = margins;
        } else if self.mask_frame.is_active() {
            let Some(frame) = self
                .mask_frame
                .on_pointer_move(&settings.mask_frame, position, container)
            else {
                return Event::None;
            };
            settings.mask_frame = frame;
        } else {
            return Event::None;
        }
        self.store.stage(&self.video_id, settings);
        Event::LayoutChanged
    }

    /// Ends whichever gesture is active and persists its result.
    fn end_gesture(&mut self) -> bool {
        let box_ended = self.subtitle_box.on_pointer_up();
        let frame_ended = self.mask_frame.on_pointer_up();
        let ended = box_ended || frame_ended;
        if ended {
            self.store.commit(&self.video_id);
        }
        ended
    }

    fn poll_resize(&mut self, now: Instant) -> Event {
        let mut settings = self.settings();
        let Some(frame) =
            self.mask_frame
                .poll_resize(&settings.mask_frame, self.video_aspect_ratio, now)
        else {
            return Event::None;
        };
        settings.mask_frame = frame;
        self.store.update(&self.video_id, settings);
        Event::LayoutChanged
    }

    fn aspect_ratio_changed(&mut self, ratio: f64, container: ContainerSize) -> Event {
        self.video_aspect_ratio = if ratio.is_finite() && ratio > 0.0 {
            ratio
        } else {
            DEFAULT_VIDEO_ASPECT_RATIO
        };
        self.mask_frame.observe_container(container);

        let mut settings = self.settings();
        if !settings.is_mask_mode || self.mask_frame.has_user_interacted() {
            return Event::None;
        }
        let ideal = compute_video_display_rect(self.video_aspect_ratio, container);
        if ideal.max_difference(&settings.mask_frame) <= self.options.auto_adjust_threshold {
            return Event::None;
        }
        settings.mask_frame = ideal;
        self.store.update(&self.video_id, settings);
        Event::LayoutChanged
    }

    /// Aligns the box's left and right edges with the video, inset by the
    /// configured padding.
    fn expand_horizontally(&mut self, container: ContainerSize) -> Event {
        let mut settings = self.settings();
        let display = compute_video_display_rect(self.video_aspect_ratio, container).as_rect();
        let reference = if settings.is_mask_mode {
            unnest_from_frame(display, &settings.mask_frame)
        } else {
            display
        };
        let padding = self.options.expand_padding;
        settings.margins.left = reference.left + padding;
        settings.margins.right = FULL - reference.right() + padding;
        self.store.update(&self.video_id, settings);
        Event::LayoutChanged
    }
}

fn redraw_if(changed: bool) -> Event {
    if changed {
        Event::LayoutChanged
    } else {
        Event::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layout::{Margins, MaskFrame};
    use crate::layout::persistence::MemoryPersistence;
    use std::time::Duration;

    const EPS: f64 = 1e-6;

    fn hd() -> ContainerSize {
        ContainerSize::new(1920.0, 1080.0)
    }

    fn orchestrator() -> LayoutOrchestrator<MemoryPersistence> {
        LayoutOrchestrator::new(
            LayoutStore::new(MemoryPersistence::new()),
            VideoId::new("clip.mkv"),
            LayoutOptions::default(),
        )
    }

    fn writes(orchestrator: &LayoutOrchestrator<MemoryPersistence>) -> usize {
        orchestrator.store().persistence().write_count()
    }

    #[test]
    fn compose_render_rect_nests_in_mask_frame() {
        let normal = LayoutSettings::default();
        assert_eq!(compose_render_rect(&normal), normal.margins.layout());

        let masked = LayoutSettings {
            is_mask_mode: true,
            mask_frame: MaskFrame::new(12.5, 0.0, 75.0, 100.0),
            ..LayoutSettings::default()
        };
        let rect = compose_render_rect(&masked);
        assert!((rect.left - 27.5).abs() < EPS);
        assert!((rect.width - 45.0).abs() < EPS);
        assert!((rect.top - 75.0).abs() < EPS);
        assert!((rect.height - 20.0).abs() < EPS);
    }

    #[test]
    fn drag_stages_moves_and_commits_on_release() {
        let mut orchestrator = orchestrator();
        let down = Message::BoxPointerDown {
            target: PointerTarget::Box,
            position: Point::new(400.0, 820.0),
            container: hd(),
        };
        assert_eq!(orchestrator.update(down), Event::LayoutChanged);
        assert!(orchestrator.wants_pointer());

        for step in 1..=5 {
            let moved = Message::PointerMoved {
                position: Point::new(400.0 - f64::from(step) * 19.2, 820.0),
                container: hd(),
            };
            assert_eq!(orchestrator.update(moved), Event::LayoutChanged);
        }
        assert_eq!(writes(&orchestrator), 0);

        assert_eq!(orchestrator.update(Message::PointerReleased), Event::Committed);
        assert!(!orchestrator.wants_pointer());
        assert_eq!(writes(&orchestrator), 1);
        assert!((orchestrator.settings().margins.left - 15.0).abs() < EPS);
        assert!((orchestrator.settings().margins.right - 25.0).abs() < EPS);
    }

    #[test]
    fn cancel_and_teardown_commit_like_release() {
        for end in [Message::PointerCancelled, Message::Teardown] {
            let mut orchestrator = orchestrator();
            orchestrator.update(Message::BoxResizeHandleDown {
                corner: Corner::SouthEast,
                position: Point::new(1000.0, 1000.0),
                container: hd(),
            });
            orchestrator.update(Message::PointerMoved {
                position: Point::new(1192.0, 1000.0),
                container: hd(),
            });
            assert_eq!(orchestrator.update(end), Event::Committed);
            assert!(!orchestrator.wants_pointer());
            assert_eq!(writes(&orchestrator), 1);
        }
    }

    #[test]
    fn release_without_gesture_does_nothing() {
        let mut orchestrator = orchestrator();
        assert_eq!(orchestrator.update(Message::PointerReleased), Event::None);
        assert_eq!(writes(&orchestrator), 0);
    }

    #[test]
    fn locked_layout_rejects_gestures() {
        let mut orchestrator = orchestrator();
        orchestrator.update(Message::LayoutLockChanged(true));
        orchestrator.update(Message::ToggleMaskMode { container: hd() });

        let down = Message::BoxPointerDown {
            target: PointerTarget::Box,
            position: Point::new(960.0, 900.0),
            container: hd(),
        };
        assert_eq!(orchestrator.update(down), Event::None);
        let frame_down = Message::FramePointerDown {
            position: Point::new(960.0, 540.0),
            container: hd(),
        };
        assert_eq!(orchestrator.update(frame_down), Event::None);
        assert!(!orchestrator.wants_pointer());
        assert!(orchestrator.is_locked());
    }

    #[test]
    fn word_token_press_is_not_a_drag() {
        let mut orchestrator = orchestrator();
        let down = Message::BoxPointerDown {
            target: PointerTarget::WordToken,
            position: Point::new(960.0, 900.0),
            container: hd(),
        };
        assert_eq!(orchestrator.update(down), Event::None);
        assert!(!orchestrator.wants_pointer());
    }

    #[test]
    fn only_one_controller_owns_the_pointer() {
        let mut orchestrator = orchestrator();
        orchestrator.update(Message::ToggleMaskMode { container: hd() });
        orchestrator.update(Message::FramePointerDown {
            position: Point::new(960.0, 540.0),
            container: hd(),
        });
        let box_down = Message::BoxPointerDown {
            target: PointerTarget::Box,
            position: Point::new(960.0, 900.0),
            container: hd(),
        };
        assert_eq!(orchestrator.update(box_down), Event::None);
        assert!(orchestrator.mask_frame().is_active());
        assert!(!orchestrator.subtitle_box().is_active());
    }

    #[test]
    fn frame_gestures_require_mask_mode() {
        let mut orchestrator = orchestrator();
        let down = Message::FrameResizeHandleDown {
            corner: Corner::NorthWest,
            position: Point::default(),
            container: hd(),
        };
        assert_eq!(orchestrator.update(down), Event::None);
        assert!(orchestrator.mask_frame_rect().is_none());
    }

    #[test]
    fn mask_mode_round_trip_keeps_margins() {
        let mut orchestrator = orchestrator();
        let before = orchestrator.settings().margins;
        orchestrator.update(Message::ToggleMaskMode { container: hd() });
        assert!(orchestrator.mask_frame_rect().is_some());
        orchestrator.update(Message::ToggleMaskMode { container: hd() });
        assert_eq!(orchestrator.settings().margins, before);
    }

    #[test]
    fn toggling_mask_mode_mid_gesture_commits_first() {
        let mut orchestrator = orchestrator();
        orchestrator.update(Message::BoxPointerDown {
            target: PointerTarget::Box,
            position: Point::new(400.0, 820.0),
            container: hd(),
        });
        orchestrator.update(Message::ToggleMaskMode { container: hd() });
        assert!(!orchestrator.wants_pointer());
        assert_eq!(writes(&orchestrator), 2);
    }

    #[test]
    fn expand_horizontally_matches_video_edges() {
        let mut orchestrator = orchestrator();
        orchestrator.update(Message::VideoAspectRatioChanged {
            ratio: 4.0 / 3.0,
            container: hd(),
        });
        orchestrator.update(Message::ExpandHorizontally { container: hd() });
        let margins = orchestrator.settings().margins;
        assert!((margins.left - 14.5).abs() < EPS, "{margins:?}");
        assert!((margins.right - 14.5).abs() < EPS, "{margins:?}");

        orchestrator.update(Message::ToggleMaskMode { container: hd() });
        orchestrator.update(Message::ExpandHorizontally { container: hd() });
        let margins = orchestrator.settings().margins;
        assert!((margins.left - 2.0).abs() < EPS, "{margins:?}");
        assert!((margins.right - 2.0).abs() < EPS, "{margins:?}");
    }

    #[test]
    fn toggling_mask_mode_keeps_box_on_screen() {
        let mut orchestrator = orchestrator();
        orchestrator.update(Message::VideoAspectRatioChanged {
            ratio: 4.0 / 3.0,
            container: hd(),
        });
        let before = orchestrator.render_rect();

        for _ in 0..2 {
            orchestrator.update(Message::ToggleMaskMode { container: hd() });
            let rect = orchestrator.render_rect();
            assert!((rect.left - before.left).abs() < EPS, "{rect:?}");
            assert!((rect.top - before.top).abs() < EPS, "{rect:?}");
            assert!((rect.width - before.width).abs() < EPS, "{rect:?}");
            assert!((rect.height - before.height).abs() < EPS, "{rect:?}");
        }
    }

    #[test]
    fn expanding_mid_drag_ends_the_drag() {
        let mut orchestrator = orchestrator();
        orchestrator.update(Message::BoxPointerDown {
            target: PointerTarget::Box,
            position: Point::new(400.0, 820.0),
            container: hd(),
        });
        orchestrator.update(Message::ExpandHorizontally { container: hd() });
        assert!(!orchestrator.wants_pointer());
        assert_eq!(writes(&orchestrator), 2);

        let expanded = orchestrator.settings().margins;
        let moved = Message::PointerMoved {
            position: Point::new(100.0, 820.0),
            container: hd(),
        };
        assert_eq!(orchestrator.update(moved), Event::None);
        assert_eq!(orchestrator.settings().margins, expanded);
        assert!((expanded.left - 2.0).abs() < EPS, "{expanded:?}");
    }

    #[test]
    fn toggling_background_mid_resize_ends_the_resize() {
        let mut orchestrator = orchestrator();
        orchestrator.update(Message::BoxResizeHandleDown {
            corner: Corner::SouthEast,
            position: Point::new(1536.0, 1026.0),
            container: hd(),
        });
        orchestrator.update(Message::ToggleBackground);
        assert!(!orchestrator.wants_pointer());

        let moved = Message::PointerMoved {
            position: Point::new(1728.0, 1026.0),
            container: hd(),
        };
        assert_eq!(orchestrator.update(moved), Event::None);
        assert_eq!(orchestrator.settings().margins, Margins::default());
        assert_eq!(orchestrator.update(Message::PointerReleased), Event::None);
    }

    #[test]
    fn resize_pending_until_tick_applies_it() {
        let mut orchestrator = orchestrator();
        assert!(!orchestrator.resize_pending());

        let start = Instant::now();
        orchestrator.update(Message::WindowResized {
            size: ContainerSize::new(1280.0, 720.0),
            at: start,
        });
        assert!(orchestrator.resize_pending());
        orchestrator.update(Message::Tick(start));
        assert!(orchestrator.resize_pending());

        orchestrator.update(Message::Tick(start + Duration::from_millis(100)));
        assert!(!orchestrator.resize_pending());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut orchestrator = orchestrator();
        orchestrator.update(Message::ToggleBackground);
        orchestrator.update(Message::ToggleMaskMode { container: hd() });
        orchestrator.update(Message::Reset { container: hd() });

        let settings = orchestrator.settings();
        assert_eq!(settings.margins, Margins::default());
        assert!(!settings.is_mask_mode);
        assert_eq!(settings.mask_frame, MaskFrame::FULL);
    }

    #[test]
    fn window_resize_refits_untouched_frame_after_tick() {
        let mut orchestrator = orchestrator();
        orchestrator.update(Message::ToggleMaskMode { container: hd() });
        let start = Instant::now();
        let square = ContainerSize::new(1000.0, 1000.0);

        orchestrator.update(Message::WindowResized {
            size: square,
            at: start,
        });
        assert_eq!(orchestrator.update(Message::Tick(start)), Event::None);
        assert_eq!(
            orchestrator.update(Message::Tick(start + Duration::from_millis(100))),
            Event::LayoutChanged
        );
        assert_eq!(
            orchestrator.settings().mask_frame,
            MaskFrame::new(0.0, 21.875, 100.0, 56.25)
        );
    }

    #[test]
    fn aspect_change_refits_frame_in_mask_mode() {
        let mut orchestrator = orchestrator();
        orchestrator.update(Message::ToggleMaskMode { container: hd() });
        assert_eq!(orchestrator.settings().mask_frame, MaskFrame::FULL);

        let event = orchestrator.update(Message::VideoAspectRatioChanged {
            ratio: 4.0 / 3.0,
            container: hd(),
        });
        assert_eq!(event, Event::LayoutChanged);
        assert_eq!(
            orchestrator.settings().mask_frame,
            MaskFrame::new(12.5, 0.0, 75.0, 100.0)
        );
    }

    #[test]
    fn open_video_switches_settings() {
        let mut orchestrator = orchestrator();
        orchestrator.update(Message::ToggleBackground);
        orchestrator.open_video(VideoId::new("other.mkv"), 4.0 / 3.0);

        assert_eq!(orchestrator.video_id().as_str(), "other.mkv");
        assert_eq!(orchestrator.settings(), LayoutSettings::default());
        assert!((orchestrator.video_aspect_ratio() - 4.0 / 3.0).abs() < EPS);
    }
}
