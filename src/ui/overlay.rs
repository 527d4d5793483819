// SPDX-License-Identifier: MPL-2.0
//! Canvas overlay drawing the subtitle box and mask frame and turning mouse
//! input into layout messages.
//!
//! The overlay is a snapshot of the orchestrator taken in `view`; every
//! interaction goes back through [`Message`] so the orchestrator stays the
//! single source of truth.

use crate::domain::layout::{ContainerSize, Corner, LayoutRect, LayoutSettings, PixelRect, Point};
use crate::layout::{
    compose_render_rect, LayoutOrchestrator, LayoutPersistence, Message, PointerTarget,
};
use crate::ui::theme::{self, sizing};
use iced::widget::canvas;
use iced::{mouse, Element, Length, Rectangle};
use std::time::Instant;

/// Region of the overlay under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    BoxHandle(Corner),
    Box,
    FrameHandle(Corner),
    Frame,
}

/// Region a hover flag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverRegion {
    Box,
    Frame,
}

impl Hit {
    #[must_use]
    pub fn region(self) -> HoverRegion {
        match self {
            Hit::BoxHandle(_) | Hit::Box => HoverRegion::Box,
            Hit::FrameHandle(_) | Hit::Frame => HoverRegion::Frame,
        }
    }
}

/// Center of the handle at `corner` of `rect`.
#[must_use]
pub fn handle_center(rect: &PixelRect, corner: Corner) -> Point {
    let x = if corner.is_west() {
        rect.x
    } else {
        rect.x + rect.width
    };
    let y = if corner.is_north() {
        rect.y
    } else {
        rect.y + rect.height
    };
    Point::new(x, y)
}

fn handle_at(rect: &PixelRect, point: Point, handle_size: f64) -> Option<Corner> {
    let half = handle_size / 2.0;
    Corner::ALL.into_iter().find(|&corner| {
        let center = handle_center(rect, corner);
        (point.x - center.x).abs() <= half && (point.y - center.y).abs() <= half
    })
}

/// Finds what the pointer is over. The subtitle box wins over the mask frame
/// and handles win over bodies.
#[must_use]
pub fn hit_test(
    settings: &LayoutSettings,
    container: ContainerSize,
    point: Point,
    handle_size: f64,
) -> Option<Hit> {
    let subtitle = compose_render_rect(settings).to_pixels(container);
    if let Some(corner) = handle_at(&subtitle, point, handle_size) {
        return Some(Hit::BoxHandle(corner));
    }
    if subtitle.contains(point) {
        return Some(Hit::Box);
    }
    if !settings.is_mask_mode {
        return None;
    }

    let frame = settings.mask_frame.as_rect().to_pixels(container);
    if let Some(corner) = handle_at(&frame, point, handle_size) {
        return Some(Hit::FrameHandle(corner));
    }
    frame.contains(point).then_some(Hit::Frame)
}

/// Message sent when the pointer is pressed on `hit`.
#[must_use]
pub fn press_message(hit: Hit, position: Point, container: ContainerSize) -> Message {
    match hit {
        Hit::BoxHandle(corner) => Message::BoxResizeHandleDown {
            corner,
            position,
            container,
        },
        Hit::Box => Message::BoxPointerDown {
            target: PointerTarget::Box,
            position,
            container,
        },
        Hit::FrameHandle(corner) => Message::FrameResizeHandleDown {
            corner,
            position,
            container,
        },
        Hit::Frame => Message::FramePointerDown {
            position,
            container,
        },
    }
}

fn hover_message(region: HoverRegion, hovered: bool) -> Message {
    match region {
        HoverRegion::Box => Message::BoxHovered(hovered),
        HoverRegion::Frame => Message::FrameHovered(hovered),
    }
}

fn container_of(bounds: Rectangle) -> ContainerSize {
    ContainerSize::new(f64::from(bounds.width), f64::from(bounds.height))
}

fn to_layout_point(point: iced::Point) -> Point {
    Point::new(f64::from(point.x), f64::from(point.y))
}

fn to_iced_rect(rect: &PixelRect) -> (iced::Point, iced::Size) {
    (
        iced::Point::new(rect.x as f32, rect.y as f32),
        iced::Size::new(rect.width as f32, rect.height as f32),
    )
}

/// Canvas program for the layout overlay.
#[derive(Debug, Clone, Copy)]
pub struct LayoutOverlay {
    settings: LayoutSettings,
    locked: bool,
    gesture_active: bool,
    box_hovered: bool,
    frame_hovered: bool,
}

impl LayoutOverlay {
    #[must_use]
    pub fn new<P: LayoutPersistence>(orchestrator: &LayoutOrchestrator<P>) -> Self {
        Self {
            settings: orchestrator.settings(),
            locked: orchestrator.is_locked(),
            gesture_active: orchestrator.wants_pointer(),
            box_hovered: orchestrator.subtitle_box().interaction().is_hovering(),
            frame_hovered: orchestrator.mask_frame().interaction().is_hovering(),
        }
    }

    /// Subtitle box rectangle, in percent of the container.
    #[must_use]
    pub fn subtitle_rect(&self) -> LayoutRect {
        compose_render_rect(&self.settings)
    }

    fn show_handles(&self, hovered: bool) -> bool {
        !self.locked && (hovered || self.gesture_active)
    }

    fn draw_handles(&self, frame: &mut canvas::Frame, rect: &PixelRect) {
        let size = sizing::HANDLE_SIZE;
        for corner in Corner::ALL {
            let center = handle_center(rect, corner);
            let handle = canvas::Path::rectangle(
                iced::Point::new(center.x as f32 - size / 2.0, center.y as f32 - size / 2.0),
                iced::Size::new(size, size),
            );
            frame.fill(&handle, theme::handle_color());
            frame.stroke(
                &handle,
                canvas::Stroke::default()
                    .with_width(sizing::HANDLE_BORDER_WIDTH)
                    .with_color(theme::handle_border_color()),
            );
        }
    }

    /// Turns one canvas event into at most one message.
    ///
    /// A change of bounds is remembered and published as
    /// [`Message::WindowResized`] on the first event that has nothing else
    /// to say, so pointer events are never dropped for it.
    fn react(
        &self,
        state: &mut OverlayState,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Reaction> {
        let container = container_of(bounds);
        if state.last_container != Some(container) {
            state.last_container = Some(container);
            state.resize_pending = true;
        }

        let reaction = self.route_pointer(state, event, container, bounds, cursor);
        if reaction.is_some() || !state.resize_pending {
            return reaction;
        }
        state.resize_pending = false;
        Some(Reaction::publish(Message::WindowResized {
            size: container,
            at: Instant::now(),
        }))
    }

    fn route_pointer(
        &self,
        state: &mut OverlayState,
        event: &iced::Event,
        container: ContainerSize,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Reaction> {
        match event {
            // Leaving the canvas ends any gesture
            iced::Event::Mouse(mouse::Event::CursorLeft) => {
                if self.gesture_active {
                    return Some(Reaction::capture(Message::PointerCancelled));
                }
                state
                    .hover
                    .take()
                    .map(|region| Reaction::publish(hover_message(region, false)))
            }
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = to_layout_point(cursor.position_in(bounds)?);
                let hit = hit_test(
                    &self.settings,
                    container,
                    position,
                    f64::from(sizing::HANDLE_SIZE),
                )?;
                if self.locked {
                    return None;
                }
                Some(Reaction::capture(press_message(hit, position, container)))
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let Some(position) = cursor.position_in(bounds) else {
                    return self
                        .gesture_active
                        .then(|| Reaction::capture(Message::PointerCancelled));
                };
                let position = to_layout_point(position);

                if self.gesture_active {
                    return Some(Reaction::capture(Message::PointerMoved {
                        position,
                        container,
                    }));
                }

                let region = hit_test(
                    &self.settings,
                    container,
                    position,
                    f64::from(sizing::HANDLE_SIZE),
                )
                .map(Hit::region);
                if region == state.hover {
                    return None;
                }
                // One message per event: leave first, enter on the next move.
                if let Some(previous) = state.hover.take() {
                    return Some(Reaction::publish(hover_message(previous, false)));
                }
                state.hover = region;
                region.map(|region| Reaction::publish(hover_message(region, true)))
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => self
                .gesture_active
                .then(|| Reaction::capture(Message::PointerReleased)),
            _ => None,
        }
    }
}

/// Pointer bookkeeping of the overlay widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlayState {
    hover: Option<HoverRegion>,
    last_container: Option<ContainerSize>,
    resize_pending: bool,
}

/// Message produced by one canvas event.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Reaction {
    message: Message,
    captured: bool,
}

impl Reaction {
    fn publish(message: Message) -> Self {
        Self {
            message,
            captured: false,
        }
    }

    fn capture(message: Message) -> Self {
        Self {
            message,
            captured: true,
        }
    }

    fn into_action(self) -> iced::widget::Action<Message> {
        let action = iced::widget::Action::publish(self.message);
        if self.captured {
            action.and_capture()
        } else {
            action
        }
    }
}

impl canvas::Program<Message> for LayoutOverlay {
    type State = OverlayState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<iced::widget::Action<Message>> {
        self.react(state, event, bounds, cursor)
            .map(Reaction::into_action)
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let container = container_of(bounds);

        if self.settings.is_mask_mode {
            let mask = self.settings.mask_frame.as_rect().to_pixels(container);
            let (origin, size) = to_iced_rect(&mask);

            // Dim the four bands around the frame
            let outside = theme::frame_outside_color();
            let right = origin.x + size.width;
            let bottom = origin.y + size.height;
            frame.fill_rectangle(
                iced::Point::ORIGIN,
                iced::Size::new(bounds.width, origin.y),
                outside,
            );
            frame.fill_rectangle(
                iced::Point::new(0.0, bottom),
                iced::Size::new(bounds.width, (bounds.height - bottom).max(0.0)),
                outside,
            );
            frame.fill_rectangle(
                iced::Point::new(0.0, origin.y),
                iced::Size::new(origin.x, size.height),
                outside,
            );
            frame.fill_rectangle(
                iced::Point::new(right, origin.y),
                iced::Size::new((bounds.width - right).max(0.0), size.height),
                outside,
            );

            frame.stroke(
                &canvas::Path::rectangle(origin, size),
                canvas::Stroke::default()
                    .with_width(sizing::OUTLINE_WIDTH)
                    .with_color(theme::frame_outline_color(self.frame_hovered)),
            );
            if self.show_handles(self.frame_hovered) {
                self.draw_handles(&mut frame, &mask);
            }
        }

        let subtitle = self.subtitle_rect().to_pixels(container);
        let (origin, size) = to_iced_rect(&subtitle);
        let path = canvas::Path::rectangle(origin, size);
        if let Some(color) = theme::subtitle_background_color(self.settings.background_type) {
            frame.fill(&path, color);
        }
        if self.box_hovered || self.gesture_active {
            frame.stroke(
                &path,
                canvas::Stroke::default()
                    .with_width(sizing::OUTLINE_WIDTH)
                    .with_color(theme::box_outline_color(self.gesture_active)),
            );
        }
        if self.show_handles(self.box_hovered) {
            self.draw_handles(&mut frame, &subtitle);
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.locked {
            return mouse::Interaction::default();
        }
        if self.gesture_active {
            return mouse::Interaction::Grabbing;
        }
        let Some(position) = cursor.position_in(bounds) else {
            return mouse::Interaction::default();
        };
        let hit = hit_test(
            &self.settings,
            container_of(bounds),
            to_layout_point(position),
            f64::from(sizing::HANDLE_SIZE),
        );
        match hit {
            Some(Hit::BoxHandle(corner) | Hit::FrameHandle(corner)) => {
                if corner.is_west() == corner.is_north() {
                    mouse::Interaction::ResizingDiagonallyDown
                } else {
                    mouse::Interaction::ResizingDiagonallyUp
                }
            }
            Some(Hit::Box | Hit::Frame) => mouse::Interaction::Grab,
            None => mouse::Interaction::default(),
        }
    }
}

/// Full-size canvas showing the overlay of `orchestrator`.
pub fn view<'a, P: LayoutPersistence>(
    orchestrator: &LayoutOrchestrator<P>,
) -> Element<'a, Message> {
    canvas::Canvas::new(LayoutOverlay::new(orchestrator))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Ticks driving the resize debouncer of `orchestrator`.
///
/// Ticks run only while [`LayoutOrchestrator::resize_pending`] holds; the
/// host rebuilds its subscriptions after every update, so they stop once
/// the settled size has been applied.
pub fn subscription<P: LayoutPersistence>(
    orchestrator: &LayoutOrchestrator<P>,
    interval: std::time::Duration,
) -> iced::Subscription<Message> {
    if orchestrator.resize_pending() {
        iced::time::every(interval).map(Message::Tick)
    } else {
        iced::Subscription::none()
    }
}
