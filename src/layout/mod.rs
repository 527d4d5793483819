// SPDX-License-Identifier: MPL-2.0
//! Interactive layout engine of the subtitle overlay.
//!
//! Builds on the pure rules in [`crate::domain::layout`]: the store keeps
//! validated settings per video, the controllers turn pointer gestures into
//! new geometry, and the orchestrator routes messages between them.

pub mod debounce;
pub mod interaction;
pub mod mask_frame;
pub mod messages;
pub mod orchestrator;
pub mod persistence;
pub mod store;
pub mod subtitle_box;

pub use mask_frame::MaskFrameController;
pub use messages::{Event, Message};
pub use orchestrator::{compose_render_rect, LayoutOrchestrator};
pub use persistence::{JsonFilePersistence, LayoutPersistence, LayoutRecord, MemoryPersistence};
pub use store::{LayoutStore, VideoId};
pub use subtitle_box::{PointerTarget, SubtitleBoxController};
