// SPDX-License-Identifier: MPL-2.0
//! `subtitle_overlay` is the layout engine of a subtitle overlay for a
//! video-subtitle viewer.
//!
//! It places a draggable, resizable subtitle box over a video, optionally
//! nested inside a mask frame that tracks the video's letterboxed display
//! area, keeps both regions valid, and rescales them when the window changes
//! size. Layouts are remembered per video.
//!
//! # Layers
//!
//! - [`domain`] - Pure geometry rules with no external dependencies
//! - [`layout`] - Store, gesture controllers and the orchestrator
//! - [`ui`] - Iced canvas overlay
//! - [`config`] / [`paths`] - User settings and directory resolution

#![doc(html_root_url = "https://docs.rs/subtitle_overlay/0.1.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod layout;
pub mod paths;
pub mod ui;
