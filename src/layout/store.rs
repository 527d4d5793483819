// SPDX-License-Identifier: MPL-2.0
//! Per-video layout settings store.
//!
//! The store is the only owner of [`LayoutSettings`]. Controllers read the
//! current settings by reference and hand back new values, which the store
//! validates before keeping them. Writes reach the persistence backend
//! synchronously, so the last committed state is always the last one written.

use super::persistence::{LayoutPersistence, LayoutRecord};
use crate::domain::layout::{
    compute_video_display_rect, nest_in_frame, unnest_from_frame, validate_margins,
    validate_mask_frame, BackgroundType, ContainerSize, LayoutSettings, Margins,
};
use std::collections::HashMap;
use std::fmt;

/// Stable identifier of a video (typically its path or content hash).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Runs every geometry rule over a settings value.
#[must_use]
pub fn validate_settings(settings: LayoutSettings) -> LayoutSettings {
    LayoutSettings {
        margins: validate_margins(settings.margins),
        mask_frame: validate_mask_frame(settings.mask_frame),
        ..settings
    }
}

/// Keyed layout settings backed by a persistence backend.
#[derive(Debug)]
pub struct LayoutStore<P> {
    persistence: P,
    entries: HashMap<VideoId, LayoutSettings>,
}

impl<P: LayoutPersistence> LayoutStore<P> {
    pub fn new(persistence: P) -> Self {
        Self {
            persistence,
            entries: HashMap::new(),
        }
    }

    #[must_use]
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Returns the settings of `id`, loading them on first access.
    pub fn get(&mut self, id: &VideoId) -> &LayoutSettings {
        let persistence = &self.persistence;
        self.entries
            .entry(id.clone())
            .or_insert_with(|| load_settings(persistence, id))
    }

    /// Returns the settings of `id` if they were already loaded.
    #[must_use]
    pub fn peek(&self, id: &VideoId) -> Option<&LayoutSettings> {
        self.entries.get(id)
    }

    /// Validates, keeps and persists new settings.
    pub fn update(&mut self, id: &VideoId, settings: LayoutSettings) -> LayoutSettings {
        let settings = self.stage(id, settings);
        self.write(id, settings);
        settings
    }

    /// Validates and keeps new settings without persisting them.
    ///
    /// Used for intermediate pointer moves; [`Self::commit`] writes the
    /// final state when the gesture ends.
    pub fn stage(&mut self, id: &VideoId, settings: LayoutSettings) -> LayoutSettings {
        let settings = validate_settings(settings);
        self.entries.insert(id.clone(), settings);
        settings
    }

    /// Persists the current settings of `id`.
    pub fn commit(&mut self, id: &VideoId) {
        let settings = *self.get(id);
        self.write(id, settings);
    }

    /// Switches to the next background style.
    pub fn toggle_background_type(&mut self, id: &VideoId) -> BackgroundType {
        let mut settings = *self.get(id);
        settings.background_type = settings.background_type.next();
        self.update(id, settings).background_type
    }

    /// Flips mask mode. Turning it on fits the mask frame to the video so
    /// the mode never starts from a frame belonging to another video.
    ///
    /// Margins are re-expressed in the new reference frame so the visible
    /// box stays put. A box reaching outside the frame is clamped into it.
    pub fn toggle_mask_mode(
        &mut self,
        id: &VideoId,
        video_aspect_ratio: f64,
        container: ContainerSize,
    ) -> bool {
        let mut settings = *self.get(id);
        let layout = settings.margins.layout();
        if settings.is_mask_mode {
            settings.is_mask_mode = false;
            settings.margins = Margins::from_layout(nest_in_frame(layout, &settings.mask_frame));
        } else {
            settings.is_mask_mode = true;
            settings.mask_frame = compute_video_display_rect(video_aspect_ratio, container);
            settings.margins =
                Margins::from_layout(unnest_from_frame(layout, &settings.mask_frame));
        }
        self.update(id, settings).is_mask_mode
    }

    /// Restores defaults with a mask frame fitted to the video.
    pub fn reset(
        &mut self,
        id: &VideoId,
        video_aspect_ratio: f64,
        container: ContainerSize,
    ) -> LayoutSettings {
        let settings = LayoutSettings {
            mask_frame: compute_video_display_rect(video_aspect_ratio, container),
            ..LayoutSettings::default()
        };
        self.update(id, settings)
    }

    fn write(&mut self, id: &VideoId, settings: LayoutSettings) {
        let result = LayoutRecord::from(settings)
            .to_value()
            .and_then(|value| self.persistence.write(id.as_str(), value));
        if let Err(error) = result {
            log::warn!("Failed to persist layout for {}: {}", id, error);
        }
    }
}

fn load_settings<P: LayoutPersistence>(persistence: &P, id: &VideoId) -> LayoutSettings {
    let value = match persistence.read(id.as_str()) {
        Ok(Some(value)) => value,
        Ok(None) => return LayoutSettings::default(),
        Err(error) => {
            log::warn!("Failed to read layout for {}: {}", id, error);
            return LayoutSettings::default();
        }
    };

    match LayoutRecord::from_value(value) {
        Ok(record) => validate_settings(record.into()),
        Err(error) => {
            log::warn!("Discarding invalid layout record for {}: {}", id, error);
            LayoutSettings::default()
        }
    }
}
