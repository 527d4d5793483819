// SPDX-License-Identifier: MPL-2.0
//! Layout record persistence.
//!
//! Records are stored as flat JSON objects keyed by video identifier:
//!
//! ```json
//! {"margins":{"left":20,"top":75,"right":20,"bottom":5},
//!  "backgroundType":"transparent","isMaskMode":false,
//!  "maskFrame":{"left":0,"top":0,"width":100,"height":100}}
//! ```
//!
//! Decoding is strict: an unknown or missing field, a wrong type or an
//! unknown background name rejects the whole record. There is no partial
//! merge, so an outdated record is simply replaced by defaults.
//!
//! Two backends are provided: [`MemoryPersistence`] and
//! [`JsonFilePersistence`], which keeps every record in one JSON document
//! inside the application data directory.

use crate::domain::layout::{BackgroundType, LayoutSettings, Margins, MaskFrame};
use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// File name of the layout document within the app data directory.
const LAYOUTS_FILE: &str = "subtitle_layouts.json";

// =============================================================================
// Record
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct MarginsRecord {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct MaskFrameRecord {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum BackgroundRecord {
    Transparent,
    Blur,
    SolidDark,
    SolidLight,
}

/// Serialized shape of [`LayoutSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LayoutRecord {
    margins: MarginsRecord,
    background_type: BackgroundRecord,
    is_mask_mode: bool,
    mask_frame: MaskFrameRecord,
}

impl LayoutRecord {
    /// Decodes a stored value, rejecting anything not shaped exactly like a record.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl From<LayoutSettings> for LayoutRecord {
    fn from(settings: LayoutSettings) -> Self {
        let LayoutSettings {
            margins,
            background_type,
            is_mask_mode,
            mask_frame,
        } = settings;
        Self {
            margins: MarginsRecord {
                left: margins.left,
                top: margins.top,
                right: margins.right,
                bottom: margins.bottom,
            },
            background_type: match background_type {
                BackgroundType::Transparent => BackgroundRecord::Transparent,
                BackgroundType::Blur => BackgroundRecord::Blur,
                BackgroundType::SolidDark => BackgroundRecord::SolidDark,
                BackgroundType::SolidLight => BackgroundRecord::SolidLight,
            },
            is_mask_mode,
            mask_frame: MaskFrameRecord {
                left: mask_frame.left,
                top: mask_frame.top,
                width: mask_frame.width,
                height: mask_frame.height,
            },
        }
    }
}

impl From<LayoutRecord> for LayoutSettings {
    fn from(record: LayoutRecord) -> Self {
        let m = record.margins;
        let f = record.mask_frame;
        Self {
            margins: Margins::new(m.left, m.top, m.right, m.bottom),
            background_type: match record.background_type {
                BackgroundRecord::Transparent => BackgroundType::Transparent,
                BackgroundRecord::Blur => BackgroundType::Blur,
                BackgroundRecord::SolidDark => BackgroundType::SolidDark,
                BackgroundRecord::SolidLight => BackgroundType::SolidLight,
            },
            is_mask_mode: record.is_mask_mode,
            mask_frame: MaskFrame::new(f.left, f.top, f.width, f.height),
        }
    }
}

// =============================================================================
// Backends
// =============================================================================

/// Key-value storage provided by the host.
pub trait LayoutPersistence {
    /// Returns the value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: Value) -> Result<()>;
}

/// Volatile storage, for tests and hosts without a data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    entries: HashMap<String, Value>,
    writes: usize,
}

impl MemoryPersistence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, bypassing record encoding.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl LayoutPersistence for MemoryPersistence {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}

/// All layout records in a single JSON document on disk.
///
/// The document is read once on open and rewritten on every write, so the
/// file always reflects the last committed gesture.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonFilePersistence {
    /// Opens the layout document in the default data directory.
    ///
    /// Returns a tuple of (persistence, optional_warning). An unreadable
    /// document is replaced by an empty one and reported in the warning.
    pub fn open() -> (Option<Self>, Option<String>) {
        Self::open_in(None)
    }

    /// Opens the layout document inside `base_dir` (or the default data
    /// directory when `None`).
    pub fn open_in(base_dir: Option<PathBuf>) -> (Option<Self>, Option<String>) {
        let Some(mut path) = paths::get_app_data_dir_with_override(base_dir) else {
            return (None, Some("notification-layout-path-error".to_string()));
        };
        path.push(LAYOUTS_FILE);
        let (persistence, warning) = Self::open_path(path);
        (Some(persistence), warning)
    }

    /// Opens the layout document at an explicit path.
    pub fn open_path(path: PathBuf) -> (Self, Option<String>) {
        if !path.exists() {
            return (
                Self {
                    path,
                    entries: Map::new(),
                },
                None,
            );
        }

        match Self::read_document(&path) {
            Ok(entries) => (Self { path, entries }, None),
            Err(error) => {
                log::warn!(
                    "Ignoring unreadable layout document {}: {}",
                    path.display(),
                    error
                );
                (
                    Self {
                        path,
                        entries: Map::new(),
                    },
                    Some("notification-layout-read-error".to_string()),
                )
            }
        }
    }

    fn read_document(path: &Path) -> Result<Map<String, Value>> {
        let reader = BufReader::new(fs::File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    fn write_document(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(fs::File::create(&self.path)?);
        serde_json::to_writer_pretty(writer, &self.entries)?;
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LayoutPersistence for JsonFilePersistence {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.write_document()
    }
}
