//! Sandbox settings
//!
//! Loaded from a JSON file; any field left out keeps its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::Rect;
use crate::vec2;

/// Tuning for the sandbox and its fixed layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// Capacity bound enforced by the per-tick eviction pass
    pub max_objects: usize,
    /// How long the invalid-combination marker stays up (seconds)
    pub invalid_mark_secs: f32,

    // === Objects ===
    /// Where catalog spawns are placed
    pub spawn_origin: Vec2,
    /// Pointer offset from an instance's top-left while dragging
    pub drag_anchor: Vec2,
    /// Size of an instance's bounding box
    pub instance_size: Vec2,

    // === Layout ===
    /// Dropping an instance here deletes it
    pub trash: Rect,
    /// Top-left of the first sidebar row
    pub sidebar_origin: Vec2,
    /// Clickable size of one sidebar row
    pub sidebar_row: Vec2,
    /// Width of the view; the sidebar strip hugs its right edge
    pub view_width: f32,
    /// Visible height of the sidebar
    pub view_height: f32,
    /// Pixels per scroll-wheel step
    pub scroll_step: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_objects: MAX_OBJECTS,
            invalid_mark_secs: INVALID_MARK_SECS,

            spawn_origin: vec2(SPAWN_ORIGIN),
            drag_anchor: vec2(DRAG_ANCHOR),
            instance_size: vec2(INSTANCE_SIZE),

            trash: Rect::new(vec2(TRASH_POS), vec2(TRASH_SIZE)),
            sidebar_origin: vec2(SIDEBAR_ORIGIN),
            sidebar_row: vec2(SIDEBAR_ROW),
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            scroll_step: SCROLL_STEP,
        }
    }
}

impl Settings {
    /// Same defaults with a different capacity bound
    pub fn with_max_objects(max_objects: usize) -> Self {
        Self {
            max_objects,
            ..Self::default()
        }
    }

    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    ///
    /// A missing file is not an error: defaults are used and a warning logged.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("{} not found, using default settings", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break the simulation's invariants
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_objects == 0 {
            return Err(SettingsError::Invalid {
                field: "max_objects",
                reason: "must be at least 1".into(),
            });
        }
        if !(self.invalid_mark_secs > 0.0) {
            return Err(SettingsError::Invalid {
                field: "invalid_mark_secs",
                reason: format!("must be positive, got {}", self.invalid_mark_secs),
            });
        }
        for (field, size) in [
            ("instance_size", self.instance_size),
            ("sidebar_row", self.sidebar_row),
            ("trash", self.trash.size),
        ] {
            if !(size.x > 0.0 && size.y > 0.0) {
                return Err(SettingsError::Invalid {
                    field,
                    reason: format!("size must be positive, got {size}"),
                });
            }
        }
        Ok(())
    }
}
