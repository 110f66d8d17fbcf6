//! Little Alchemist - an element-combination sandbox
//!
//! Core modules:
//! - `sim`: Deterministic simulation (catalog, combinations, world objects, drag/drop)
//! - `ui`: Presentation-facing view models (element encyclopedia)
//! - `settings`: Data-driven tuning loaded from JSON
//! - `error`: Error types shared by the simulation

pub mod error;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::{SettingsError, SimError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed frame timestep used by the headless demo (60 Hz, like the window limit)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Maximum objects allowed in the sandbox at the end of a tick
    pub const MAX_OBJECTS: usize = 50;

    /// Window dimensions
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Where catalog spawns land (center of the sandbox)
    pub const SPAWN_ORIGIN: (f32, f32) = (400.0, 300.0);
    /// Pointer offset from an instance's top-left corner while dragging
    pub const DRAG_ANCHOR: (f32, f32) = (25.0, 25.0);
    /// On-screen size of a placed instance (50% scaled icon)
    pub const INSTANCE_SIZE: (f32, f32) = (50.0, 50.0);

    /// Seconds an invalid-combination marker stays visible
    pub const INVALID_MARK_SECS: f32 = 1.0;

    /// Trash bin, bottom-left corner
    pub const TRASH_POS: (f32, f32) = (10.0, VIEW_HEIGHT - 74.0);
    pub const TRASH_SIZE: (f32, f32) = (64.0, 64.0);

    /// Right-hand sidebar listing discovered elements
    pub const SIDEBAR_ORIGIN: (f32, f32) = (705.0, 10.0);
    pub const SIDEBAR_ROW: (f32, f32) = (100.0, 30.0);
    /// Pixels per scroll-wheel step
    pub const SCROLL_STEP: f32 = 30.0;
}

/// Midpoint between two positions
#[inline]
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) / 2.0
}

/// Build a `Vec2` from a `(x, y)` constant tuple
#[inline]
pub fn vec2(t: (f32, f32)) -> Vec2 {
    Vec2::new(t.0, t.1)
}
