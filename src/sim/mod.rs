//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes from the caller, never from a system clock
//! - Stable iteration order (registry insertion order)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod collision;
pub mod combos;
pub mod geom;
pub mod input;
pub mod sidebar;
pub mod state;
pub mod tick;
pub mod world;

pub use catalog::{Element, ElementCatalog, ElementId};
pub use collision::{DropContext, DropOutcome, InvalidMarker, resolve_drop};
pub use combos::{CombinationRegistry, PairKey, STANDARD_RULES};
pub use geom::Rect;
pub use input::{PointerEvent, handle_pointer};
pub use sidebar::Sidebar;
pub use state::{DragMode, GameEvent, GameState};
pub use tick::{TickInput, end_frame, tick};
pub use world::{InstanceId, ObjectInstance, WorldRegistry};
