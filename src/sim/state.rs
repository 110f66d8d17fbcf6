//! Game state and core simulation types
//!
//! `GameState` is the single owner of the catalog, the combination table
//! and the world. Everything that mutates them goes through here or
//! through the free functions in `input` and `tick`.

use serde::{Deserialize, Serialize};

use super::catalog::{ElementCatalog, ElementId};
use super::collision::InvalidMarker;
use super::combos::CombinationRegistry;
use super::sidebar::Sidebar;
use super::world::{InstanceId, WorldRegistry};
use crate::error::SimError;
use crate::settings::Settings;
use crate::ui::ElementBook;

/// Pointer interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragMode {
    #[default]
    Idle,
    /// Holding an instance; it follows the pointer until release
    Dragging { instance: InstanceId },
}

/// Things that happened during event handling or a tick, for the
/// presentation layer (sound, particles, toasts)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Spawned {
        instance: InstanceId,
        element: ElementId,
    },
    Combined {
        inputs: (ElementId, ElementId),
        result: ElementId,
        instance: InstanceId,
    },
    /// An element was made for the first time
    Discovered { element: ElementId },
    /// A release overlapped instances with no matching rule
    Rejected { misses: usize },
    Trashed {
        instance: InstanceId,
        element: ElementId,
    },
    Evicted {
        instance: InstanceId,
        element: ElementId,
    },
    /// A user action was refused
    Refused(SimError),
}

/// Complete sandbox state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub catalog: ElementCatalog,
    pub registry: CombinationRegistry,
    pub world: WorldRegistry,
    pub sidebar: Sidebar,
    /// Encyclopedia; while open it takes all pointer input
    pub book: ElementBook,
    pub drag: DragMode,
    /// Last failed-combination marker; check [`GameState::active_marker`]
    pub invalid_marker: Option<InvalidMarker>,
    /// Latest clock value seen
    pub time: f32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Standard catalog and recipe book
    pub fn new(settings: Settings) -> Result<Self, SimError> {
        let catalog = ElementCatalog::standard();
        let registry = CombinationRegistry::standard(&catalog)?;
        Ok(Self::with_parts(settings, catalog, registry))
    }

    /// Custom catalog and recipe book (tests, mods)
    pub fn with_parts(
        settings: Settings,
        catalog: ElementCatalog,
        registry: CombinationRegistry,
    ) -> Self {
        let world = WorldRegistry::new(settings.max_objects, settings.instance_size);
        let sidebar = Sidebar::from_settings(&settings);
        Self {
            settings,
            catalog,
            registry,
            world,
            sidebar,
            book: ElementBook::new(),
            drag: DragMode::Idle,
            invalid_marker: None,
            time: 0.0,
            events: Vec::new(),
        }
    }

    /// Explicit user spawn from the catalog at the spawn origin.
    ///
    /// Refused for undiscovered elements and when the sandbox is full;
    /// a refusal changes nothing.
    pub fn spawn_from_catalog(
        &mut self,
        element: ElementId,
        time: f32,
    ) -> Result<InstanceId, SimError> {
        let entry = self.catalog.get(element)?;
        if !entry.discovered {
            return Err(SimError::Undiscovered(entry.name.clone()));
        }
        if self.world.is_full() {
            return Err(SimError::CapacityExceeded {
                max: self.world.max_objects(),
            });
        }

        self.catalog.increment_created(element)?;
        let instance = self.world.spawn(element, self.settings.spawn_origin, time);
        log::debug!("Spawned {} as {:?}", self.catalog.name(element), instance);
        self.push_event(GameEvent::Spawned { instance, element });
        Ok(instance)
    }

    /// Instance currently held by the pointer
    pub fn dragged(&self) -> Option<InstanceId> {
        match self.drag {
            DragMode::Dragging { instance } => Some(instance),
            DragMode::Idle => None,
        }
    }

    /// The invalid marker if it has not expired at the current clock
    pub fn active_marker(&self) -> Option<InvalidMarker> {
        self.active_marker_at(self.time)
    }

    pub fn active_marker_at(&self, now: f32) -> Option<InvalidMarker> {
        self.invalid_marker.filter(|m| m.is_active(now))
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the stored clock; never moves backward
    pub fn advance_clock(&mut self, time: f32) {
        if time > self.time {
            self.time = time;
        }
    }
}
