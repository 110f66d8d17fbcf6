//! Drop resolution: fuse or reject
//!
//! When a dragged instance is released, scan the others in registry order
//! for overlaps. The first overlapping partner with a matching rule fuses
//! with it; every overlapping partner without one gets rejection feedback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::{ElementCatalog, ElementId};
use super::combos::CombinationRegistry;
use super::world::{InstanceId, WorldRegistry};
use crate::error::SimError;
use crate::midpoint;

/// Red X shown where a combination failed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvalidMarker {
    pub pos: Vec2,
    /// Visible while the clock is strictly below this
    pub expires_at: f32,
}

impl InvalidMarker {
    pub fn is_active(&self, now: f32) -> bool {
        now < self.expires_at
    }
}

/// What a single release produced
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Two instances fused into a new one
    Combined {
        /// Elements of the dragged and partner instances
        inputs: (ElementId, ElementId),
        result: ElementId,
        instance: InstanceId,
        /// First time this element was ever made
        first_discovery: bool,
    },
    /// Overlapped only instances with no matching rule
    Rejected { misses: usize },
    /// Overlapped nothing
    NoContact,
}

/// Mutable stores the resolver works on
pub struct DropContext<'a> {
    pub world: &'a mut WorldRegistry,
    pub catalog: &'a mut ElementCatalog,
    pub registry: &'a CombinationRegistry,
    pub marker: &'a mut Option<InvalidMarker>,
    pub mark_secs: f32,
}

/// Resolve the release of `dragged` at `time`.
///
/// Only one combination happens per release. An id that is no longer in the
/// world resolves to [`DropOutcome::NoContact`].
pub fn resolve_drop(
    ctx: DropContext<'_>,
    dragged: InstanceId,
    time: f32,
) -> Result<DropOutcome, SimError> {
    let DropContext {
        world,
        catalog,
        registry,
        marker,
        mark_secs,
    } = ctx;

    let Some(released) = world.get(dragged) else {
        return Ok(DropOutcome::NoContact);
    };
    let (d_elem, d_pos) = (released.element, released.pos);
    let d_rect = world.rect_at(d_pos);

    // Snapshot candidates first; the scan mutates rejected flags
    let candidates: Vec<(InstanceId, ElementId, Vec2)> = world
        .iter()
        .filter(|o| o.id != dragged && !o.dragging)
        .filter(|o| world.rect_at(o.pos).intersects(&d_rect))
        .map(|o| (o.id, o.element, o.pos))
        .collect();

    if candidates.is_empty() {
        return Ok(DropOutcome::NoContact);
    }

    let mut misses = 0;
    for (other, o_elem, o_pos) in candidates {
        let at = midpoint(d_pos, o_pos);
        match registry.resolve(d_elem, o_elem) {
            Some(result) => {
                let first_discovery = catalog.mark_discovered(result)?;
                catalog.increment_created(result)?;
                let instance = world.spawn(result, at, time);
                world.remove(dragged);
                world.remove(other);
                return Ok(DropOutcome::Combined {
                    inputs: (d_elem, o_elem),
                    result,
                    instance,
                    first_discovery,
                });
            }
            None => {
                *marker = Some(InvalidMarker {
                    pos: at,
                    expires_at: time + mark_secs,
                });
                if let Some(obj) = world.get_mut(other) {
                    obj.rejected = true;
                }
                misses += 1;
            }
        }
    }

    Ok(DropOutcome::Rejected { misses })
}
