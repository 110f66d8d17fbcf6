//! World object registry
//!
//! Instances currently placed in the sandbox, kept in insertion order.
//! Registry order doubles as draw order and as collision scan order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::ElementId;
use super::geom::Rect;

/// Unique id of a placed instance, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

/// A draggable occurrence of an element in the sandbox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectInstance {
    pub id: InstanceId,
    pub element: ElementId,
    /// Top-left corner in sandbox coordinates
    pub pos: Vec2,
    /// Clock time of the spawn or combination that produced it
    pub created_at: f32,
    pub dragging: bool,
    /// Shown faded after a failed combination, cleared every tick
    #[serde(skip)]
    pub rejected: bool,
}

/// All placed instances plus the capacity bound
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldRegistry {
    objects: Vec<ObjectInstance>,
    max_objects: usize,
    instance_size: Vec2,
    next_id: u32,
}

impl WorldRegistry {
    pub fn new(max_objects: usize, instance_size: Vec2) -> Self {
        Self {
            objects: Vec::new(),
            max_objects,
            instance_size,
            next_id: 1,
        }
    }

    /// Place a new instance. Never refused: capacity is restored by [`Self::evict_overflow`].
    pub fn spawn(&mut self, element: ElementId, pos: Vec2, time: f32) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        self.objects.push(ObjectInstance {
            id,
            element,
            pos,
            created_at: time,
            dragging: false,
            rejected: false,
        });
        id
    }

    /// Remove an instance, returning it. Absent ids are a no-op.
    pub fn remove(&mut self, id: InstanceId) -> Option<ObjectInstance> {
        let idx = self.index_of(id)?;
        Some(self.objects.remove(idx))
    }

    /// Per-frame maintenance: both passes, every frame
    pub fn tick(&mut self) -> Vec<ObjectInstance> {
        let evicted = self.evict_overflow();
        self.clear_rejections();
        evicted
    }

    /// Remove oldest instances until the bound holds. Equal creation times
    /// evict the earlier-inserted instance first.
    pub fn evict_overflow(&mut self) -> Vec<ObjectInstance> {
        let mut evicted = Vec::new();
        while self.objects.len() > self.max_objects {
            let oldest = self
                .objects
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| a.created_at.total_cmp(&b.created_at))
                .map(|(i, _)| i);
            match oldest {
                Some(idx) => evicted.push(self.objects.remove(idx)),
                None => break,
            }
        }
        if !evicted.is_empty() {
            log::debug!("Evicted {} oldest objects", evicted.len());
        }
        evicted
    }

    /// Reset the transient rejected flag on every instance
    pub fn clear_rejections(&mut self) {
        for obj in &mut self.objects {
            obj.rejected = false;
        }
    }

    /// Set or clear one instance's dragging flag. Does not touch any other
    /// instance; clearing a previous dragger is the caller's job.
    pub fn set_dragging(&mut self, id: InstanceId, dragging: bool) -> bool {
        match self.get_mut(id) {
            Some(obj) => {
                obj.dragging = dragging;
                true
            }
            None => false,
        }
    }

    /// The instance currently being dragged, if any
    pub fn dragging(&self) -> Option<InstanceId> {
        self.objects.iter().find(|o| o.dragging).map(|o| o.id)
    }

    /// Topmost instance under a point (later-inserted draws on top)
    pub fn topmost_at(&self, point: Vec2) -> Option<InstanceId> {
        self.objects
            .iter()
            .rev()
            .find(|o| self.rect_at(o.pos).contains(point))
            .map(|o| o.id)
    }

    pub fn bounds(&self, id: InstanceId) -> Option<Rect> {
        self.get(id).map(|o| self.rect_at(o.pos))
    }

    /// Bounding box an instance would have at `pos`
    pub fn rect_at(&self, pos: Vec2) -> Rect {
        Rect::new(pos, self.instance_size)
    }

    pub fn get(&self, id: InstanceId) -> Option<&ObjectInstance> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut ObjectInstance> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    fn index_of(&self, id: InstanceId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    /// Instances in registry (draw) order
    pub fn iter(&self) -> impl Iterator<Item = &ObjectInstance> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// At or over capacity: explicit spawns are refused
    pub fn is_full(&self) -> bool {
        self.objects.len() >= self.max_objects
    }

    pub fn max_objects(&self) -> usize {
        self.max_objects
    }

    pub fn instance_size(&self) -> Vec2 {
        self.instance_size
    }
}
