//! Axis-aligned rectangles for hit-testing and overlap
//!
//! Instances, the trash bin and sidebar rows are all boxes in screen space
//! (y grows downward). Overlap is strict: boxes that only share an edge do
//! not intersect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height (non-negative)
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Point containment, half-open on the far edges
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.pos.x && point.x < max.x && point.y >= self.pos.y && point.y < max.y
    }

    /// True if the two boxes share a region of non-zero area
    pub fn intersects(&self, other: &Rect) -> bool {
        let lo = self.min().max(other.min());
        let hi = self.max().min(other.max());
        lo.x < hi.x && lo.y < hi.y
    }
}
