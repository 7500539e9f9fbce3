//! Axis-aligned bounding boxes for item hit testing
//!
//! Screen space: origin bottom-left, y up. A box is stored by its min and max
//! corners; containment is inclusive on every edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Check if a point lies inside or on the edge of the box
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}
