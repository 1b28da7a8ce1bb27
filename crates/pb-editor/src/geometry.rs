//! Pointer and layout geometry supplied by the host.
//!
//! The editor never measures anything itself. The host sends a fresh
//! `GeometrySnapshot` with every drag-over event, since layout shifts
//! between frames; snapshots must not be kept across events.

use pb_core::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A pointer position in the host's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance. Ordering-equivalent to the real distance.
    pub fn distance_sq(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// A node's bounding box, as measured by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Edge-inclusive containment.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left
            && p.x <= self.left + self.width
            && p.y >= self.top
            && p.y <= self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// `p` relative to the top-left corner.
    pub fn relative(&self, p: Point) -> (f32, f32) {
        (p.x - self.left, p.y - self.top)
    }
}

/// Bounding boxes for every node the host currently has on screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeometrySnapshot {
    rects: HashMap<NodeId, Rect>,
}

impl GeometrySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: NodeId, rect: Rect) {
        self.rects.insert(id, rect);
    }

    pub fn get(&self, id: NodeId) -> Option<&Rect> {
        self.rects.get(&id)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl FromIterator<(NodeId, Rect)> for GeometrySnapshot {
    fn from_iter<I: IntoIterator<Item = (NodeId, Rect)>>(iter: I) -> Self {
        Self {
            rects: iter.into_iter().collect(),
        }
    }
}
