//! Drop-zone classification: pointer inside a target → drop position.
//!
//! With edge fraction `f`, a target rectangle is split into four edge bands
//! of depth `f` and a middle region:
//!
//! ```text
//!   ┌──────────── top ────────────┐
//!   │ left │    inside    │ right │
//!   └─────────── bottom ──────────┘
//! ```
//!
//! Containers nest anything dropped in the middle (or anywhere, when empty).
//! The corners belong to top/bottom: the checks run top → bottom → left →
//! right, and that order is part of the contract.

use crate::geometry::{Point, Rect};
use pb_core::{ComponentNode, DropPosition};

/// Classify a pointer position over `rect`.
///
/// `accepts_children` says whether an `inside` drop is legal at all;
/// `is_empty` lets an empty container take the drop from anywhere in it.
pub fn classify_drop(
    pointer: Point,
    rect: &Rect,
    accepts_children: bool,
    is_empty: bool,
    edge_fraction: f32,
) -> DropPosition {
    let (rx, ry) = rect.relative(pointer);
    let (w, h) = (rect.width, rect.height);

    let top_edge = h * edge_fraction;
    let bottom_edge = h * (1.0 - edge_fraction);
    let left_edge = w * edge_fraction;
    let right_edge = w * (1.0 - edge_fraction);

    let in_middle = rx > left_edge && rx < right_edge && ry > top_edge && ry < bottom_edge;
    if accepts_children && (is_empty || in_middle) {
        return DropPosition::Inside;
    }

    if ry <= top_edge {
        DropPosition::Top
    } else if ry >= bottom_edge {
        DropPosition::Bottom
    } else if rx <= left_edge {
        DropPosition::Left
    } else if rx >= right_edge {
        DropPosition::Right
    } else {
        // Middle of something that cannot nest.
        DropPosition::Bottom
    }
}

/// Classify a pointer over `target`, deriving nestability from the node.
///
/// Only container tags holding a child list (not text) take `inside` drops.
pub fn classify_for_node(
    pointer: Point,
    rect: &Rect,
    target: &ComponentNode,
    edge_fraction: f32,
) -> DropPosition {
    let accepts = target.accepts_children() && target.has_child_list();
    classify_drop(
        pointer,
        rect,
        accepts,
        target.is_empty_container(),
        edge_fraction,
    )
}
