//! Drop-target resolution: pointer + layout snapshot → target node.
//!
//! Candidates are visited in tree pre-order. Among rectangles containing
//! the pointer at equal center distance the deeper node wins; in the
//! nearest-center fallback the node earlier in the document wins. The
//! dragged node and its whole subtree are never candidates; dropping there
//! would make the tree cyclic.

use crate::config::DragConfig;
use crate::geometry::{GeometrySnapshot, Point};
use pb_core::tree::find_by_id;
use pb_core::{ComponentNode, NodeId};
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    id: NodeId,
    depth: usize,
    dist: f32,
}

/// Pick the node the pointer is over, or the nearest one if it is over none.
///
/// Returns `None` if `active` is not in `root` (a stale event) or no legal
/// candidate has geometry.
pub fn resolve_drop_target(
    root: &ComponentNode,
    active: NodeId,
    pointer: Point,
    geometry: &GeometrySnapshot,
    config: &DragConfig,
) -> Option<NodeId> {
    if find_by_id(root, active).is_none() {
        log::debug!("drag source {active} is not in the current tree");
        return None;
    }

    let mut legal: SmallVec<[(NodeId, usize); 16]> = SmallVec::new();
    legal_targets(root, active, 0, &mut legal);

    let mut direct: Option<Candidate> = None;
    let mut nearest: Option<Candidate> = None;

    for (id, depth) in legal {
        let Some(rect) = geometry.get(id) else {
            continue;
        };
        let c = Candidate {
            id,
            depth,
            dist: rect.center().distance_sq(pointer),
        };

        if rect.contains(pointer)
            && direct.is_none_or(|best| {
                c.dist < best.dist || (c.dist == best.dist && c.depth > best.depth)
            })
        {
            direct = Some(c);
        }
        if config.exclude_root_from_fallback && id == root.id {
            continue;
        }
        if nearest.is_none_or(|best| c.dist < best.dist) {
            nearest = Some(c);
        }
    }

    direct.or(nearest).map(|c| c.id)
}

/// Pre-order walk that skips `active` and everything below it.
fn legal_targets(
    node: &ComponentNode,
    active: NodeId,
    depth: usize,
    out: &mut SmallVec<[(NodeId, usize); 16]>,
) {
    if node.id == active {
        return;
    }
    out.push((node.id, depth));
    for child in node.child_nodes() {
        legal_targets(child, active, depth + 1, out);
    }
}
