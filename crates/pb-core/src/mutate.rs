//! Tree mutations that produce a new tree version.
//!
//! The input tree is never touched. Only the nodes on the path from an
//! edited node up to the root are reallocated; every other subtree is
//! shared with the previous version through its `Arc`.
//!
//! A refused edit returns the original tree (the same `Arc`). The `try_*`
//! variants report why; the plain variants log the reason and carry on,
//! since stale pointer events racing a fresh tree are routine.

use crate::error::{ErrorClass, TreeError};
use crate::id::NodeId;
use crate::model::{Children, ComponentNode};
use crate::tree::{find_by_id, is_ancestor, node_at, path_to};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ─── Drop position ───────────────────────────────────────────────────────

/// Where a dragged node lands relative to its drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    /// Appended as the target's last child.
    Inside,
    /// Sibling, immediately before the target.
    Top,
    /// Sibling, immediately after the target.
    Bottom,
    /// Sibling, immediately before the target.
    Left,
    /// Sibling, immediately after the target.
    Right,
}

impl DropPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            DropPosition::Inside => "inside",
            DropPosition::Top => "top",
            DropPosition::Bottom => "bottom",
            DropPosition::Left => "left",
            DropPosition::Right => "right",
        }
    }

    fn inserts_after(self) -> bool {
        matches!(self, DropPosition::Bottom | DropPosition::Right)
    }
}

// ─── Move ────────────────────────────────────────────────────────────────

/// Relocate `active` relative to `target`, or return the original tree.
pub fn move_node(
    root: &Arc<ComponentNode>,
    active: NodeId,
    target: NodeId,
    position: DropPosition,
) -> Arc<ComponentNode> {
    match try_move_node(root, active, target, position) {
        Ok(next) => next,
        Err(err) => {
            report_refusal(&err, "move");
            Arc::clone(root)
        }
    }
}

/// Relocate `active` relative to `target`.
///
/// # Errors
/// Every precondition is checked here, regardless of what the caller
/// already validated. On error nothing has been built.
pub fn try_move_node(
    root: &Arc<ComponentNode>,
    active: NodeId,
    target: NodeId,
    position: DropPosition,
) -> Result<Arc<ComponentNode>, TreeError> {
    if active == target {
        return Err(TreeError::SelfDrop);
    }
    if active == root.id || active.is_root() {
        return Err(TreeError::RootNotDraggable);
    }

    let active_path = path_to(root, active).ok_or(TreeError::NodeNotFound(active))?;
    let active_node = node_at(root, &active_path)
        .ok_or_else(|| TreeError::Invariant(format!("path to {active} does not resolve")))?;
    if is_ancestor(active_node, target) {
        return Err(TreeError::DescendantDrop { active, target });
    }
    if find_by_id(root, target).is_none() {
        return Err(TreeError::NodeNotFound(target));
    }

    // Step 1: detach `active` from its parent.
    let (&active_index, parent_path) = active_path
        .split_last()
        .ok_or_else(|| TreeError::Invariant(format!("{active} has no parent")))?;
    let mut moved = None;
    let detached = rebuild_along(root, parent_path, |parent| {
        let mut kids = parent.child_nodes().to_vec();
        if active_index >= kids.len() {
            return Err(TreeError::Invariant(format!(
                "{active} missing from parent {}",
                parent.id
            )));
        }
        moved = Some(kids.remove(active_index));
        Ok(Children::Nodes(kids))
    })?;
    let moved = moved.ok_or_else(|| TreeError::Invariant(format!("{active} was not detached")))?;

    // Step 2: re-resolve the target in the detached tree. Its index may have
    // shifted if it shared a parent with `active`.
    let target_path = path_to(&detached, target).ok_or(TreeError::NodeNotFound(target))?;

    let next = match position {
        DropPosition::Inside => rebuild_along(&detached, &target_path, |node| {
            match &node.children {
                Children::Nodes(kids) => {
                    let mut kids = kids.clone();
                    kids.push(moved);
                    Ok(Children::Nodes(kids))
                }
                Children::Text(_) => Err(TreeError::NotAContainer(target)),
            }
        })?,
        sibling => {
            let (&target_index, parent_path) = target_path
                .split_last()
                .ok_or(TreeError::ParentNotFound(target))?;
            let at = if sibling.inserts_after() {
                target_index + 1
            } else {
                target_index
            };
            rebuild_along(&detached, parent_path, |parent| {
                let mut kids = parent.child_nodes().to_vec();
                if at > kids.len() {
                    return Err(TreeError::Invariant(format!(
                        "insert index {at} out of range under {}",
                        parent.id
                    )));
                }
                kids.insert(at, moved);
                Ok(Children::Nodes(kids))
            })?
        }
    };

    log::debug!("moved {active} {} {target}", position.as_str());
    Ok(next)
}

// ─── Text ────────────────────────────────────────────────────────────────

/// Replace the text content of a text node, or return the original tree.
pub fn update_text(root: &Arc<ComponentNode>, id: NodeId, text: &str) -> Arc<ComponentNode> {
    match try_update_text(root, id, text) {
        Ok(next) => next,
        Err(err) => {
            report_refusal(&err, "text commit");
            Arc::clone(root)
        }
    }
}

/// Replace the text content of a text node.
///
/// # Errors
/// `NodeNotFound` for unknown ids, `NotTextNode` when the node holds
/// children rather than text.
pub fn try_update_text(
    root: &Arc<ComponentNode>,
    id: NodeId,
    text: &str,
) -> Result<Arc<ComponentNode>, TreeError> {
    let path = path_to(root, id).ok_or(TreeError::NodeNotFound(id))?;
    rebuild_along(root, &path, |node| match node.children {
        Children::Text(_) => Ok(Children::Text(text.to_string())),
        Children::Nodes(_) => Err(TreeError::NotTextNode(id)),
    })
}

// ─── Path rebuilding ─────────────────────────────────────────────────────

/// Rebuild `node` with the node at `path` given new children from `edit`.
///
/// Only the nodes along `path` are reallocated; siblings are `Arc` clones.
fn rebuild_along<F>(
    node: &Arc<ComponentNode>,
    path: &[usize],
    edit: F,
) -> Result<Arc<ComponentNode>, TreeError>
where
    F: FnOnce(&ComponentNode) -> Result<Children, TreeError>,
{
    let Some((&first, rest)) = path.split_first() else {
        let children = edit(node)?;
        return Ok(Arc::new(with_children(node, children)));
    };

    let kids = node.child_nodes();
    let child = kids.get(first).ok_or_else(|| {
        TreeError::Invariant(format!("child {first} of {} does not exist", node.id))
    })?;
    let new_child = rebuild_along(child, rest, edit)?;

    let mut new_kids = kids.to_vec();
    new_kids[first] = new_child;
    Ok(Arc::new(with_children(node, Children::Nodes(new_kids))))
}

fn with_children(node: &ComponentNode, children: Children) -> ComponentNode {
    ComponentNode {
        id: node.id,
        kind: node.kind.clone(),
        props: node.props.clone(),
        children,
        action_id: node.action_id.clone(),
    }
}

fn report_refusal(err: &TreeError, what: &str) {
    match err.class() {
        ErrorClass::LookupFailure => log::debug!("{what} ignored: {err}"),
        ErrorClass::InvalidMove => log::warn!("{what} rejected: {err}"),
        ErrorClass::InvariantViolation => {
            log::error!("{what} aborted: {err}");
            debug_assert!(false, "{what} aborted: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::collect_ids;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> NodeId {
        NodeId::intern(s)
    }

    fn child_ids(node: &ComponentNode) -> Vec<&str> {
        node.child_nodes().iter().map(|c| c.id.as_str()).collect()
    }

    /// root ─┬─ A (div, empty)
    ///       └─ B (div) ── C (div, empty)
    fn nesting_fixture() -> Arc<ComponentNode> {
        Arc::new(ComponentNode::new("root", "div").with_children(vec![
            ComponentNode::new("A", "div"),
            ComponentNode::new("B", "div").with_children(vec![ComponentNode::new("C", "div")]),
        ]))
    }

    #[test]
    fn nest_into_empty_container() {
        let root = nesting_fixture();
        let next = move_node(&root, id("C"), id("A"), DropPosition::Inside);

        assert_eq!(child_ids(&next), vec!["A", "B"]);
        assert_eq!(child_ids(&next.child_nodes()[0]), vec!["C"]);
        assert!(next.child_nodes()[1].is_empty_container());
    }

    #[test]
    fn left_of_next_sibling_keeps_order() {
        let root = Arc::new(ComponentNode::new("root", "div").with_children(vec![
            ComponentNode::text("A", "p", "a"),
            ComponentNode::text("B", "p", "b"),
        ]));
        let next = try_move_node(&root, id("A"), id("B"), DropPosition::Left).unwrap();
        assert_eq!(child_ids(&next), vec!["A", "B"]);
    }

    #[test]
    fn sibling_index_is_recomputed_after_removal() {
        let root = Arc::new(ComponentNode::new("root", "div").with_children(vec![
            ComponentNode::new("A", "div"),
            ComponentNode::new("B", "div"),
            ComponentNode::new("C", "div"),
            ComponentNode::new("D", "div"),
        ]));

        let next = move_node(&root, id("A"), id("C"), DropPosition::Bottom);
        assert_eq!(child_ids(&next), vec!["B", "C", "A", "D"]);

        let next = move_node(&root, id("A"), id("C"), DropPosition::Top);
        assert_eq!(child_ids(&next), vec!["B", "A", "C", "D"]);

        let next = move_node(&root, id("D"), id("A"), DropPosition::Left);
        assert_eq!(child_ids(&next), vec!["D", "A", "B", "C"]);

        let next = move_node(&root, id("B"), id("D"), DropPosition::Right);
        assert_eq!(child_ids(&next), vec!["A", "C", "D", "B"]);
    }

    #[test]
    fn sibling_across_parents() {
        let root = nesting_fixture();
        let next = move_node(&root, id("C"), id("A"), DropPosition::Top);
        assert_eq!(child_ids(&next), vec!["C", "A", "B"]);
        assert!(next.child_nodes()[2].is_empty_container());
    }

    #[test]
    fn self_and_descendant_drops_are_noops() {
        let root = nesting_fixture();
        for pos in [
            DropPosition::Inside,
            DropPosition::Top,
            DropPosition::Bottom,
            DropPosition::Left,
            DropPosition::Right,
        ] {
            let same = move_node(&root, id("B"), id("B"), pos);
            assert!(Arc::ptr_eq(&same, &root));
            let same = move_node(&root, id("B"), id("C"), pos);
            assert!(Arc::ptr_eq(&same, &root));
        }
        assert_eq!(
            try_move_node(&root, id("B"), id("C"), DropPosition::Inside),
            Err(TreeError::DescendantDrop {
                active: id("B"),
                target: id("C")
            })
        );
    }

    #[test]
    fn root_cannot_move() {
        let root = nesting_fixture();
        assert_eq!(
            try_move_node(&root, id("root"), id("A"), DropPosition::Inside),
            Err(TreeError::RootNotDraggable)
        );
    }

    #[test]
    fn unknown_ids_are_lookup_failures() {
        let root = nesting_fixture();
        let err = try_move_node(&root, id("ghost"), id("A"), DropPosition::Inside).unwrap_err();
        assert_eq!(err, TreeError::NodeNotFound(id("ghost")));
        assert_eq!(err.class(), ErrorClass::LookupFailure);

        let err = try_move_node(&root, id("A"), id("ghost"), DropPosition::Top).unwrap_err();
        assert_eq!(err, TreeError::NodeNotFound(id("ghost")));
    }

    #[test]
    fn sibling_of_root_has_no_parent() {
        let root = nesting_fixture();
        assert_eq!(
            try_move_node(&root, id("A"), id("root"), DropPosition::Bottom),
            Err(TreeError::ParentNotFound(id("root")))
        );
        let next = move_node(&root, id("C"), id("root"), DropPosition::Inside);
        assert_eq!(child_ids(&next), vec!["A", "B", "C"]);
    }

    #[test]
    fn inside_text_node_is_rejected() {
        let root = Arc::new(ComponentNode::new("root", "div").with_children(vec![
            ComponentNode::text("T", "div", "label"),
            ComponentNode::new("A", "div"),
        ]));
        let same = move_node(&root, id("A"), id("T"), DropPosition::Inside);
        assert!(Arc::ptr_eq(&same, &root));
        assert_eq!(
            try_move_node(&root, id("A"), id("T"), DropPosition::Inside),
            Err(TreeError::NotAContainer(id("T")))
        );
    }

    #[test]
    fn untouched_subtrees_are_shared() {
        let root = Arc::new(ComponentNode::new("root", "div").with_children(vec![
            ComponentNode::new("A", "div").with_children(vec![ComponentNode::text("A1", "p", "x")]),
            ComponentNode::new("B", "div").with_children(vec![ComponentNode::text("B1", "p", "y")]),
            ComponentNode::new("C", "div").with_children(vec![ComponentNode::text("C1", "p", "z")]),
        ]));
        let next = move_node(&root, id("B1"), id("A1"), DropPosition::Bottom);

        assert_eq!(child_ids(&next.child_nodes()[0]), vec!["A1", "B1"]);
        assert!(next.child_nodes()[1].is_empty_container());
        // C was on neither path.
        assert!(Arc::ptr_eq(&next.child_nodes()[2], &root.child_nodes()[2]));
        // The moved leaf is reused, not copied.
        assert!(Arc::ptr_eq(
            &next.child_nodes()[0].child_nodes()[1],
            &root.child_nodes()[1].child_nodes()[0]
        ));
        // The input is unchanged.
        assert_eq!(child_ids(&root.child_nodes()[1]), vec!["B1"]);
    }

    #[test]
    fn moved_id_appears_once() {
        let root = nesting_fixture();
        let next = move_node(&root, id("C"), id("A"), DropPosition::Inside);
        let count = collect_ids(&next).iter().filter(|&&i| i == id("C")).count();
        assert_eq!(count, 1);
        assert_eq!(collect_ids(&next).len(), collect_ids(&root).len());
    }

    #[test]
    fn text_commit_replaces_only_text() {
        let root = Arc::new(ComponentNode::new("root", "div").with_children(vec![
            ComponentNode::text("title", "h1", "Hello"),
            ComponentNode::new("box", "div"),
        ]));
        let next = update_text(&root, id("title"), "Welcome");
        assert_eq!(next.child_nodes()[0].text_content(), Some("Welcome"));
        assert!(Arc::ptr_eq(&next.child_nodes()[1], &root.child_nodes()[1]));

        assert_eq!(
            try_update_text(&root, id("box"), "nope"),
            Err(TreeError::NotTextNode(id("box")))
        );
        assert!(Arc::ptr_eq(&update_text(&root, id("ghost"), "x"), &root));
    }
}
