//! Read-only traversal primitives over a component tree.
//!
//! Every function here is a plain depth-first walk, O(tree size). There is
//! no id index: callers that need repeated lookups against the same version
//! may memoize the results themselves.

use crate::id::NodeId;
use crate::model::ComponentNode;

/// Find the node with `id` anywhere under (and including) `root`.
pub fn find_by_id(root: &ComponentNode, id: NodeId) -> Option<&ComponentNode> {
    if root.id == id {
        return Some(root);
    }
    root.child_nodes()
        .iter()
        .find_map(|child| find_by_id(child, id))
}

/// Find the parent of the node with `id`. The root has no parent.
pub fn find_parent(root: &ComponentNode, id: NodeId) -> Option<&ComponentNode> {
    for child in root.child_nodes() {
        if child.id == id {
            return Some(root);
        }
        if let Some(parent) = find_parent(child, id) {
            return Some(parent);
        }
    }
    None
}

/// `true` if `id` names a strict descendant of `node`.
///
/// `is_ancestor(node, node.id)` is `false`; callers veto self-drops separately.
pub fn is_ancestor(node: &ComponentNode, id: NodeId) -> bool {
    node.child_nodes()
        .iter()
        .any(|child| child.id == id || is_ancestor(child, id))
}

/// Every id in the tree, in pre-order, root first.
pub fn collect_ids(root: &ComponentNode) -> Vec<NodeId> {
    let mut ids = Vec::new();
    collect_into(root, &mut ids);
    ids
}

fn collect_into(node: &ComponentNode, out: &mut Vec<NodeId>) {
    out.push(node.id);
    for child in node.child_nodes() {
        collect_into(child, out);
    }
}

/// Pre-order ids of every node that may be picked up and dragged:
/// everything except the reserved root id.
pub fn draggable_ids(root: &ComponentNode) -> Vec<NodeId> {
    let mut ids = collect_ids(root);
    ids.retain(|id| !id.is_root());
    ids
}

/// Child-index path from `root` to the node with `id`.
///
/// The root itself resolves to an empty path.
pub fn path_to(root: &ComponentNode, id: NodeId) -> Option<Vec<usize>> {
    let mut path = Vec::new();
    if path_into(root, id, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn path_into(node: &ComponentNode, id: NodeId, path: &mut Vec<usize>) -> bool {
    if node.id == id {
        return true;
    }
    for (i, child) in node.child_nodes().iter().enumerate() {
        path.push(i);
        if path_into(child, id, path) {
            return true;
        }
        path.pop();
    }
    false
}

/// Follow a child-index path from `root`.
pub fn node_at<'a>(root: &'a ComponentNode, path: &[usize]) -> Option<&'a ComponentNode> {
    path.iter()
        .try_fold(root, |node, &i| node.child_nodes().get(i).map(|c| &**c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(list: &[&str]) -> Vec<NodeId> {
        list.iter().map(|s| NodeId::intern(s)).collect()
    }

    /// root ─┬─ A
    ///       └─ B ── C ── D
    fn sample() -> ComponentNode {
        ComponentNode::new("root", "div").with_children(vec![
            ComponentNode::new("A", "div"),
            ComponentNode::new("B", "section").with_children(vec![
                ComponentNode::new("C", "div")
                    .with_children(vec![ComponentNode::text("D", "p", "deep")]),
            ]),
        ])
    }

    #[test]
    fn find_by_id_walks_whole_tree() {
        let root = sample();
        assert_eq!(find_by_id(&root, NodeId::intern("root")).unwrap().id.as_str(), "root");
        assert_eq!(
            find_by_id(&root, NodeId::intern("D")).unwrap().text_content(),
            Some("deep")
        );
        assert!(find_by_id(&root, NodeId::intern("missing")).is_none());
    }

    #[test]
    fn find_parent_of_nested_and_root() {
        let root = sample();
        assert_eq!(find_parent(&root, NodeId::intern("C")).unwrap().id.as_str(), "B");
        assert_eq!(find_parent(&root, NodeId::intern("A")).unwrap().id.as_str(), "root");
        assert!(find_parent(&root, NodeId::intern("root")).is_none());
        assert!(find_parent(&root, NodeId::intern("missing")).is_none());
    }

    #[test]
    fn is_ancestor_is_strict() {
        let root = sample();
        let b = find_by_id(&root, NodeId::intern("B")).unwrap();
        assert!(is_ancestor(b, NodeId::intern("C")));
        assert!(is_ancestor(b, NodeId::intern("D")));
        assert!(!is_ancestor(b, NodeId::intern("B")));
        assert!(!is_ancestor(b, NodeId::intern("A")));
    }

    #[test]
    fn ids_are_preorder() {
        let root = sample();
        assert_eq!(collect_ids(&root), ids(&["root", "A", "B", "C", "D"]));
        assert_eq!(draggable_ids(&root), ids(&["A", "B", "C", "D"]));
    }

    #[test]
    fn paths_resolve_back_to_nodes() {
        let root = sample();
        assert_eq!(path_to(&root, NodeId::intern("root")), Some(vec![]));
        let path = path_to(&root, NodeId::intern("D")).unwrap();
        assert_eq!(path, vec![1, 0, 0]);
        assert_eq!(node_at(&root, &path).unwrap().id.as_str(), "D");
        assert!(node_at(&root, &[5]).is_none());
    }
}
