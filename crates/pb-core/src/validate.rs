//! Structural diagnostics for component trees.
//!
//! Reports problems without modifying the tree. `Error` findings break the
//! editor's invariants and make `Document::from_json` refuse the input;
//! `Info` findings are reported to the host for display only.

use crate::id::{NodeId, ROOT_ID};
use crate::model::{Children, ComponentNode};
use serde::Serialize;
use std::collections::HashSet;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Violates a tree invariant. The document cannot be edited.
    Error,
    /// Legal, but probably not what the author intended.
    Info,
}

/// A single finding for one node.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeDiagnostic {
    pub node_id: NodeId,
    pub message: String,
    pub severity: Severity,
    /// Short rule identifier (e.g. "duplicate-id", "root-id").
    pub rule: &'static str,
}

// ─── Public API ──────────────────────────────────────────────────────────

/// Run all rules over the tree and return diagnostics in pre-order.
#[must_use]
pub fn validate_tree(root: &ComponentNode) -> Vec<TreeDiagnostic> {
    let mut diags = Vec::new();
    check_root_id(root, &mut diags);
    let mut seen = HashSet::new();
    walk(root, &mut seen, &mut diags);
    diags
}

/// `true` if any diagnostic is an `Error`.
pub fn has_errors(diags: &[TreeDiagnostic]) -> bool {
    diags.iter().any(|d| d.severity == Severity::Error)
}

// ─── Rules ───────────────────────────────────────────────────────────────

fn check_root_id(root: &ComponentNode, diags: &mut Vec<TreeDiagnostic>) {
    if !root.id.is_root() {
        diags.push(TreeDiagnostic {
            node_id: root.id,
            message: format!(
                "Top-level node is `{}`, but the document root must use the reserved id `{ROOT_ID}`.",
                root.id
            ),
            severity: Severity::Error,
            rule: "root-id",
        });
    }
}

fn walk(node: &ComponentNode, seen: &mut HashSet<NodeId>, diags: &mut Vec<TreeDiagnostic>) {
    if node.id.as_str().is_empty() {
        diags.push(TreeDiagnostic {
            node_id: node.id,
            message: format!("A `{}` node has an empty id.", node.kind.as_str()),
            severity: Severity::Error,
            rule: "empty-id",
        });
    }

    if !seen.insert(node.id) {
        diags.push(TreeDiagnostic {
            node_id: node.id,
            message: format!("Id `{}` is used by more than one node.", node.id),
            severity: Severity::Error,
            rule: "duplicate-id",
        });
    }

    match &node.children {
        Children::Text(_) if node.accepts_children() => diags.push(TreeDiagnostic {
            node_id: node.id,
            message: format!(
                "Container `{}` holds text, so nothing can be dropped inside it.",
                node.id
            ),
            severity: Severity::Info,
            rule: "text-container",
        }),
        Children::Nodes(kids) if !kids.is_empty() && !node.accepts_children() => {
            diags.push(TreeDiagnostic {
                node_id: node.id,
                message: format!(
                    "`{}` is a `{}` with children; it cannot receive further drops.",
                    node.id,
                    node.kind.as_str()
                ),
                severity: Severity::Info,
                rule: "nested-leaf",
            })
        }
        _ => {}
    }

    for child in node.child_nodes() {
        walk(child, seen, diags);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ComponentNode {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn duplicate_ids() {
        let root = parse(
            r#"{"id":"root","type":"div","children":[
                {"id":"a","type":"p","children":"one"},
                {"id":"a","type":"p","children":"two"}
            ]}"#,
        );
        let diags = validate_tree(&root);
        assert!(diags.iter().any(|d| d.rule == "duplicate-id"));
        assert!(has_errors(&diags));
    }

    #[test]
    fn root_must_use_reserved_id() {
        let root = parse(r#"{"id":"page","type":"div"}"#);
        let diags = validate_tree(&root);
        assert!(diags.iter().any(|d| d.rule == "root-id"));
    }

    #[test]
    fn reserved_id_below_root_is_a_duplicate() {
        let root = parse(
            r#"{"id":"root","type":"div","children":[{"id":"root","type":"div"}]}"#,
        );
        assert!(validate_tree(&root).iter().any(|d| d.rule == "duplicate-id"));
    }

    #[test]
    fn informational_rules() {
        let root = parse(
            r#"{"id":"root","type":"div","children":[
                {"id":"label","type":"section","children":"hi"},
                {"id":"btn","type":"Button","children":[{"id":"icon","type":"span","children":"*"}]}
            ]}"#,
        );
        let diags = validate_tree(&root);
        assert!(diags.iter().any(|d| d.rule == "text-container"));
        assert!(diags.iter().any(|d| d.rule == "nested-leaf"));
        assert!(!has_errors(&diags));
    }

    #[test]
    fn clean_document_no_diags() {
        let root = parse(
            r#"{"id":"root","type":"div","children":[
                {"id":"hero","type":"section","children":[{"id":"title","type":"h1","children":"Hi"}]}
            ]}"#,
        );
        assert!(validate_tree(&root).is_empty(), "clean document should have no diagnostics");
    }
}
