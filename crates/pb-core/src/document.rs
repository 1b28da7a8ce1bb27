//! Versioned document handle.
//!
//! A `Document` owns the current tree version. Every accepted edit swaps in
//! a new root and bumps `version`; anyone holding an older `Arc` keeps a
//! consistent snapshot of the tree as it was.

use crate::error::DocumentError;
use crate::id::NodeId;
use crate::model::ComponentNode;
use crate::mutate::{DropPosition, move_node, update_text};
use crate::validate::{Severity, has_errors, validate_tree};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Document {
    root: Arc<ComponentNode>,
    version: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty page: a root `div` with no children.
    pub fn new() -> Self {
        Self {
            root: Arc::new(ComponentNode::new(NodeId::root(), "div")),
            version: 0,
        }
    }

    /// Wrap an existing tree after validating it.
    ///
    /// # Errors
    /// `DocumentError::Invalid` if the tree breaks an invariant
    /// (duplicate ids, wrong root id).
    pub fn from_root(root: ComponentNode) -> Result<Self, DocumentError> {
        let diagnostics = validate_tree(&root);
        if has_errors(&diagnostics) {
            for d in diagnostics.iter().filter(|d| d.severity == Severity::Error) {
                log::warn!("[{}] {}", d.rule, d.message);
            }
            return Err(DocumentError::Invalid { diagnostics });
        }
        Ok(Self {
            root: Arc::new(root),
            version: 0,
        })
    }

    /// Load a document from the host's JSON form.
    ///
    /// # Errors
    /// JSON decode errors, or `DocumentError::Invalid` as for `from_root`.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let root: ComponentNode = serde_json::from_str(json)?;
        Self::from_root(root)
    }

    /// Serialize the current version to JSON.
    ///
    /// # Errors
    /// Only if `props` holds something JSON cannot represent.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&*self.root)
    }

    /// The current tree version.
    pub fn root(&self) -> &Arc<ComponentNode> {
        &self.root
    }

    /// Monotonic counter, bumped on every accepted edit.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Swap in `next` as the current version.
    ///
    /// Returns `false` (and leaves the version alone) if `next` is the
    /// current tree, which is what a refused edit hands back.
    pub fn commit(&mut self, next: Arc<ComponentNode>) -> bool {
        if Arc::ptr_eq(&next, &self.root) {
            return false;
        }
        self.root = next;
        self.version += 1;
        true
    }

    /// Relocate a node. Returns `true` if the tree changed.
    pub fn move_node(&mut self, active: NodeId, target: NodeId, position: DropPosition) -> bool {
        let next = move_node(&self.root, active, target, position);
        self.commit(next)
    }

    /// Commit inline-edited text. Returns `true` if the tree changed.
    pub fn commit_text(&mut self, id: NodeId, text: &str) -> bool {
        let next = update_text(&self.root, id, text);
        self.commit(next)
    }
}
