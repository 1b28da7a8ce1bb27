//! Component tree data model.
//!
//! A document is a single tree of `ComponentNode`s. Each node owns its
//! children exclusively; children are held behind `Arc` so that a new tree
//! version can share every subtree it did not touch with the previous one.
//! Nodes are never edited in place — see `mutate` for how versions are built.

use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

// ─── Node kind ───────────────────────────────────────────────────────────

/// The element tag of a node.
///
/// The set of tags is open; only the container tags accept `inside` drops.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Div,
    Section,
    Header,
    Footer,
    /// Any other tag (`h1`, `p`, `Button`, ...). Never a container.
    Other(String),
}

impl NodeKind {
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Div | NodeKind::Section | NodeKind::Header | NodeKind::Footer
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Div => "div",
            NodeKind::Section => "section",
            NodeKind::Header => "header",
            NodeKind::Footer => "footer",
            NodeKind::Other(tag) => tag,
        }
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        match tag {
            "div" => NodeKind::Div,
            "section" => NodeKind::Section,
            "header" => NodeKind::Header,
            "footer" => NodeKind::Footer,
            other => NodeKind::Other(other.to_string()),
        }
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "div" | "section" | "header" | "footer" => NodeKind::from(tag.as_str()),
            _ => NodeKind::Other(tag),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

// ─── Children ────────────────────────────────────────────────────────────

/// A node's content: an ordered list of child nodes, or literal text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Children {
    Text(String),
    Nodes(Vec<Arc<ComponentNode>>),
}

impl Default for Children {
    fn default() -> Self {
        Children::Nodes(Vec::new())
    }
}

// ─── ComponentNode ───────────────────────────────────────────────────────

/// One element of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    pub id: NodeId,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Opaque element props (class names, inline style, ...). Untouched by the core.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,

    #[serde(default)]
    pub children: Children,

    /// Opaque click-dispatch hook, passed through to the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
}

impl ComponentNode {
    /// A node with an empty child list.
    pub fn new(id: impl Into<NodeId>, kind: impl Into<NodeKind>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            props: Map::new(),
            children: Children::default(),
            action_id: None,
        }
    }

    /// A node whose content is literal text.
    pub fn text(id: impl Into<NodeId>, kind: impl Into<NodeKind>, text: &str) -> Self {
        Self {
            children: Children::Text(text.to_string()),
            ..Self::new(id, kind)
        }
    }

    /// Builder: replace the child list.
    #[must_use]
    pub fn with_children(mut self, children: Vec<ComponentNode>) -> Self {
        self.children = Children::Nodes(children.into_iter().map(Arc::new).collect());
        self
    }

    /// Whether this node's tag accepts nested children.
    pub fn accepts_children(&self) -> bool {
        self.kind.is_container()
    }

    /// Child nodes in document order. Text nodes have none.
    pub fn child_nodes(&self) -> &[Arc<ComponentNode>] {
        match &self.children {
            Children::Nodes(nodes) => nodes,
            Children::Text(_) => &[],
        }
    }

    /// `true` if `children` is a sequence (possibly empty) rather than text.
    pub fn has_child_list(&self) -> bool {
        matches!(self.children, Children::Nodes(_))
    }

    /// `true` if this node has a child list and it is empty.
    pub fn is_empty_container(&self) -> bool {
        matches!(&self.children, Children::Nodes(nodes) if nodes.is_empty())
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.children {
            Children::Text(text) => Some(text),
            Children::Nodes(_) => None,
        }
    }
}
