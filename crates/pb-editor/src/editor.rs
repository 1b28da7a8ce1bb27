//! The editor facade handed to a host.
//!
//! Owns the current document version, the drag session, the node selection
//! and the drag configuration. Hosts feed it drag events and read back the
//! tree, the drag state and the list of draggable ids.

use crate::config::DragConfig;
use crate::geometry::{GeometrySnapshot, Point};
use crate::input::DragEvent;
use crate::session::{DragSession, DragSnapshot, DragState, DropOutcome};
use pb_core::tree::{draggable_ids, find_by_id};
use pb_core::{ComponentNode, Document, DocumentError, NodeId};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Editor {
    document: Document,
    session: DragSession,
    selected: Option<NodeId>,
    config: DragConfig,
}

impl Editor {
    /// An editor over an empty page.
    pub fn new(config: DragConfig) -> Self {
        Self::with_document(Document::new(), config)
    }

    pub fn with_document(document: Document, config: DragConfig) -> Self {
        Self {
            document,
            session: DragSession::new(),
            selected: None,
            config,
        }
    }

    /// Replace the document. Any running drag and the selection are dropped.
    ///
    /// # Errors
    /// See `Document::from_json`. On error the current document is kept.
    pub fn load_json(&mut self, json: &str) -> Result<(), DocumentError> {
        let document = Document::from_json(json)?;
        self.session.cancel();
        self.selected = None;
        self.document = document;
        Ok(())
    }

    // ─── Host reads ──────────────────────────────────────────────────────

    /// The current tree version, for re-render.
    pub fn current_tree(&self) -> &Arc<ComponentNode> {
        self.document.root()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn version(&self) -> u64 {
        self.document.version()
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DragConfig) {
        self.config = config;
    }

    /// `{activeId, hoverId, dropPosition}` for the drop indicator.
    pub fn current_drag_state(&self) -> DragSnapshot {
        self.session.snapshot()
    }

    pub fn drag_state(&self) -> DragState {
        self.session.state()
    }

    /// Every id except the reserved root, in document order.
    pub fn draggable_ids(&self) -> Vec<NodeId> {
        draggable_ids(self.current_tree())
    }

    /// The node being dragged, for the drag overlay preview.
    pub fn dragged_node(&self) -> Option<&ComponentNode> {
        let active = self.session.state().active()?;
        find_by_id(self.current_tree(), active)
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn selected_id(&self) -> Option<NodeId> {
        self.selected
    }

    /// Select `id`, or clear the selection with `None`.
    /// Returns `false` if `id` is not in the tree.
    pub fn select(&mut self, id: Option<NodeId>) -> bool {
        match id {
            None => {
                self.selected = None;
                true
            }
            Some(id) if find_by_id(self.current_tree(), id).is_some() => {
                self.selected = Some(id);
                true
            }
            Some(_) => false,
        }
    }

    // ─── Drag events ─────────────────────────────────────────────────────

    /// Pick up `id`. Clears the selection.
    pub fn drag_start(&mut self, id: NodeId) -> bool {
        self.selected = None;
        let root = Arc::clone(self.document.root());
        self.session.start(&root, id)
    }

    /// Pointer moved. Returns `true` if the drop indicator changed.
    pub fn drag_over(&mut self, pointer: Point, geometry: &GeometrySnapshot) -> bool {
        let root = Arc::clone(self.document.root());
        self.session.over(&root, pointer, geometry, &self.config)
    }

    /// Pointer released. A `Moved` outcome has already been committed;
    /// a `Rejected` one carries the reason for the host.
    pub fn drag_end(&mut self) -> DropOutcome {
        let root = Arc::clone(self.document.root());
        let outcome = self.session.drop(&root);
        if let DropOutcome::Moved(next) = &outcome {
            self.document.commit(Arc::clone(next));
        }
        outcome
    }

    /// Abort the drag. Returns `true` if one was running.
    pub fn drag_cancel(&mut self) -> bool {
        self.session.cancel()
    }

    /// Dispatch a single drag event. `geometry` is only read for `Over`.
    ///
    /// Returns `true` if the tree or the drag state changed.
    pub fn handle(&mut self, event: &DragEvent, geometry: &GeometrySnapshot) -> bool {
        match *event {
            DragEvent::Start { id } => self.drag_start(id),
            DragEvent::Over { x, y } => self.drag_over(Point::new(x, y), geometry),
            DragEvent::End => {
                let was_active = self.session.is_active();
                self.drag_end().is_moved() || was_active
            }
            DragEvent::Cancel => self.drag_cancel(),
        }
    }

    // ─── Text ────────────────────────────────────────────────────────────

    /// Commit inline-edited text. Line breaks collapse to single spaces and
    /// the result is trimmed. Returns `true` if the tree changed.
    pub fn commit_text(&mut self, id: NodeId, raw: &str) -> bool {
        let text = clean_text(raw);
        self.document.commit_text(id, &text)
    }
}

/// Collapse each run of `\r`/`\n` into one space, then trim.
fn clean_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_break = false;
    for ch in raw.chars() {
        if ch == '\n' || ch == '\r' {
            if !in_break {
                out.push(' ');
            }
            in_break = true;
        } else {
            out.push(ch);
            in_break = false;
        }
    }
    out.trim().to_string()
}
