//! WASM bridge — exposes the Rust drag-and-drop editor to the page builder UI.
//!
//! Compiled via `wasm-pack build --target web`. Structured values cross the
//! boundary as JSON strings; the host's drag layer calls the `handle_drag_*`
//! methods and re-renders from `get_tree` / `get_drag_state`.

use pb_core::NodeId;
use pb_editor::{DragConfig, Editor, GeometrySnapshot, Point};
use serde_json::json;
use wasm_bindgen::prelude::*;

/// The browser-facing editor controller.
///
/// Holds the document, drag session and selection. All interaction from
/// the page builder goes through this struct.
#[wasm_bindgen]
pub struct BuilderCanvas {
    editor: Editor,
}

impl Default for BuilderCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl BuilderCanvas {
    /// Create a controller over an empty page.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        Self {
            editor: Editor::new(DragConfig::default()),
        }
    }

    /// Replace the drag configuration from a (possibly partial) JSON object.
    /// Returns `false` and keeps the old config on malformed input.
    pub fn set_config(&mut self, json: &str) -> bool {
        match serde_json::from_str::<DragConfig>(json) {
            Ok(config) => {
                self.editor.set_config(config);
                true
            }
            Err(e) => {
                log::warn!("ignoring drag config: {e}");
                false
            }
        }
    }

    /// Load a document from JSON. Returns `true` on success.
    pub fn load(&mut self, json: &str) -> bool {
        match self.editor.load_json(json) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("document not loaded: {e}");
                false
            }
        }
    }

    /// The current tree version as JSON.
    pub fn get_tree(&self) -> String {
        self.editor
            .document()
            .to_json()
            .unwrap_or_else(|_| "null".to_string())
    }

    /// Monotonic document version; changes whenever `get_tree` would.
    pub fn get_version(&self) -> f64 {
        self.editor.version() as f64
    }

    /// `{"activeId":..,"hoverId":..,"dropPosition":..}`, nulls when absent.
    pub fn get_drag_state(&self) -> String {
        serde_json::to_string(&self.editor.current_drag_state())
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// All ids except the root, as a JSON array in document order.
    pub fn get_draggable_ids(&self) -> String {
        let ids: Vec<String> = self
            .editor
            .draggable_ids()
            .into_iter()
            .map(|id| id.as_str().to_string())
            .collect();
        serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
    }

    /// The node being dragged as JSON (for the drag overlay), or empty string.
    pub fn get_dragged_node(&self) -> String {
        self.editor
            .dragged_node()
            .and_then(|node| serde_json::to_string(node).ok())
            .unwrap_or_default()
    }

    /// The selected node id, or empty string if none.
    pub fn get_selected_id(&self) -> String {
        self.editor
            .selected_id()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// Select a node by id; empty string clears the selection.
    /// Returns `true` if the node was found (or the selection cleared).
    pub fn select_by_id(&mut self, node_id: &str) -> bool {
        if node_id.is_empty() {
            return self.editor.select(None);
        }
        self.editor.select(Some(NodeId::intern(node_id)))
    }

    // ─── Drag events ─────────────────────────────────────────────────────

    /// A node was picked up. Returns `false` if it cannot be dragged.
    pub fn handle_drag_start(&mut self, node_id: &str) -> bool {
        self.editor.drag_start(NodeId::intern(node_id))
    }

    /// Pointer moved while dragging. `geometry` maps ids to
    /// `{left, top, width, height}`, measured for this frame.
    /// Returns `true` if the drop indicator changed.
    pub fn handle_drag_over(&mut self, x: f32, y: f32, geometry: &str) -> bool {
        let snapshot: GeometrySnapshot = match serde_json::from_str(geometry) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("ignoring drag-over with unreadable geometry: {e}");
                return false;
            }
        };
        self.editor.drag_over(Point::new(x, y), &snapshot)
    }

    /// Pointer released. Returns `{"changed":bool,"version":n}`, plus
    /// `"error"` with the reason when the drop was refused.
    pub fn handle_drag_end(&mut self) -> String {
        let outcome = self.editor.drag_end();
        let version = self.editor.version();
        match outcome.rejection() {
            Some(err) => json!({
                "changed": false,
                "version": version,
                "error": err.to_string(),
            })
            .to_string(),
            None => json!({ "changed": outcome.is_moved(), "version": version }).to_string(),
        }
    }

    /// Drag aborted. Returns `true` if a drag was running.
    pub fn handle_drag_cancel(&mut self) -> bool {
        self.editor.drag_cancel()
    }

    // ─── Inline text ─────────────────────────────────────────────────────

    /// Commit edited text for a text node. Returns `true` if the tree changed.
    pub fn commit_text(&mut self, node_id: &str, text: &str) -> bool {
        self.editor.commit_text(NodeId::intern(node_id), text)
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("page builder WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone validation (no canvas needed) ────────────────────────────

/// Validate a document. Returns JSON:
/// `{"ok":bool,"diagnostics":[...]}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate(json: &str) -> String {
    match serde_json::from_str::<pb_core::ComponentNode>(json) {
        Ok(root) => {
            let diagnostics = pb_core::validate_tree(&root);
            let ok = !pb_core::validate::has_errors(&diagnostics);
            json!({ "ok": ok, "diagnostics": diagnostics }).to_string()
        }
        Err(e) => json!({ "ok": false, "error": e.to_string() }).to_string(),
    }
}
