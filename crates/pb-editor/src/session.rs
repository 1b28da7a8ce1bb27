//! Drag session state machine.
//!
//! ```text
//!            start(id)               over → target found
//!   Idle ───────────────► Dragging ◄──────────────────► Hovering
//!    ▲                      │   over → no target            │
//!    │      drop / cancel   │                               │ drop → move_node
//!    └──────────────────────┴───────────────────────────────┘
//! ```
//!
//! Every transition runs synchronously inside one event handler. `cancel`
//! is always total: it returns to `Idle` from anywhere without touching the
//! tree. A `start` during a live session cancels it first, so two sessions
//! never overlap.

use crate::config::DragConfig;
use crate::geometry::{GeometrySnapshot, Point};
use crate::hit::resolve_drop_target;
use crate::zones::classify_for_node;
use pb_core::tree::find_by_id;
use pb_core::{ComponentNode, DropPosition, ErrorClass, NodeId, TreeError, try_move_node};
use serde::Serialize;
use std::sync::Arc;

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        active: NodeId,
    },
    Hovering {
        active: NodeId,
        target: NodeId,
        position: DropPosition,
    },
}

impl DragState {
    pub fn active(&self) -> Option<NodeId> {
        match *self {
            DragState::Idle => None,
            DragState::Dragging { active } | DragState::Hovering { active, .. } => Some(active),
        }
    }

    /// Flattened view for the host's visual feedback.
    pub fn snapshot(&self) -> DragSnapshot {
        match *self {
            DragState::Idle => DragSnapshot::default(),
            DragState::Dragging { active } => DragSnapshot {
                active_id: Some(active),
                ..DragSnapshot::default()
            },
            DragState::Hovering {
                active,
                target,
                position,
            } => DragSnapshot {
                active_id: Some(active),
                hover_id: Some(target),
                drop_position: Some(position),
            },
        }
    }
}

/// `{activeId, hoverId, dropPosition}` as the host renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragSnapshot {
    pub active_id: Option<NodeId>,
    pub hover_id: Option<NodeId>,
    pub drop_position: Option<DropPosition>,
}

/// Result of ending a session with `drop`.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The tree was rebuilt; this is the new version.
    Moved(Arc<ComponentNode>),
    /// The move was refused; the tree is unchanged.
    Rejected(TreeError),
    /// Released without hovering a target.
    NoTarget,
    /// No session was running.
    NotDragging,
}

impl DropOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, DropOutcome::Moved(_))
    }

    /// Why the move was refused, if it was.
    pub fn rejection(&self) -> Option<&TreeError> {
        match self {
            DropOutcome::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn snapshot(&self) -> DragSnapshot {
        self.state.snapshot()
    }

    pub fn is_active(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Begin dragging `id`. Returns `false` if `id` cannot be dragged
    /// (the root, or not in `root`), leaving the session `Idle`.
    pub fn start(&mut self, root: &ComponentNode, id: NodeId) -> bool {
        if let Some(prev) = self.state.active() {
            log::debug!("drag of {prev} superseded by {id}");
            self.state = DragState::Idle;
        }

        if id.is_root() || id == root.id {
            log::warn!("refusing to drag the document root");
            return false;
        }
        if find_by_id(root, id).is_none() {
            log::debug!("drag start on {id}, which is not in the current tree");
            return false;
        }

        self.state = DragState::Dragging { active: id };
        true
    }

    /// Re-resolve the hover target for a pointer move.
    ///
    /// Returns `true` if the visible drag state changed.
    pub fn over(
        &mut self,
        root: &ComponentNode,
        pointer: Point,
        geometry: &GeometrySnapshot,
        config: &DragConfig,
    ) -> bool {
        let Some(active) = self.state.active() else {
            return false;
        };

        let next = resolve_drop_target(root, active, pointer, geometry, config)
            .and_then(|target| {
                let node = find_by_id(root, target)?;
                let rect = geometry.get(target)?;
                let position = classify_for_node(pointer, rect, node, config.edge_fraction());
                Some(DragState::Hovering {
                    active,
                    target,
                    position,
                })
            })
            .unwrap_or(DragState::Dragging { active });

        let changed = next != self.state;
        self.state = next;
        changed
    }

    /// End the session, applying the pending move if there is one.
    pub fn drop(&mut self, root: &Arc<ComponentNode>) -> DropOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DropOutcome::NotDragging,
            DragState::Dragging { active } => {
                log::debug!("{active} released without a drop target");
                DropOutcome::NoTarget
            }
            DragState::Hovering {
                active,
                target,
                position,
            } => match try_move_node(root, active, target, position) {
                Ok(next) => DropOutcome::Moved(next),
                Err(err) => {
                    match err.class() {
                        ErrorClass::LookupFailure => {
                            log::debug!("stale drop of {active} onto {target}: {err}")
                        }
                        _ => log::warn!("drop of {active} onto {target} rejected: {err}"),
                    }
                    DropOutcome::Rejected(err)
                }
            },
        }
    }

    /// Abort the session. Returns `true` if one was running.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = DragState::Idle;
        was_active
    }
}
