//! Drag input events.
//!
//! The host's drag-and-drop layer (pointer sensor, activation distance)
//! decides when a drag begins; the editor only sees the normalized stream.

use pb_core::NodeId;
use serde::Deserialize;

/// One event in a drag interaction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DragEvent {
    /// A node was picked up.
    Start { id: NodeId },
    /// The pointer moved while dragging.
    Over { x: f32, y: f32 },
    /// The pointer was released.
    End,
    /// The drag was aborted (Escape, focus loss, ...).
    Cancel,
}

impl DragEvent {
    pub fn start(id: &str) -> Self {
        Self::Start {
            id: NodeId::intern(id),
        }
    }

    pub fn over(x: f32, y: f32) -> Self {
        Self::Over { x, y }
    }

    /// Extract position if this is a pointer move.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::Over { x, y } => Some((*x, *y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_host_events() {
        let ev: DragEvent = serde_json::from_str(r#"{"kind":"start","id":"cta"}"#).unwrap();
        assert_eq!(ev, DragEvent::start("cta"));
        let ev: DragEvent = serde_json::from_str(r#"{"kind":"over","x":12.5,"y":40}"#).unwrap();
        assert_eq!(ev.position(), Some((12.5, 40.0)));
        let ev: DragEvent = serde_json::from_str(r#"{"kind":"cancel"}"#).unwrap();
        assert_eq!(ev, DragEvent::Cancel);
        assert_eq!(ev.position(), None);
    }
}
