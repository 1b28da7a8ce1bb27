pub mod config;
pub mod editor;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod session;
pub mod zones;

pub use config::DragConfig;
pub use editor::Editor;
pub use geometry::{GeometrySnapshot, Point, Rect};
pub use hit::resolve_drop_target;
pub use input::DragEvent;
pub use session::{DragSession, DragSnapshot, DragState, DropOutcome};
pub use zones::{classify_drop, classify_for_node};
