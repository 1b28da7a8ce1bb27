pub mod document;
pub mod error;
pub mod id;
pub mod model;
pub mod mutate;
pub mod tree;
pub mod validate;

pub use document::Document;
pub use error::{DocumentError, ErrorClass, TreeError};
pub use id::{NodeId, ROOT_ID};
pub use model::*;
pub use mutate::{DropPosition, move_node, try_move_node, try_update_text, update_text};
pub use tree::{collect_ids, draggable_ids, find_by_id, find_parent, is_ancestor};
pub use validate::{Severity, TreeDiagnostic, validate_tree};
