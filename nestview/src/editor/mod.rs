mod history;
mod shape_editor;

use thiserror::Error;

use crate::entities::SessionError;
use crate::geometry::GeometryError;

#[doc(inline)]
pub use history::History;

#[doc(inline)]
pub use shape_editor::{ClickOutcome, EditorState, ShapeEditor};

/// Operations the editor refuses in its current state. A refused operation leaves the
/// editor untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error("no shape is being drawn or edited")]
    NotDrawing,
    #[error("operation is only available while editing an existing piece")]
    NotEditing,
    #[error("finish the current shape or drag first")]
    Busy,
    #[error("a shape needs at least {required} points, it has {actual}")]
    TooFewPoints { required: usize, actual: usize },
    #[error("no point with index {0}")]
    NoSuchPoint(usize),
    #[error("no point is being dragged")]
    NotDragging,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
