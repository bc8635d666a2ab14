mod commands;
mod context;
mod history;

use crate::error::CanvasError;
use crate::object_table::ObjectId;

pub use commands::Command;
pub use context::EditorContext;
pub use history::{DEFAULT_HISTORY_LIMIT, History, HistorySnapshot};

/// Result type for command operations; carries the id of a created object.
pub type CommandResult = Result<Option<ObjectId>, CanvasError>;
