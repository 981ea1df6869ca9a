//! Error types for the field editor

use thiserror::Error;

/// Errors surfaced by editor construction and the public editor operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// No usable container was passed to the editor
    #[error("cannot build editor: {0}")]
    Construction(String),

    /// A container child lacks a required field attribute; it was skipped
    #[error("child {index} skipped: attribute `{attribute}` is not defined")]
    MissingAttribute { index: usize, attribute: String },

    /// Subscribe or emit with an event type the editor does not publish
    #[error("can't use invalid event `{0}`")]
    InvalidEvent(String),

    /// Plugin registration against an unknown toolbar slot
    #[error("invalid plugin slot `{0}`")]
    InvalidSlot(String),

    /// An operation named a field the editor does not have
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// A key name that does not map to any key
    #[error("invalid key `{0}`")]
    InvalidKey(String),
}

pub type Result<T, E = EditorError> = std::result::Result<T, E>;
