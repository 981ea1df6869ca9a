//! Form Editor - Elm-style form-field editor core
//!
//! This crate turns a container of marked-up elements into editable simple and
//! rich fields, tracks their length and validity, anchors contextual toolbars
//! and publishes change notifications, all against a headless host document.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dom;
pub mod editor;
pub mod error;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod replay;
pub mod tracing;
pub mod update;
pub mod util;
pub mod validate;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use editor::{Editor, EventOutcome};
pub use error::{EditorError, Result};
pub use messages::{EditorEvent, EventKind, FieldEvent};
pub use model::{EditorModel, FieldDescriptor, FieldKind, FieldValue, Plugin, SlotKind};
