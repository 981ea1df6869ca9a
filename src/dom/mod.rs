//! Headless host document for the field editor.
//!
//! This module stands in for the browser DOM: a node tree with attributes,
//! class lists and inline styles, a selection, markup parsing/serialization and
//! the handful of editing commands the field state machine relies on.
//!
//! # Architecture
//!
//! - [`Document`]: node arena, tree mutation, attributes and text extraction
//! - [`Selection`] / [`Boundary`]: the caret or selected range, with host bounds
//! - [`Rect`] / [`Size`] / [`Point`]: host-measured geometry (no layout engine)
//! - markup: `inner_html` / `set_inner_html` / `parse_fragment`
//! - commands: `insert_html`, `insert_blocks`, `insert_text`, `delete_backward`, `format_block`
//!
//! # Example
//!
//! ```
//! use form_editor::dom::Document;
//!
//! let mut doc = Document::from_html("<div>hello</div>");
//! let div = doc.children(doc.body())[0];
//! let text = doc.children(div)[0];
//! doc.set_caret(text, 5);
//! doc.insert_text(" world");
//!
//! assert_eq!(doc.inner_html(div), "hello world");
//! ```

mod commands;
mod geometry;
mod markup;
mod node;
mod selection;

pub use geometry::{Point, Rect, Size};
pub use markup::{escape_text, VOID_ELEMENTS};
pub use node::{Document, NodeId, BLOCK_ELEMENTS};
pub use selection::{Boundary, Selection, SelectionKind};
