//! Scripted user sessions
//!
//! A replay script is a YAML list of user steps run against an [`Editor`] the
//! way a browser would deliver them: typing a character is keydown, keypress,
//! the edit itself, then keyup.
//!
//! ```yaml
//! toolbar_size: { width: 120, height: 32 }
//! steps:
//!   - click: { field: title }
//!   - type: { field: title, text: "Hello" }
//!   - paste: { field: body, text: "line one\nline two" }
//!   - select: { field: body, start: 0, end: 4, bounds: { left: 10, top: 40, right: 50, bottom: 56 } }
//!   - mouseup: { field: body }
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dom::{Document, Rect, Selection, Size};
use crate::editor::Editor;
use crate::error::{EditorError, Result};
use crate::keymap::KeyCode;
use crate::messages::FieldEvent;
use crate::model::{FieldValue, SlotKind};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReplayScript {
    /// Measured size applied to every edition toolbar before the run
    #[serde(default)]
    pub toolbar_size: Option<Size>,
    /// Page scroll offset during the run
    #[serde(default)]
    pub scroll_y: f64,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl ReplayScript {
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

/// One user action
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Click into the field, keeping the caret if it is already there
    Click { field: String },
    /// Type each character of `text`
    Type { field: String, text: String },
    /// Press and release a single named key
    Key { field: String, key: KeyCode },
    Paste { field: String, text: String },
    /// Select the characters `start..end` of the field's text
    Select {
        field: String,
        start: usize,
        end: usize,
        #[serde(default)]
        bounds: Rect,
    },
    MouseUp { field: String },
    /// Insert markup at the caret, as a formatting command would
    Insert { field: String, html: String },
}

impl Step {
    pub fn field(&self) -> &str {
        match self {
            Step::Click { field }
            | Step::Type { field, .. }
            | Step::Key { field, .. }
            | Step::Paste { field, .. }
            | Step::Select { field, .. }
            | Step::MouseUp { field }
            | Step::Insert { field, .. } => field,
        }
    }
}

/// What a replay produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Field names of every CHANGE notification, in order
    pub changes: Vec<String>,
    pub values: IndexMap<String, FieldValue>,
}

/// Run `script` against `editor`, collecting CHANGE notifications
pub fn run(editor: &mut Editor, script: &ReplayScript) -> Result<ReplayReport> {
    let changes = Rc::new(RefCell::new(Vec::new()));
    {
        let changes = Rc::clone(&changes);
        editor.subscribe("CHANGE", move |field| {
            changes.borrow_mut().push(field.name.clone())
        })?;
    }

    editor.document_mut().set_scroll_y(script.scroll_y);
    if let Some(size) = script.toolbar_size {
        let mounts: Vec<_> = editor
            .model()
            .fields()
            .map(|field| field.slot(SlotKind::Edition).mount_point())
            .collect();
        for mount in mounts {
            editor.document_mut().set_size(mount, size);
        }
    }

    for (index, step) in script.steps.iter().enumerate() {
        tracing::debug!(step = index, field = step.field(), "replay step");
        run_step(editor, step)?;
    }

    let values = editor.values();
    let changes = changes.borrow().clone();
    Ok(ReplayReport { changes, values })
}

fn run_step(editor: &mut Editor, step: &Step) -> Result<()> {
    match step {
        Step::Click { field } => {
            let element = place_caret(editor, field)?;
            editor.dispatch(field, FieldEvent::Click { target: element })?;
        }
        Step::Type { field, text } => {
            place_caret(editor, field)?;
            for c in text.chars() {
                press(editor, field, KeyCode::from_char(c), Some(c))?;
            }
        }
        Step::Key { field, key } => {
            place_caret(editor, field)?;
            press(editor, field, *key, None)?;
        }
        Step::Paste { field, text } => {
            editor.dispatch(field, FieldEvent::Paste { text: text.clone() })?;
        }
        Step::Select {
            field,
            start,
            end,
            bounds,
        } => {
            let (element, skip) = field_parts(editor, field)?;
            let doc = editor.document_mut();
            let anchor = doc.boundary_at_char(element, *start, &[skip]);
            let focus = doc.boundary_at_char(element, *end, &[skip]);
            doc.set_selection(Selection::new(anchor, focus).with_bounds(*bounds));
        }
        Step::MouseUp { field } => {
            editor.dispatch(field, FieldEvent::MouseUp)?;
        }
        Step::Insert { field, html } => {
            place_caret(editor, field)?;
            let inserted = editor.document_mut().insert_html(html);
            for node in inserted {
                editor.dispatch(field, FieldEvent::NodeInserted { node })?;
            }
        }
    }
    Ok(())
}

/// Field element and its action toolbar mount
fn field_parts(editor: &Editor, name: &str) -> Result<(crate::dom::NodeId, crate::dom::NodeId)> {
    let field = editor
        .field(name)
        .ok_or_else(|| EditorError::UnknownField(name.to_string()))?;
    Ok((field.element(), field.slot(SlotKind::Action).mount_point()))
}

/// Move the caret to the end of the field unless it is already inside it
fn place_caret(editor: &mut Editor, name: &str) -> Result<crate::dom::NodeId> {
    let (element, skip) = field_parts(editor, name)?;
    let doc = editor.document_mut();
    if !doc.selection_within(element) {
        let end = doc.end_boundary(element, &[skip]);
        doc.set_selection(Selection::collapsed(end));
    }
    Ok(element)
}

/// One key stroke: keydown, keypress, the edit unless cancelled, keyup
fn press(editor: &mut Editor, field: &str, key: KeyCode, typed: Option<char>) -> Result<()> {
    editor.dispatch(field, FieldEvent::KeyDown(key))?;
    let pressed = editor.dispatch(field, FieldEvent::KeyPress(key))?;
    if !pressed.default_prevented {
        apply_key(editor.document_mut(), key, typed);
    }
    editor.dispatch(field, FieldEvent::KeyUp(key))?;
    Ok(())
}

fn apply_key(doc: &mut Document, key: KeyCode, typed: Option<char>) {
    match key {
        KeyCode::Backspace => {
            doc.delete_backward();
        }
        KeyCode::Char(c) => {
            doc.insert_text(&typed.unwrap_or(c).to_string());
        }
        KeyCode::Space => {
            doc.insert_text(" ");
        }
        KeyCode::Enter => tracing::debug!("line breaks are not simulated"),
        _ => {}
    }
}
