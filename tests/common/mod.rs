//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use form_editor::dom::{Document, NodeId};
use form_editor::keymap::KeyCode;
use form_editor::replay::{self, ReplayReport, ReplayScript, Step};
use form_editor::{Editor, EditorConfig};

/// A simple `title` field followed by a rich `body` field
pub const TITLE_BODY: &str = r#"<div data-field="title" data-placeholder="Title"></div><div data-field="body" data-placeholder="Body" data-type="rich"></div>"#;

/// Build an editor over `<form>{fields}</form>`
pub fn test_editor(fields: &str) -> Editor {
    test_editor_with_config(fields, EditorConfig::default())
}

pub fn test_editor_with_config(fields: &str, config: EditorConfig) -> Editor {
    let doc = Document::from_html(&format!("<form>{}</form>", fields));
    let form = doc.children(doc.body())[0];
    Editor::with_config(doc, Some(form), config).unwrap()
}

/// Collect the field name of every CHANGE notification
pub fn change_log(editor: &mut Editor) -> Rc<RefCell<Vec<String>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    editor
        .subscribe("CHANGE", move |field| sink.borrow_mut().push(field.name.clone()))
        .unwrap();
    log
}

pub fn run_steps(editor: &mut Editor, steps: Vec<Step>) -> ReplayReport {
    let script = ReplayScript {
        steps,
        ..ReplayScript::default()
    };
    replay::run(editor, &script).unwrap()
}

pub fn click(field: &str) -> Step {
    Step::Click {
        field: field.into(),
    }
}

pub fn type_text(field: &str, text: &str) -> Step {
    Step::Type {
        field: field.into(),
        text: text.into(),
    }
}

pub fn key(field: &str, key: KeyCode) -> Step {
    Step::Key {
        field: field.into(),
        key,
    }
}

pub fn paste(field: &str, text: &str) -> Step {
    Step::Paste {
        field: field.into(),
        text: text.into(),
    }
}

pub fn element(editor: &Editor, field: &str) -> NodeId {
    editor.field(field).unwrap().element()
}

/// Field elements currently carrying the focus class
pub fn focused_elements(editor: &Editor) -> Vec<String> {
    let class = &editor.model().config().classes.focus;
    editor
        .model()
        .fields()
        .filter(|field| editor.document().has_class(field.element(), class))
        .map(|field| field.name().to_string())
        .collect()
}

/// Field content as markup, without the action toolbar
pub fn content(editor: &Editor, field: &str) -> String {
    editor
        .field(field)
        .unwrap()
        .content_markup(editor.document())
}
