//! Benchmarks for event dispatch through the field state machine
//!
//! Run with: cargo bench dispatch

use form_editor::dom::{Document, Selection};
use form_editor::keymap::KeyCode;
use form_editor::{Editor, FieldEvent};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

/// Editor with `fields` simple fields plus one rich `body` holding `paragraphs`
fn make_editor(fields: usize, paragraphs: usize) -> Editor {
    let mut html = String::from("<form>");
    for i in 0..fields {
        html.push_str(&format!(
            r#"<div data-field="f{i}" data-placeholder="Field {i}">value {i}</div>"#
        ));
    }
    html.push_str(r#"<div data-field="body" data-placeholder="Body" data-type="rich">"#);
    html.push_str(&"<p>The quick brown fox jumps over the lazy dog.</p>".repeat(paragraphs));
    html.push_str("</div></form>");

    let doc = Document::from_html(&html);
    let form = doc.children(doc.body())[0];
    let mut editor = Editor::new(doc, Some(form)).expect("bench form is valid");
    editor.subscribe("CHANGE", |_| {}).expect("CHANGE is a known event");
    editor
}

fn caret_at_body_end(editor: &mut Editor) {
    let body = editor.field("body").expect("body field").element();
    let doc = editor.document_mut();
    let end = doc.end_boundary(body, &[]);
    doc.set_selection(Selection::collapsed(end));
}

// ============================================================================
// Keystrokes
// ============================================================================

#[divan::bench(args = [1, 10, 100])]
fn keyup_simple_field(bencher: divan::Bencher, fields: usize) {
    let mut editor = make_editor(fields, 1);
    bencher.bench_local(|| {
        editor
            .dispatch("f0", FieldEvent::KeyUp(KeyCode::Char('a')))
            .map(|outcome| outcome.emitted)
    });
}

#[divan::bench(args = [1, 10, 100, 1000])]
fn keyup_rich_field(bencher: divan::Bencher, paragraphs: usize) {
    let mut editor = make_editor(1, paragraphs);
    caret_at_body_end(&mut editor);
    bencher.bench_local(|| {
        editor
            .dispatch("body", FieldEvent::KeyUp(KeyCode::Char('a')))
            .map(|outcome| outcome.emitted)
    });
}

#[divan::bench(args = [1, 10, 100])]
fn click_switches_focus(bencher: divan::Bencher, fields: usize) {
    let mut editor = make_editor(fields, 10);
    caret_at_body_end(&mut editor);
    let body = editor.field("body").expect("body field").element();
    let first = editor.field("f0").expect("first field").element();
    let mut toggle = false;
    bencher.bench_local(|| {
        toggle = !toggle;
        if toggle {
            editor.dispatch("body", FieldEvent::Click { target: body })
        } else {
            editor.dispatch("f0", FieldEvent::Click { target: first })
        }
    });
}

// ============================================================================
// Introspection
// ============================================================================

#[divan::bench(args = [1, 10, 100])]
fn values_snapshot(bencher: divan::Bencher, fields: usize) {
    let mut editor = make_editor(fields, 10);
    bencher.bench_local(|| editor.values().len());
}
