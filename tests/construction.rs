//! Editor construction tests - container checks, attribute reading, field setup

mod common;

use common::{content, element, test_editor, TITLE_BODY};
use form_editor::dom::Document;
use form_editor::{Editor, EditorError, FieldKind};

// ========================================================================
// Container checks
// ========================================================================

#[test]
fn test_missing_container_is_an_error() {
    let doc = Document::from_html("<form></form>");
    assert!(matches!(
        Editor::new(doc, None),
        Err(EditorError::Construction(_))
    ));
}

#[test]
fn test_text_node_container_is_an_error() {
    let doc = Document::from_html("just text");
    let text = doc.children(doc.body())[0];
    assert!(matches!(
        Editor::new(doc, Some(text)),
        Err(EditorError::Construction(_))
    ));
}

#[test]
fn test_container_without_element_children_is_an_error() {
    let doc = Document::from_html("<form>only text</form>");
    let form = doc.children(doc.body())[0];
    assert!(matches!(
        Editor::new(doc, Some(form)),
        Err(EditorError::Construction(_))
    ));
}

// ========================================================================
// Field setup
// ========================================================================

#[test]
fn test_fields_register_in_reverse_document_order() {
    let editor = test_editor(TITLE_BODY);
    let names: Vec<_> = editor.fields().keys().cloned().collect();
    assert_eq!(names, vec!["body", "title"]);
}

#[test]
fn test_field_attributes_are_read() {
    let editor = test_editor(
        r#"<div data-field="summary" data-placeholder="Summary" data-type="rich" data-length="140" data-require="true"></div>"#,
    );
    let fields = editor.fields();
    let summary = &fields["summary"];

    assert_eq!(summary.kind, FieldKind::Rich);
    assert_eq!(summary.max_length, Some(140));
    assert!(summary.required);
    assert_eq!(summary.placeholder, "Summary");
}

#[test]
fn test_non_numeric_length_means_unbounded() {
    let editor = test_editor(
        r#"<div data-field="a" data-placeholder="A" data-length="lots"></div><div data-field="b" data-placeholder="B" data-length="0"></div>"#,
    );
    let fields = editor.fields();
    assert_eq!(fields["a"].max_length, None);
    assert_eq!(fields["b"].max_length, None);
}

#[test]
fn test_unknown_type_falls_back_to_simple() {
    let editor =
        test_editor(r#"<div data-field="a" data-placeholder="A" data-type="fancy"></div>"#);
    assert_eq!(editor.fields()["a"].kind, FieldKind::Simple);
}

#[test]
fn test_elements_become_editable_with_tab_order() {
    let editor = test_editor(TITLE_BODY);
    let doc = editor.document();
    let title = element(&editor, "title");
    let body = element(&editor, "body");

    assert_eq!(doc.attribute(title, "contenteditable"), Some("true"));
    assert_eq!(doc.attribute(title, "tabindex"), Some("1"));
    assert_eq!(doc.attribute(body, "tabindex"), Some("2"));
    assert_eq!(doc.style(body, "min-height").as_deref(), Some("1em"));
}

#[test]
fn test_empty_fields_show_placeholder() {
    let editor = test_editor(
        r#"<div data-field="title" data-placeholder="Title">Hello  world</div><div data-field="body" data-placeholder="Body" data-type="rich"></div>"#,
    );
    let doc = editor.document();

    assert_eq!(editor.field("title").unwrap().length(), 11);
    assert!(!doc.has_class(element(&editor, "title"), "placeholder"));
    assert_eq!(editor.field("body").unwrap().length(), 0);
    assert!(doc.has_class(element(&editor, "body"), "placeholder"));
}

#[test]
fn test_children_missing_attributes_are_skipped() {
    let editor = test_editor(
        r#"<div data-placeholder="No name"></div><div data-field="title" data-placeholder="Title"></div><div data-field="nameless"></div>"#,
    );

    assert_eq!(editor.model().len(), 1);
    assert!(editor.field("title").is_some());
    assert_eq!(
        editor.construction_warnings(),
        &[
            EditorError::MissingAttribute {
                index: 2,
                attribute: "data-placeholder".into()
            },
            EditorError::MissingAttribute {
                index: 0,
                attribute: "data-field".into()
            },
        ]
    );
}

#[test]
fn test_duplicate_names_keep_the_earlier_element() {
    let editor = test_editor(
        r#"<div data-field="title" data-placeholder="First">one</div><div data-field="title" data-placeholder="Second">two</div>"#,
    );

    assert_eq!(editor.model().len(), 1);
    assert_eq!(editor.fields()["title"].placeholder, "First");
    assert_eq!(content(&editor, "title"), "one");
}

#[test]
fn test_values_report_every_field() {
    let mut editor = test_editor(
        r#"<div data-field="title" data-placeholder="Title">Hello</div><div data-field="body" data-placeholder="Body" data-type="rich"><p>Some <b>bold</b> text</p></div>"#,
    );
    let values = editor.values();

    assert_eq!(values["title"].value, "Hello");
    assert_eq!(values["title"].length, 5);
    assert_eq!(values["body"].value, "<p>Some <b>bold</b> text</p>");
    assert_eq!(values["body"].length, 14);
    assert!(values.values().all(|v| v.valid));
}
