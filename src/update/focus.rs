//! Focus transition and action toolbar anchoring

use crate::dom::{Document, NodeId};
use crate::keymap::KeyFilter;
use crate::messages::{EventKind, FieldEvent};
use crate::model::{EditorModel, FieldId};

/// Take focus for `id` when the event qualifies.
///
/// Only focus keys qualify (clicks count as the primary button). A key event
/// also needs content in the field, and clicks on the field's own toolbars are
/// ignored.
pub(super) fn focus(model: &mut EditorModel, id: FieldId, event: &FieldEvent) {
    let Some(field) = model.field(id) else {
        return;
    };
    if !event.key().is_some_and(|key| KeyFilter::Focus.matches(key)) {
        return;
    }
    if field.length() == 0 && event.kind() != EventKind::Click {
        return;
    }
    if event
        .target()
        .is_some_and(|target| field.is_toolbar_target(model.document(), target))
    {
        tracing::trace!(field = %field.name(), "click on toolbar ignored");
        return;
    }

    let rich = field.kind().is_rich();
    model.focus_field(id);
    if rich {
        set_action(model, id);
    }
}

/// Anchor the action toolbar after the caret's enclosing block.
///
/// Nothing moves while the caret stays in the same block.
fn set_action(model: &mut EditorModel, id: FieldId) {
    let Some((doc, field, config)) = model.parts_mut(id) else {
        return;
    };
    let Some(node) = doc.current_node() else {
        tracing::debug!(field = %field.name(), "no caret, action toolbar unchanged");
        return;
    };
    let Some(block) = enclosing_block(
        doc,
        field.element,
        node,
        &config.block_element,
        config.max_block_depth,
    ) else {
        tracing::debug!(field = %field.name(), %node, "caret is not inside a block");
        return;
    };
    if field.current_block == Some(block) {
        return;
    }

    field.current_block = Some(block);
    field.action.before_show(doc);
    let mount = field.action.mount_point();
    if let Some(parent) = doc.parent(block) {
        let next = doc.next_sibling(block);
        doc.insert_before(parent, mount, next);
    }
    tracing::debug!(field = %field.name(), %block, "action toolbar anchored");
}

/// Nearest ancestor-or-self of `node` tagged `tag`, strictly inside `root`.
///
/// The walk stops at `root`, at a detached node, or after `max_depth` steps;
/// all three mean there is no enclosing block.
pub fn enclosing_block(
    doc: &Document,
    root: NodeId,
    node: NodeId,
    tag: &str,
    max_depth: usize,
) -> Option<NodeId> {
    if !doc.contains(root, node) {
        return None;
    }
    let mut current = node;
    for _ in 0..max_depth {
        if current == root {
            return None;
        }
        if doc.tag_name(current) == Some(tag) {
            return Some(current);
        }
        current = doc.parent(current)?;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::super::update;
    use super::*;
    use crate::config::EditorConfig;
    use crate::keymap::KeyCode;

    const FORM: &str = r#"<form><div data-field="title" data-placeholder="Title">Hello</div><div data-field="body" data-placeholder="Body" data-type="rich"><p>one</p><p>two</p></div></form>"#;

    fn model() -> EditorModel {
        let doc = Document::from_html(FORM);
        let form = doc.children(doc.body())[0];
        EditorModel::build(doc, Some(form), EditorConfig::default())
            .unwrap()
            .0
    }

    fn caret_in_block(model: &mut EditorModel, index: usize) -> NodeId {
        let id = model.field_id("body").unwrap();
        let element = model.field(id).unwrap().element();
        let doc = model.document_mut();
        let block = doc
            .element_children(element)
            .into_iter()
            .filter(|&child| doc.tag_name(child) == Some("p"))
            .nth(index)
            .unwrap();
        let text = doc.children(block)[0];
        doc.set_caret(text, 1);
        block
    }

    #[test]
    fn test_enclosing_block_stops_at_root() {
        let doc = Document::from_html("<p><span><b>x</b></span></p>");
        let p = doc.children(doc.body())[0];
        let span = doc.children(p)[0];
        let bold = doc.children(span)[0];

        assert_eq!(enclosing_block(&doc, span, bold, "p", 32), None);
        assert_eq!(enclosing_block(&doc, doc.body(), bold, "p", 32), Some(p));
        assert_eq!(enclosing_block(&doc, doc.body(), bold, "p", 1), None);
    }

    #[test]
    fn test_click_anchors_action_toolbar_after_block() {
        let mut model = model();
        let id = model.field_id("body").unwrap();
        let element = model.field(id).unwrap().element();
        let first = caret_in_block(&mut model, 0);

        update(&mut model, id, &FieldEvent::Click { target: first });

        let field = model.field(id).unwrap();
        let mount = field.slot(crate::model::SlotKind::Action).mount_point();
        assert!(model.has_focus(id));
        assert_eq!(field.current_block(), Some(first));
        assert_eq!(model.document().children(element)[1], mount);
        assert_eq!(field.content_markup(model.document()), "<p>one</p><p>two</p>");
    }

    #[test]
    fn test_toolbar_moves_only_when_block_changes() {
        let mut model = model();
        let id = model.field_id("body").unwrap();
        let element = model.field(id).unwrap().element();
        let first = caret_in_block(&mut model, 0);
        update(&mut model, id, &FieldEvent::Click { target: first });

        let second = caret_in_block(&mut model, 1);
        update(&mut model, id, &FieldEvent::KeyUp(KeyCode::Down));

        let field = model.field(id).unwrap();
        let mount = field.slot(crate::model::SlotKind::Action).mount_point();
        assert_eq!(field.current_block(), Some(second));
        assert_eq!(model.document().children(element).last(), Some(&mount));
    }

    #[test]
    fn test_focus_moves_between_fields() {
        let mut model = model();
        let body = model.field_id("body").unwrap();
        let title = model.field_id("title").unwrap();
        let first = caret_in_block(&mut model, 0);
        update(&mut model, body, &FieldEvent::Click { target: first });

        let title_element = model.field(title).unwrap().element();
        let text = model.document().children(title_element)[0];
        model.document_mut().set_caret(text, 5);
        update(&mut model, title, &FieldEvent::Click { target: title_element });

        assert!(model.has_focus(title));
        let body_field = model.field(body).unwrap();
        assert_eq!(body_field.current_block(), None);
        assert!(!model
            .document()
            .is_connected(body_field.slot(crate::model::SlotKind::Action).mount_point()));
        assert!(!model.document().has_class(body_field.element(), "focus"));
    }

    #[test]
    fn test_non_focus_key_does_not_focus() {
        let mut model = model();
        let title = model.field_id("title").unwrap();
        update(&mut model, title, &FieldEvent::KeyUp(KeyCode::Char('x')));
        assert_eq!(model.focused(), None);
        update(&mut model, title, &FieldEvent::KeyUp(KeyCode::Left));
        assert!(model.has_focus(title));
    }

    #[test]
    fn test_click_on_own_toolbar_is_ignored() {
        let mut model = model();
        let id = model.field_id("body").unwrap();
        let mount = model
            .field(id)
            .unwrap()
            .slot(crate::model::SlotKind::Edition)
            .mount_point();
        update(&mut model, id, &FieldEvent::Click { target: mount });
        assert_eq!(model.focused(), None);
    }
}
