//! Block structure transitions for rich and simple fields

use super::UpdateResult;
use crate::keymap::KeyCode;
use crate::messages::FieldEvent;
use crate::model::{EditorModel, FieldId};

/// Simple fields are single-line: cancel Enter
pub(super) fn disable_blocks(event: &FieldEvent, result: &mut UpdateResult) {
    if event.key() == Some(KeyCode::Enter) {
        result.default_prevented = true;
    }
}

/// Keep the caret inside a block element.
///
/// Runs when the caret's node has no element children (unless the key is
/// Backspace), or when an empty field is clicked. Clicks on the field's own
/// toolbars change nothing.
pub(super) fn blocks_creation(model: &mut EditorModel, id: FieldId, event: &FieldEvent) {
    let key = event.key();
    let Some((doc, field, config)) = model.parts_mut(id) else {
        return;
    };
    if event
        .target()
        .is_some_and(|target| field.is_toolbar_target(doc, target))
    {
        return;
    }
    if !doc.selection_within(field.element) {
        return;
    }

    let leaf = doc
        .current_node()
        .is_some_and(|node| doc.is_element(node) && doc.element_children(node).is_empty());
    let empty_click = field.length == 0 && key == Some(KeyCode::PrimaryButton);

    if (leaf && key != Some(KeyCode::Backspace)) || empty_click {
        if let Some(block) = doc.format_block(field.element, &config.block_element) {
            tracing::trace!(field = %field.name(), %block, "block formatted");
        }
    }
}

/// Replace an inserted `<span>` with a text node holding its text
pub(super) fn unset_span(model: &mut EditorModel, event: &FieldEvent) {
    let FieldEvent::NodeInserted { node } = *event else {
        return;
    };
    let doc = model.document_mut();
    if doc.tag_name(node) != Some("span") {
        return;
    }
    let Some(parent) = doc.parent(node) else {
        return;
    };

    let text = doc.inner_text(node);
    let caret_inside = doc
        .selection()
        .is_some_and(|selection| doc.contains(node, selection.anchor.node));
    let replacement = doc.create_text(&text);
    doc.insert_before(parent, replacement, Some(node));
    doc.remove_child(parent, node);
    if caret_inside {
        doc.set_caret(replacement, text.chars().count());
    }
    tracing::debug!(span = %node, "span unwrapped");
}
