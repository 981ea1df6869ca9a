//! Content transitions: paste, length, placeholder, change and validation

use super::UpdateResult;
use crate::commands::Cmd;
use crate::dom::{escape_text, Selection};
use crate::keymap::{KeyCode, KeyFilter};
use crate::messages::FieldEvent;
use crate::model::{EditorModel, FieldId, FieldKind};
use crate::util::{collapse_whitespace, split_lines};
use crate::validate;

/// Replace the native paste with normalized clipboard text.
///
/// Simple fields get the text with whitespace runs collapsed; rich fields get
/// one block element per pasted line.
pub(super) fn paste(
    model: &mut EditorModel,
    id: FieldId,
    event: &FieldEvent,
    result: &mut UpdateResult,
) {
    result.default_prevented = true;
    let FieldEvent::Paste { text } = event else {
        return;
    };
    let Some((doc, field, config)) = model.parts_mut(id) else {
        return;
    };

    if !doc.selection_within(field.element) {
        let end = doc.end_boundary(field.element, &[field.action.mount_point()]);
        doc.set_selection(Selection::collapsed(end));
    }

    match field.kind() {
        FieldKind::Simple => {
            doc.insert_text(&collapse_whitespace(text));
        }
        FieldKind::Rich => {
            let tag = config.block_element.as_str();
            let html: String = split_lines(text)
                .into_iter()
                .map(|line| format!("<{0}>{1}</{0}>", tag, escape_text(line)))
                .collect();
            let blocks = doc.parse_fragment(&html);
            if doc.insert_blocks(field.element, &blocks) {
                tracing::debug!(field = %field.name(), blocks = blocks.len(), "pasted");
            }
        }
    }
}

pub(super) fn set_length(model: &mut EditorModel, id: FieldId) {
    if let Some((doc, field, _)) = model.parts_mut(id) {
        field.refresh_length(doc);
    }
}

pub(super) fn set_placeholder(model: &mut EditorModel, id: FieldId) {
    if let Some((doc, field, config)) = model.parts_mut(id) {
        field.set_placeholder(doc, &config.classes.placeholder);
    }
}

/// Hide the placeholder as soon as a key goes down, unless it is Tab
pub(super) fn unset_placeholder(model: &mut EditorModel, id: FieldId, event: &FieldEvent) {
    if event.key() == Some(KeyCode::Tab) {
        return;
    }
    if let Some((doc, field, config)) = model.parts_mut(id) {
        doc.remove_class(field.element, &config.classes.placeholder);
    }
}

/// Request a CHANGE for paste and for any key that is not pure navigation
pub(super) fn change(
    model: &mut EditorModel,
    id: FieldId,
    event: &FieldEvent,
    result: &mut UpdateResult,
) {
    let changed = match event {
        FieldEvent::Paste { .. } => true,
        _ => event
            .key()
            .is_some_and(|key| !KeyFilter::Navigation.matches(key)),
    };
    if !changed {
        return;
    }
    if let Some(field) = model.field(id) {
        result.push(Cmd::change(field.name()));
    }
}

pub(super) fn validate_max_length(model: &mut EditorModel, id: FieldId) {
    if let Some((doc, field, config)) = model.parts_mut(id) {
        validate::check_max_length(doc, field, &config.classes);
    }
}

pub(super) fn validate_require(model: &mut EditorModel, id: FieldId) {
    if let Some((doc, field, config)) = model.parts_mut(id) {
        validate::check_required(doc, field, &config.classes);
    }
}
