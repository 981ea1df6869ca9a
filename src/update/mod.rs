//! Update functions for the Elm-style architecture
//!
//! A field event runs the field's listener list for that event kind, in order.
//! Each transition mutates the model in place and may request commands.

mod blocks;
mod focus;
mod text_edit;
mod toolbar;

use crate::commands::Cmd;
use crate::messages::FieldEvent;
use crate::model::{EditorModel, FieldId, Transition};

#[cfg(debug_assertions)]
use crate::tracing::FieldSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use focus::enclosing_block;

/// What running one event through a field produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateResult {
    /// A transition cancelled the host's default action (paste, Enter)
    pub default_prevented: bool,
    pub cmd: Cmd,
}

impl UpdateResult {
    fn push(&mut self, cmd: Cmd) {
        self.cmd = std::mem::take(&mut self.cmd).and(cmd);
    }
}

/// Main update function - runs `event` through field `id`'s listeners
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut EditorModel, id: FieldId, event: &FieldEvent) -> UpdateResult {
    #[cfg(debug_assertions)]
    {
        update_traced(model, id, event)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, id, event)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut EditorModel, id: FieldId, event: &FieldEvent) -> UpdateResult {
    let mut result = UpdateResult::default();
    let transitions = match model.field(id) {
        Some(field) => field.listeners().transitions(event.kind()).to_vec(),
        None => return result,
    };

    for transition in transitions {
        apply(model, id, transition, event, &mut result);
    }
    result
}

fn apply(
    model: &mut EditorModel,
    id: FieldId,
    transition: Transition,
    event: &FieldEvent,
    result: &mut UpdateResult,
) {
    tracing::trace!(target: "transition", ?transition, field = id.0);
    match transition {
        Transition::Paste => text_edit::paste(model, id, event, result),
        Transition::SetLength => text_edit::set_length(model, id),
        Transition::Change => text_edit::change(model, id, event, result),
        Transition::Focus => focus::focus(model, id, event),
        Transition::UnsetPlaceholder => text_edit::unset_placeholder(model, id, event),
        Transition::SetPlaceholder => text_edit::set_placeholder(model, id),
        Transition::DisableBlocks => blocks::disable_blocks(event, result),
        Transition::BlocksCreation => blocks::blocks_creation(model, id, event),
        Transition::Selection => toolbar::selection(model, id),
        Transition::UnsetSpan => blocks::unset_span(model, event),
        Transition::ValidateMaxLength => text_edit::validate_max_length(model, id),
        Transition::ValidateRequire => text_edit::validate_require(model, id),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after field state and logs diffs for debugging.
#[cfg(debug_assertions)]
fn update_traced(model: &mut EditorModel, id: FieldId, event: &FieldEvent) -> UpdateResult {
    let field_name = model
        .field(id)
        .map(|f| f.name().to_string())
        .unwrap_or_default();
    let _span = span!(Level::DEBUG, "update", field = %field_name, event = %event.kind()).entered();

    let before = FieldSnapshot::from_model(model);
    debug!(target: "message", event = ?event, "processing");

    let result = update_inner(model, id, event);

    let after = FieldSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "field", %diff, "state changed");
    }

    model.assert_invariants(&format!("{}::{}", field_name, event.kind()));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::dom::Document;
    use crate::keymap::KeyCode;

    fn model() -> EditorModel {
        let doc = Document::from_html(
            r#"<form><div data-field="title" data-placeholder="Title"></div></form>"#,
        );
        let form = doc.children(doc.body())[0];
        let (model, _) = EditorModel::build(doc, Some(form), EditorConfig::default()).unwrap();
        model
    }

    #[test]
    fn test_enter_is_cancelled_in_simple_field() {
        let mut model = model();
        let id = model.field_id("title").unwrap();
        let result = update(&mut model, id, &FieldEvent::KeyPress(KeyCode::Enter));
        assert!(result.default_prevented);
        assert!(result.cmd.is_none());
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let mut model = model();
        let result = update(&mut model, FieldId(9), &FieldEvent::MouseUp);
        assert_eq!(result, UpdateResult::default());
    }

    #[test]
    fn test_detached_field_ignores_events() {
        let mut model = model();
        let id = model.field_id("title").unwrap();
        if let Some((_, field, _)) = model.parts_mut(id) {
            field.listeners.detach();
        }
        let result = update(&mut model, id, &FieldEvent::Paste { text: "x".into() });
        assert!(!result.default_prevented);
    }
}
