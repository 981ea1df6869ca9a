//! Editor facade: construction, introspection, plugins and CHANGE pub/sub

use std::fmt;

use indexmap::IndexMap;

use crate::commands::Cmd;
use crate::config::EditorConfig;
use crate::dom::{Document, NodeId};
use crate::error::{EditorError, Result};
use crate::messages::{EditorEvent, FieldEvent};
use crate::model::{
    EditorModel, Field, FieldDescriptor, FieldValue, PluginContext, PluginFactory, SlotKind,
};
use crate::update::update;
use crate::validate;

/// Callback invoked with the descriptor of the field an event is about
pub type Subscriber = Box<dyn FnMut(&FieldDescriptor)>;

/// Result of dispatching one event to a field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The host should not perform its default action for the event
    pub default_prevented: bool,
    /// Number of notifications published while handling the event
    pub emitted: usize,
}

/// Form-field editor over a container of field elements
pub struct Editor {
    model: EditorModel,
    subscribers: IndexMap<EditorEvent, Vec<Subscriber>>,
    warnings: Vec<EditorError>,
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("model", &self.model)
            .field(
                "subscribers",
                &self
                    .subscribers
                    .iter()
                    .map(|(event, subs)| (*event, subs.len()))
                    .collect::<Vec<_>>(),
            )
            .field("warnings", &self.warnings)
            .finish()
    }
}

impl Editor {
    /// Build an editor over `container` with the default configuration
    pub fn new(doc: Document, container: Option<NodeId>) -> Result<Self> {
        Self::with_config(doc, container, EditorConfig::default())
    }

    pub fn with_config(
        doc: Document,
        container: Option<NodeId>,
        config: EditorConfig,
    ) -> Result<Self> {
        let (model, warnings) = EditorModel::build(doc, container, config)?;
        let subscribers = EditorEvent::ALL
            .into_iter()
            .map(|event| (event, Vec::new()))
            .collect();
        Ok(Self {
            model,
            subscribers,
            warnings,
        })
    }

    /// Children skipped during construction, with the reason for each
    pub fn construction_warnings(&self) -> &[EditorError] {
        &self.warnings
    }

    pub fn model(&self) -> &EditorModel {
        &self.model
    }

    pub fn document(&self) -> &Document {
        self.model.document()
    }

    /// Host access to the document (caret placement, measured sizes, scroll)
    pub fn document_mut(&mut self) -> &mut Document {
        self.model.document_mut()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.model.field_by_name(name)
    }

    /// Name of the focused field, if any
    pub fn focused_field(&self) -> Option<&str> {
        self.model
            .focused()
            .and_then(|id| self.model.field(id))
            .map(Field::name)
    }

    /// Read-only descriptors of every field, in registration order
    pub fn fields(&self) -> IndexMap<String, FieldDescriptor> {
        self.model.descriptors()
    }

    /// Live length, value and validity of every field.
    ///
    /// Validation refreshes each field's `invalid` flag.
    pub fn values(&mut self) -> IndexMap<String, FieldValue> {
        let EditorModel {
            doc,
            config,
            fields,
            ..
        } = &mut self.model;
        fields
            .iter()
            .map(|(name, field)| {
                let value = FieldValue {
                    name: name.clone(),
                    length: field.length(),
                    value: field.value(doc),
                    valid: validate::validate(doc, field, &config.classes),
                };
                (name.clone(), value)
            })
            .collect()
    }

    /// Instantiate one plugin per rich field and mount its control into the
    /// field's `slot` toolbar. Returns the number of controls mounted.
    pub fn register(&mut self, slot: SlotKind, factory: &dyn PluginFactory) -> usize {
        if self.model.is_destroyed() {
            tracing::warn!(%slot, "register called on a destroyed editor");
            return 0;
        }

        let snapshot = self.model.descriptors();
        let mut mounted = 0;
        for index in 0..self.model.len() {
            let id = crate::model::FieldId(index);
            let Some((doc, field, config)) = self.model.parts_mut(id) else {
                continue;
            };
            if !field.kind().is_rich() {
                continue;
            }
            let descriptor = field.descriptor();
            let cx = PluginContext {
                slot,
                mount_point: field.slot(slot).mount_point(),
                field: &descriptor,
                config,
                fields: &snapshot,
            };
            let plugin = factory.create(&cx);
            tracing::debug!(field = %field.name(), %slot, plugin = %plugin.name(), "plugin registered");
            field.slot_mut(slot).mount(doc, plugin);
            mounted += 1;
        }
        mounted
    }

    /// Register `callback` for `event` (currently only `"CHANGE"`)
    pub fn subscribe<F>(&mut self, event: &str, callback: F) -> Result<()>
    where
        F: FnMut(&FieldDescriptor) + 'static,
    {
        let event = event.parse::<EditorEvent>()?;
        self.subscribers
            .entry(event)
            .or_default()
            .push(Box::new(callback));
        Ok(())
    }

    /// Publish `event` for field `field` to every subscriber, in subscription order
    pub fn emit(&mut self, event: &str, field: &str) -> Result<()> {
        let event = event.parse::<EditorEvent>()?;
        self.publish(event, field)
    }

    fn publish(&mut self, event: EditorEvent, field: &str) -> Result<()> {
        let descriptor = self
            .model
            .field_by_name(field)
            .map(Field::descriptor)
            .ok_or_else(|| EditorError::UnknownField(field.to_string()))?;
        if let Some(subscribers) = self.subscribers.get_mut(&event) {
            tracing::debug!(%event, field, subscribers = subscribers.len(), "emit");
            for callback in subscribers.iter_mut() {
                callback(&descriptor);
            }
        }
        Ok(())
    }

    /// Deliver a host input event to the named field
    pub fn dispatch(&mut self, field: &str, event: FieldEvent) -> Result<EventOutcome> {
        let id = self
            .model
            .field_id(field)
            .ok_or_else(|| EditorError::UnknownField(field.to_string()))?;
        let result = update(&mut self.model, id, &event);
        let emitted = self.process_cmd(result.cmd)?;
        Ok(EventOutcome {
            default_prevented: result.default_prevented,
            emitted,
        })
    }

    fn process_cmd(&mut self, cmd: Cmd) -> Result<usize> {
        let emits = cmd.into_emits();
        let count = emits.len();
        for (event, field) in emits {
            self.publish(event, &field)?;
        }
        Ok(count)
    }

    /// Detach every field's listeners and destroy every mounted plugin.
    ///
    /// Fields stay readable afterwards; a second call does nothing.
    pub fn destroy(&mut self) {
        if self.model.is_destroyed() {
            tracing::debug!("editor already destroyed");
            return;
        }
        let EditorModel { doc, fields, .. } = &mut self.model;
        for field in fields.values_mut() {
            field.listeners.detach();
            if field.kind().is_rich() {
                field.action.destroy(doc);
                field.edition.destroy(doc);
            }
        }
        self.model.destroyed = true;
        tracing::debug!(fields = self.model.len(), "editor destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.model.is_destroyed()
    }

    /// Live listeners across every field; zero once destroyed
    pub fn listener_count(&self) -> usize {
        self.model.listener_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn editor() -> Editor {
        let doc = Document::from_html(
            r#"<form><div data-field="title" data-placeholder="Title">Hi</div></form>"#,
        );
        let form = doc.children(doc.body())[0];
        Editor::new(doc, Some(form)).unwrap()
    }

    #[test]
    fn test_subscribe_rejects_unknown_event() {
        let mut editor = editor();
        assert_eq!(
            editor.subscribe("SAVE", |_| {}),
            Err(EditorError::InvalidEvent("SAVE".into()))
        );
        assert_eq!(
            editor.emit("SAVE", "title"),
            Err(EditorError::InvalidEvent("SAVE".into()))
        );
    }

    #[test]
    fn test_emit_calls_subscribers_in_order() {
        let mut editor = editor();
        let calls = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second"] {
            let calls = Rc::clone(&calls);
            editor
                .subscribe("CHANGE", move |field| {
                    calls.borrow_mut().push(format!("{}:{}", tag, field.name))
                })
                .unwrap();
        }

        editor.emit("CHANGE", "title").unwrap();
        assert_eq!(*calls.borrow(), vec!["first:title", "second:title"]);
        assert_eq!(
            editor.emit("CHANGE", "nope"),
            Err(EditorError::UnknownField("nope".into()))
        );
    }

    #[test]
    fn test_dispatch_unknown_field() {
        let mut editor = editor();
        assert!(matches!(
            editor.dispatch("nope", FieldEvent::MouseUp),
            Err(EditorError::UnknownField(_))
        ));
    }
}
