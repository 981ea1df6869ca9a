//! Model types for the Elm-style architecture
//!
//! [`EditorModel`] owns the host document and every field. Focus and the
//! floating edition toolbar are editor-wide state with a single writer each:
//! [`EditorModel::focus_field`] and the selection transition.

pub mod field;
pub mod listeners;
pub mod plugin;

use indexmap::IndexMap;

pub use field::{Field, FieldConfig, FieldDescriptor, FieldId, FieldKind, FieldValue};
pub use listeners::{Listeners, Transition};
pub use plugin::{Plugin, PluginContext, PluginFactory, PluginSlot, SlotKind};

use crate::config::EditorConfig;
use crate::dom::{Document, NodeId, Point, Selection};
use crate::error::{EditorError, Result};
use crate::util::{AttrType, AttrValue, AttributeReader};

/// The edition toolbar while it is shown
#[derive(Debug, Clone, PartialEq)]
pub struct EditionToolbar {
    /// Field whose edition mount is attached to the document
    pub owner: FieldId,
    /// Selection the toolbar was shown for
    pub selection: Selection,
    /// Top-left corner the mount was placed at, in page coordinates
    pub position: Point,
}

/// Editor state: the document, its fields, focus and toolbar ownership
#[derive(Debug)]
pub struct EditorModel {
    pub(crate) doc: Document,
    pub(crate) config: EditorConfig,
    pub(crate) container: NodeId,
    /// Fields keyed by name, in registration (reverse document) order
    pub(crate) fields: IndexMap<String, Field>,
    pub(crate) focused: Option<FieldId>,
    pub(crate) toolbar: Option<EditionToolbar>,
    pub(crate) destroyed: bool,
}

impl EditorModel {
    /// Build one field per recognized child of `container`.
    ///
    /// Children missing a name or placeholder are skipped; the returned
    /// warnings say which and why.
    pub fn build(
        doc: Document,
        container: Option<NodeId>,
        config: EditorConfig,
    ) -> Result<(Self, Vec<EditorError>)> {
        let container = container
            .ok_or_else(|| EditorError::Construction("no container was passed".into()))?;
        if !doc.is_element(container) {
            return Err(EditorError::Construction(format!(
                "container {} is not an element",
                container
            )));
        }
        let children = doc.element_children(container);
        if children.is_empty() {
            return Err(EditorError::Construction(format!(
                "container {} has no children",
                container
            )));
        }

        let mut model = Self {
            doc,
            config,
            container,
            fields: IndexMap::new(),
            focused: None,
            toolbar: None,
            destroyed: false,
        };
        let mut warnings = Vec::new();

        for (index, &element) in children.iter().enumerate().rev() {
            let field_config = match model.read_field_config(element, index) {
                Ok(field_config) => field_config,
                Err(e) => {
                    tracing::warn!("{}", e);
                    warnings.push(e);
                    continue;
                }
            };
            model.add_field(element, index, field_config);
        }

        tracing::debug!(
            fields = model.fields.len(),
            skipped = warnings.len(),
            "editor built"
        );
        Ok((model, warnings))
    }

    fn read_field_config(&self, element: NodeId, index: usize) -> Result<FieldConfig> {
        let prefix = self.config.attribute_prefix.as_str();
        let reader = AttributeReader::new(&self.doc, prefix);
        let missing = |name: &str| EditorError::MissingAttribute {
            index,
            attribute: format!("{}{}", prefix, name),
        };

        let name = reader.read("field", element, AttrType::Str, None);
        let name = name.as_str().ok_or_else(|| missing("field"))?;
        let placeholder = reader.read("placeholder", element, AttrType::Str, None);
        let placeholder = placeholder.as_str().ok_or_else(|| missing("placeholder"))?;

        let kind_value = reader.read(
            "type",
            element,
            AttrType::Str,
            Some(AttrValue::Str(FieldKind::Simple.to_string())),
        );
        let kind = kind_value
            .as_str()
            .unwrap_or_default()
            .parse::<FieldKind>()
            .unwrap_or_else(|e| {
                tracing::warn!(field = %name, "{}, treating as simple", e);
                FieldKind::Simple
            });

        let max_length = reader
            .read("length", element, AttrType::Int, None)
            .as_int()
            .filter(|&n| n > 0)
            .and_then(|n| usize::try_from(n).ok());
        let required = reader
            .read("require", element, AttrType::Bool, None)
            .as_bool();

        Ok(FieldConfig {
            name: name.to_string(),
            kind,
            placeholder: placeholder.to_string(),
            max_length,
            required,
        })
    }

    fn add_field(&mut self, element: NodeId, index: usize, field_config: FieldConfig) {
        self.doc.set_attribute(element, "contenteditable", "true");
        self.doc.set_style(element, "min-height", "1em");
        self.doc
            .set_attribute(element, "tabindex", &(index + 1).to_string());

        let name = field_config.name.clone();
        let mut field = Field::new(&mut self.doc, element, field_config);
        field.refresh_length(&self.doc);
        field.set_placeholder(&mut self.doc, &self.config.classes.placeholder);

        if self.fields.insert(name.clone(), field).is_some() {
            tracing::warn!(field = %name, "duplicate field name, keeping element at child {}", index);
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn field_id(&self, name: &str) -> Option<FieldId> {
        self.fields.get_index_of(name).map(FieldId)
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get_index(id.0).map(|(_, field)| field)
    }

    /// Document, one field and the config, borrowed together
    pub(crate) fn parts_mut(
        &mut self,
        id: FieldId,
    ) -> Option<(&mut Document, &mut Field, &EditorConfig)> {
        let field = self.fields.get_index_mut(id.0).map(|(_, field)| field)?;
        Some((&mut self.doc, field, &self.config))
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Fields in registration order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn focused(&self) -> Option<FieldId> {
        self.focused
    }

    pub fn has_focus(&self, id: FieldId) -> bool {
        self.focused == Some(id)
    }

    pub fn toolbar(&self) -> Option<&EditionToolbar> {
        self.toolbar.as_ref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Live listeners across every field
    pub fn listener_count(&self) -> usize {
        self.fields.values().map(|f| f.listeners.listener_count()).sum()
    }

    pub fn descriptors(&self) -> IndexMap<String, FieldDescriptor> {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), field.descriptor()))
            .collect()
    }

    /// Give `id` focus and take it from every other field in one step.
    ///
    /// Other rich fields holding an action toolbar lose it.
    pub(crate) fn focus_field(&mut self, id: FieldId) {
        let class = self.config.classes.focus.as_str();
        for (index, field) in self.fields.values_mut().enumerate() {
            if index == id.0 {
                self.doc.add_class(field.element, class);
                continue;
            }
            self.doc.remove_class(field.element, class);
            if field.kind().is_rich() && field.current_block.is_some() {
                field.unset_action(&mut self.doc);
            }
        }
        if self.focused != Some(id) {
            tracing::debug!(from = ?self.focused, to = id.0, "focus moved");
        }
        self.focused = Some(id);
    }

    /// Check model invariants (debug builds only)
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self, context: &str) {
        let class = self.config.classes.focus.as_str();
        let focused: Vec<_> = self
            .fields
            .values()
            .filter(|f| self.doc.has_class(f.element, class))
            .map(Field::name)
            .collect();
        debug_assert!(
            focused.len() <= 1,
            "[{}] more than one focused field: {:?}",
            context,
            focused
        );
        if let Some(toolbar) = &self.toolbar {
            debug_assert!(
                self.field(toolbar.owner).is_some(),
                "[{}] toolbar owned by unknown field {:?}",
                context,
                toolbar.owner
            );
        }
    }
}
