//! Field entity: one editable region with its configuration and derived state

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::listeners::Listeners;
use super::plugin::{PluginSlot, SlotKind};
use crate::dom::{Document, NodeId};
use crate::util::{markup_length, single_line_value};
use crate::validate;

/// Position of a field in the editor's registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub usize);

/// How a field edits its content; fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line plain text
    #[default]
    Simple,
    /// Block-structured markup with action and edition toolbars
    Rich,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Simple => "simple",
            FieldKind::Rich => "rich",
        }
    }

    pub fn is_rich(self) -> bool {
        self == FieldKind::Rich
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(FieldKind::Simple),
            "rich" => Ok(FieldKind::Rich),
            other => Err(format!("unknown field type `{}`", other)),
        }
    }
}

/// Configuration read off a field's element at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfig {
    pub name: String,
    pub kind: FieldKind,
    pub placeholder: String,
    /// Positive length ceiling; `None` means unbounded
    pub max_length: Option<usize>,
    pub required: bool,
}

/// Read-only view of a field handed to subscribers and plugin factories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub element: NodeId,
    #[serde(rename = "maxLength")]
    pub max_length: Option<usize>,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: String,
    /// Names of mounted plugins per slot, in registration order
    pub plugins: IndexMap<SlotKind, Vec<String>>,
}

/// Live value snapshot of one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValue {
    pub name: String,
    pub length: usize,
    pub value: String,
    pub valid: bool,
}

/// One editable region plus its derived metrics and plugin slots
#[derive(Debug)]
pub struct Field {
    pub(crate) config: FieldConfig,
    pub(crate) element: NodeId,
    pub(crate) length: usize,
    pub(crate) valid: bool,
    /// Rich fields: block the action toolbar is anchored after
    pub(crate) current_block: Option<NodeId>,
    pub(crate) action: PluginSlot,
    pub(crate) edition: PluginSlot,
    pub(crate) listeners: Listeners,
}

impl Field {
    /// Build a field around `element`, creating its two toolbar mounts
    pub fn new(doc: &mut Document, element: NodeId, config: FieldConfig) -> Self {
        let action = PluginSlot::new(doc, SlotKind::Action);
        let edition = PluginSlot::new(doc, SlotKind::Edition);
        let listeners = Listeners::for_field(&config);
        Self {
            config,
            element,
            length: 0,
            valid: false,
            current_block: None,
            action,
            edition,
            listeners,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn kind(&self) -> FieldKind {
        self.config.kind
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Validity as of the last length change
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn current_block(&self) -> Option<NodeId> {
        self.current_block
    }

    pub fn slot(&self, kind: SlotKind) -> &PluginSlot {
        match kind {
            SlotKind::Action => &self.action,
            SlotKind::Edition => &self.edition,
        }
    }

    pub(crate) fn slot_mut(&mut self, kind: SlotKind) -> &mut PluginSlot {
        match kind {
            SlotKind::Action => &mut self.action,
            SlotKind::Edition => &mut self.edition,
        }
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    /// Whether `node` lies inside one of this field's toolbar mounts
    pub fn is_toolbar_target(&self, doc: &Document, node: NodeId) -> bool {
        doc.contains(self.action.mount_point(), node)
            || doc.contains(self.edition.mount_point(), node)
    }

    /// Field markup without the field's own action toolbar
    pub fn content_markup(&self, doc: &Document) -> String {
        doc.inner_html_excluding(self.element, &[self.action.mount_point()])
    }

    /// Recompute `length` from the current markup, then `valid` from it
    pub fn refresh_length(&mut self, doc: &Document) {
        self.length = markup_length(&self.content_markup(doc));
        self.valid = validate::evaluate(self.length, &self.config).is_valid();
    }

    /// Current value: single-line text for simple fields, markup for rich ones
    pub fn value(&self, doc: &Document) -> String {
        match self.config.kind {
            FieldKind::Simple => single_line_value(&doc.inner_text(self.element)),
            FieldKind::Rich => self.content_markup(doc),
        }
    }

    /// Show the placeholder when the field is empty.
    ///
    /// Leftover markup (an empty block, a stray `<br>`) is cleared, which also
    /// drops the action toolbar; a caret left detached moves to the field start.
    pub fn set_placeholder(&mut self, doc: &mut Document, class: &str) {
        if self.length > 0 {
            return;
        }
        doc.clear_children(self.element);
        doc.add_class(self.element, class);
        self.current_block = None;
        let detached = doc
            .selection()
            .is_some_and(|selection| !doc.is_connected(selection.anchor.node));
        if detached {
            doc.set_caret(self.element, 0);
        }
    }

    /// Remove the action toolbar and forget the anchored block
    pub fn unset_action(&mut self, doc: &mut Document) {
        let mount = self.action.mount_point();
        if doc
            .parent(mount)
            .is_some_and(|parent| doc.contains(self.element, parent))
        {
            doc.detach(mount);
        }
        self.current_block = None;
    }

    pub fn descriptor(&self) -> FieldDescriptor {
        let mut plugins = IndexMap::new();
        plugins.insert(SlotKind::Action, self.action.plugin_names());
        plugins.insert(SlotKind::Edition, self.edition.plugin_names());
        FieldDescriptor {
            name: self.config.name.clone(),
            element: self.element,
            max_length: self.config.max_length,
            kind: self.config.kind,
            required: self.config.required,
            placeholder: self.config.placeholder.clone(),
            plugins,
        }
    }
}
