//! Toolbar plugin slots
//!
//! A rich field exposes two slots: `action`, a toolbar anchored after the
//! caret's block, and `edition`, a floating toolbar over a text selection.
//! Plugins render their own control into the slot's mount point and are
//! notified before the toolbar is shown and when the editor is destroyed.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::field::FieldDescriptor;
use crate::config::EditorConfig;
use crate::dom::{Document, NodeId};
use crate::error::EditorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// Per-block toolbar
    Action,
    /// Per-selection toolbar
    Edition,
}

impl SlotKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SlotKind::Action => "action",
            SlotKind::Edition => "edition",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotKind {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "action" => Ok(SlotKind::Action),
            "edition" => Ok(SlotKind::Edition),
            other => Err(EditorError::InvalidSlot(other.to_string())),
        }
    }
}

/// A toolbar control supplied by the host
pub trait Plugin {
    /// Registry key within the slot
    fn name(&self) -> &str;

    /// Build the control to mount; called once per registration
    fn register(&mut self, doc: &mut Document) -> NodeId;

    /// Called before the owning toolbar becomes visible
    fn before_show(&mut self, _doc: &mut Document) {}

    /// Called once when the editor is destroyed
    fn destroy(&mut self, _doc: &mut Document) {}
}

/// What a factory is told about the plugin it is about to build
#[derive(Debug, Clone, Copy)]
pub struct PluginContext<'a> {
    pub slot: SlotKind,
    pub mount_point: NodeId,
    pub field: &'a FieldDescriptor,
    pub config: &'a EditorConfig,
    /// Every field of the editor, in registration order
    pub fields: &'a IndexMap<String, FieldDescriptor>,
}

/// Builds one plugin instance per rich field
pub trait PluginFactory {
    fn create(&self, cx: &PluginContext<'_>) -> Box<dyn Plugin>;
}

impl<F> PluginFactory for F
where
    F: Fn(&PluginContext<'_>) -> Box<dyn Plugin>,
{
    fn create(&self, cx: &PluginContext<'_>) -> Box<dyn Plugin> {
        self(cx)
    }
}

/// A toolbar mount point and the plugins registered into it
pub struct PluginSlot {
    kind: SlotKind,
    mount_point: NodeId,
    plugins: IndexMap<String, Box<dyn Plugin>>,
}

impl fmt::Debug for PluginSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginSlot")
            .field("kind", &self.kind)
            .field("mount_point", &self.mount_point)
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PluginSlot {
    /// Create the slot with a detached, non-editable mount point
    pub fn new(doc: &mut Document, kind: SlotKind) -> Self {
        let mount_point = doc.create_element("div");
        doc.set_attribute(mount_point, "contenteditable", "false");
        match kind {
            SlotKind::Action => doc.set_attribute(mount_point, "id", "actionBar"),
            SlotKind::Edition => {
                doc.set_attribute(mount_point, "id", "editionBar");
                doc.set_style(mount_point, "position", "absolute");
                doc.set_style(mount_point, "z-index", "9999");
            }
        }
        Self {
            kind,
            mount_point,
            plugins: IndexMap::new(),
        }
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    pub fn mount_point(&self) -> NodeId {
        self.mount_point
    }

    /// Mount `plugin`'s control and store it under its name.
    ///
    /// A second plugin with the same name replaces the first in the registry,
    /// but the first control stays mounted.
    pub fn mount(&mut self, doc: &mut Document, mut plugin: Box<dyn Plugin>) {
        let control = plugin.register(doc);
        doc.append_child(self.mount_point, control);
        let name = plugin.name().to_string();
        if self.plugins.insert(name.clone(), plugin).is_some() {
            tracing::debug!(slot = %self.kind, plugin = %name, "plugin replaced in registry");
        }
    }

    pub fn plugin_names(&self) -> Vec<String> {
        self.plugins.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn before_show(&mut self, doc: &mut Document) {
        for plugin in self.plugins.values_mut() {
            plugin.before_show(doc);
        }
    }

    pub fn destroy(&mut self, doc: &mut Document) {
        for plugin in self.plugins.values_mut() {
            plugin.destroy(doc);
        }
    }
}
