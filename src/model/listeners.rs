//! Per-field listener tables
//!
//! Each event kind maps to an ordered list of transitions, fixed at
//! construction from the field kind and its optional validation rules.

use indexmap::IndexMap;
use serde::Serialize;

use super::field::{FieldConfig, FieldKind};
use crate::messages::EventKind;

/// One step of the field state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transition {
    /// Cancel the native paste and insert normalized clipboard text
    Paste,
    /// Recompute length (and validity) from the current markup
    SetLength,
    /// Publish CHANGE unless the key is a navigation key
    Change,
    /// Take focus, clearing it on every other field
    Focus,
    UnsetPlaceholder,
    SetPlaceholder,
    /// Cancel Enter in single-line fields
    DisableBlocks,
    /// Wrap the caret's content in the default block element
    BlocksCreation,
    /// Toggle the edition toolbar over the selection
    Selection,
    /// Replace an inserted inline span with its text
    UnsetSpan,
    ValidateMaxLength,
    ValidateRequire,
}

#[derive(Debug, Clone)]
pub struct Listeners {
    table: IndexMap<EventKind, Vec<Transition>>,
    attached: bool,
}

impl Listeners {
    pub fn for_field(config: &FieldConfig) -> Self {
        use Transition::*;

        let mut table = IndexMap::new();
        match config.kind {
            FieldKind::Simple => {
                table.insert(EventKind::Paste, vec![Paste, SetLength, Change]);
                table.insert(EventKind::Click, vec![Focus]);
                table.insert(EventKind::KeyDown, vec![UnsetPlaceholder]);
                table.insert(EventKind::KeyPress, vec![DisableBlocks]);
                table.insert(
                    EventKind::KeyUp,
                    vec![SetLength, SetPlaceholder, Focus, Change],
                );
            }
            FieldKind::Rich => {
                table.insert(EventKind::Paste, vec![Paste, SetLength, Change]);
                table.insert(EventKind::Click, vec![BlocksCreation, Focus]);
                table.insert(EventKind::MouseUp, vec![Selection]);
                table.insert(EventKind::KeyDown, vec![UnsetPlaceholder]);
                table.insert(
                    EventKind::KeyUp,
                    vec![SetLength, BlocksCreation, Focus, SetPlaceholder, Change],
                );
                table.insert(EventKind::NodeInserted, vec![UnsetSpan]);
            }
        }

        if let Some(keyup) = table.get_mut(&EventKind::KeyUp) {
            if config.max_length.is_some() {
                keyup.push(ValidateMaxLength);
            }
            if config.required {
                keyup.push(ValidateRequire);
            }
        }

        Self {
            table,
            attached: true,
        }
    }

    /// Transitions to run for `kind`; empty once detached
    pub fn transitions(&self, kind: EventKind) -> &[Transition] {
        if !self.attached {
            return &[];
        }
        self.table.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Detach every listener. Detaching twice is a no-op.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Number of live listeners
    pub fn listener_count(&self) -> usize {
        if self.attached {
            self.table.values().map(Vec::len).sum()
        } else {
            0
        }
    }
}
