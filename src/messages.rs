//! Message types for the Elm-style architecture
//!
//! Every host input a field reacts to arrives as a [`FieldEvent`]; editor-level
//! notifications published to subscribers are [`EditorEvent`]s.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dom::NodeId;
use crate::error::EditorError;
use crate::keymap::KeyCode;

/// Discriminant of a [`FieldEvent`], used as the listener table key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Paste,
    Click,
    MouseUp,
    KeyDown,
    KeyPress,
    KeyUp,
    NodeInserted,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        EventKind::Paste,
        EventKind::Click,
        EventKind::MouseUp,
        EventKind::KeyDown,
        EventKind::KeyPress,
        EventKind::KeyUp,
        EventKind::NodeInserted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Paste => "paste",
            EventKind::Click => "click",
            EventKind::MouseUp => "mouseup",
            EventKind::KeyDown => "keydown",
            EventKind::KeyPress => "keypress",
            EventKind::KeyUp => "keyup",
            EventKind::NodeInserted => "node-inserted",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw input event delivered to one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// Clipboard paste carrying the plain-text payload
    Paste { text: String },
    /// Primary-button click on `target` (the field element or a descendant)
    Click { target: NodeId },
    /// Pointer released over the field
    MouseUp,
    KeyDown(KeyCode),
    KeyPress(KeyCode),
    KeyUp(KeyCode),
    /// A node was inserted into the field's subtree
    NodeInserted { node: NodeId },
}

impl FieldEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            FieldEvent::Paste { .. } => EventKind::Paste,
            FieldEvent::Click { .. } => EventKind::Click,
            FieldEvent::MouseUp => EventKind::MouseUp,
            FieldEvent::KeyDown(_) => EventKind::KeyDown,
            FieldEvent::KeyPress(_) => EventKind::KeyPress,
            FieldEvent::KeyUp(_) => EventKind::KeyUp,
            FieldEvent::NodeInserted { .. } => EventKind::NodeInserted,
        }
    }

    /// The key behind the event, as `event.which` reports it.
    ///
    /// Mouse events carry the primary button; paste and mutation events have
    /// no key.
    pub fn key(&self) -> Option<KeyCode> {
        match self {
            FieldEvent::KeyDown(key) | FieldEvent::KeyPress(key) | FieldEvent::KeyUp(key) => {
                Some(*key)
            }
            FieldEvent::Click { .. } | FieldEvent::MouseUp => Some(KeyCode::PrimaryButton),
            FieldEvent::Paste { .. } | FieldEvent::NodeInserted { .. } => None,
        }
    }

    /// Explicit event target, when the event carries one
    pub fn target(&self) -> Option<NodeId> {
        match self {
            FieldEvent::Click { target } => Some(*target),
            FieldEvent::NodeInserted { node } => Some(*node),
            _ => None,
        }
    }
}

/// Notifications the editor publishes to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditorEvent {
    /// A field's content changed through typing or paste
    #[serde(rename = "CHANGE")]
    Change,
}

impl EditorEvent {
    pub const ALL: [EditorEvent; 1] = [EditorEvent::Change];

    pub fn as_str(self) -> &'static str {
        match self {
            EditorEvent::Change => "CHANGE",
        }
    }
}

impl fmt::Display for EditorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorEvent {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditorEvent::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| EditorError::InvalidEvent(s.to_string()))
    }
}
