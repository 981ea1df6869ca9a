//! Command types for the Elm-style architecture
//!
//! Commands are the side effects a field transition asks the editor to perform
//! once the transition has finished mutating state.

use crate::messages::EditorEvent;

/// Side effects requested by the update functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Publish `event` to its subscribers with the named field's descriptor
    Emit { event: EditorEvent, field: String },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Publish a `CHANGE` for `field`
    pub fn change(field: impl Into<String>) -> Self {
        Cmd::Emit {
            event: EditorEvent::Change,
            field: field.into(),
        }
    }

    /// Combine an optional command with another
    pub fn and(self, other: Cmd) -> Cmd {
        match (self, other) {
            (Cmd::None, cmd) | (cmd, Cmd::None) => cmd,
            (Cmd::Batch(mut cmds), cmd) => {
                cmds.push(cmd);
                Cmd::Batch(cmds)
            }
            (first, second) => Cmd::Batch(vec![first, second]),
        }
    }

    /// Flatten into the emits this command performs, in order
    pub fn into_emits(self) -> Vec<(EditorEvent, String)> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Emit { event, field } => vec![(event, field)],
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::into_emits).collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }
}
