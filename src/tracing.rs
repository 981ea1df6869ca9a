//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging focus,
//! toolbar and field state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=field=debug,transition=trace` - scoped filtering
//! - `RUST_LOG=form_editor::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/form-editor/logs/form-editor.log` with daily
//! rotation. File logging uses debug level by default for more verbose
//! troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::ConfigPaths;
use crate::model::{EditorModel, FieldId};

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr and respects RUST_LOG (default `warn`).
/// File logging writes to `~/.config/form-editor/logs/form-editor.log` with
/// daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let logs = ConfigPaths::from_env().map(|paths| paths.ensure_logs_dir());
    let file_layer = match logs {
        Some(Ok(logs_dir)) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "form-editor.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Some(Err(e)) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
        None => {
            eprintln!("Warning: No config directory available, file logging disabled");
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of editor-wide field state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSnapshot {
    pub focused: Option<String>,
    pub toolbar_owner: Option<String>,
    pub fields: Vec<FieldInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    pub name: String,
    pub length: usize,
    pub valid: bool,
    pub has_block: bool,
}

impl FieldSnapshot {
    pub fn from_model(model: &EditorModel) -> Self {
        let name_of = |id: FieldId| model.field(id).map(|f| f.name().to_string());
        Self {
            focused: model.focused().and_then(name_of),
            toolbar_owner: model.toolbar().and_then(|t| name_of(t.owner)),
            fields: model
                .fields()
                .map(|f| FieldInfo {
                    name: f.name().to_string(),
                    length: f.length(),
                    valid: f.is_valid(),
                    has_block: f.current_block().is_some(),
                })
                .collect(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &FieldSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.focused != other.focused {
            changes.push(format!(
                "focus: {} → {}",
                self.focused.as_deref().unwrap_or("-"),
                other.focused.as_deref().unwrap_or("-")
            ));
        }
        if self.toolbar_owner != other.toolbar_owner {
            let status = match &other.toolbar_owner {
                Some(owner) => format!("shown for {}", owner),
                None => "hidden".to_string(),
            };
            changes.push(format!("toolbar {}", status));
        }

        for (before, after) in self.fields.iter().zip(&other.fields) {
            if before.length != after.length {
                changes.push(format!(
                    "{}: length {} → {}",
                    after.name, before.length, after.length
                ));
            }
            if before.valid != after.valid {
                let status = if after.valid { "valid" } else { "invalid" };
                changes.push(format!("{}: {}", after.name, status));
            }
            if before.has_block != after.has_block {
                let status = if after.has_block {
                    "anchored"
                } else {
                    "removed"
                };
                changes.push(format!("{}: action toolbar {}", after.name, status));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
