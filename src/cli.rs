//! Command-line argument parsing for the replay tool
//!
//! Supports:
//! - Loading a form from an HTML file
//! - Picking the container by element id
//! - Running a YAML replay script
//! - Overriding the config file

use clap::Parser;
use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::dom::{Document, NodeId};

/// Replay user input against a form and report field values as JSON
#[derive(Parser, Debug)]
#[command(
    name = "form-editor",
    version,
    about = "Replay user input against a form and report field values"
)]
pub struct CliArgs {
    /// HTML file holding the form
    #[arg(value_name = "FORM")]
    pub form: PathBuf,

    /// YAML replay script to run against the form
    #[arg(short, long, value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Id of the container element (defaults to the first top-level element)
    #[arg(long, value_name = "ID")]
    pub container: Option<String>,

    /// Pretty-print the JSON report
    #[arg(short, long)]
    pub pretty: bool,
}

impl CliArgs {
    /// Config from `--config`, or the user config file
    pub fn editor_config(&self) -> EditorConfig {
        match &self.config {
            Some(path) => EditorConfig::load_from(path),
            None => EditorConfig::load(),
        }
    }

    /// Resolve the container element in `doc`
    pub fn container_in(&self, doc: &Document) -> Result<Option<NodeId>, String> {
        match &self.container {
            Some(id) => doc
                .element_by_id(id)
                .map(Some)
                .ok_or_else(|| format!("No element with id `{}` in the form", id)),
            None => Ok(doc.element_children(doc.body()).first().copied()),
        }
    }
}
