use anyhow::{Context, Result};
use clap::Parser;

use form_editor::cli::CliArgs;
use form_editor::dom::Document;
use form_editor::replay::{self, ReplayScript};
use form_editor::Editor;

fn main() -> Result<()> {
    form_editor::tracing::init();

    let args = CliArgs::parse();

    let html = std::fs::read_to_string(&args.form)
        .with_context(|| format!("Failed to read form {}", args.form.display()))?;
    let doc = Document::from_html(&html);
    let container = args.container_in(&doc).map_err(anyhow::Error::msg)?;

    let mut editor = Editor::with_config(doc, container, args.editor_config())
        .with_context(|| format!("Failed to build editor for {}", args.form.display()))?;

    let script = match &args.script {
        Some(path) => {
            let yaml = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read script {}", path.display()))?;
            ReplayScript::from_yaml(&yaml)
                .with_context(|| format!("Failed to parse script {}", path.display()))?
        }
        None => ReplayScript::default(),
    };

    let report = replay::run(&mut editor, &script).context("Replay failed")?;
    editor.destroy();

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}
