//! Configuration system tests
//!
//! Tests for config directory resolution and editor config loading.

mod common;

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use common::{click, run_steps, test_editor_with_config};
use form_editor::config::{ConfigPaths, EditorConfig, HOME_VAR};

// ========================================================================
// Config Paths Tests
// ========================================================================

fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<OsString> {
    move |name: &str| {
        pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| OsString::from(value))
    }
}

#[test]
fn test_home_var_overrides_everything() {
    let paths = ConfigPaths::resolve(
        vars(&[(HOME_VAR, "/srv/forms"), ("XDG_CONFIG_HOME", "/xdg")]),
        Some(PathBuf::from("/home/ada")),
    )
    .unwrap();
    assert_eq!(paths.dir, PathBuf::from("/srv/forms"));
    assert_eq!(paths.config_file(), paths.dir.join("config.yaml"));
    assert_eq!(paths.logs_dir(), paths.dir.join("logs"));
}

#[cfg(not(windows))]
#[test]
fn test_xdg_config_home_then_home_fallback() {
    let xdg = ConfigPaths::resolve(vars(&[("XDG_CONFIG_HOME", "/xdg")]), None).unwrap();
    assert_eq!(xdg.dir, PathBuf::from("/xdg/form-editor"));

    // Empty variables count as unset
    let home = ConfigPaths::resolve(
        vars(&[("XDG_CONFIG_HOME", ""), (HOME_VAR, "")]),
        Some(PathBuf::from("/home/ada")),
    )
    .unwrap();
    assert_eq!(home.dir, PathBuf::from("/home/ada/.config/form-editor"));

    assert!(ConfigPaths::resolve(vars(&[]), None).is_none());
}

#[test]
fn test_ensure_logs_dir_creates_it() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ConfigPaths {
        dir: dir.path().join("form-editor"),
    };
    let logs = paths.ensure_logs_dir().unwrap();
    assert!(logs.is_dir());
    assert_eq!(logs, dir.path().join("form-editor").join("logs"));
}

// ========================================================================
// EditorConfig Loading Tests
// ========================================================================

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "block_element: div\nattribute_prefix: \"x-\"\nclasses:\n  focus: active\n",
    )
    .unwrap();

    let config = EditorConfig::load_from(&path);
    assert_eq!(config.block_element, "div");
    assert_eq!(config.attribute_prefix, "x-");
    assert_eq!(config.classes.focus, "active");
    assert_eq!(config.classes.placeholder, "placeholder");
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = EditorConfig::load_from(&dir.path().join("missing.yaml"));
    assert_eq!(config, EditorConfig::default());
}

#[test]
fn test_malformed_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "block_element: [unclosed\n").unwrap();

    assert_eq!(EditorConfig::load_from(&path), EditorConfig::default());
}

#[test]
fn test_config_drives_field_setup() {
    let config = EditorConfig::from_yaml(
        "block_element: div\nattribute_prefix: \"x-\"\nclasses:\n  focus: active\n",
    )
    .unwrap();
    let mut editor = test_editor_with_config(
        r#"<div x-field="body" x-placeholder="Body" x-type="rich"></div>"#,
        config,
    );
    run_steps(&mut editor, vec![click("body")]);

    let body = editor.field("body").unwrap();
    assert_eq!(
        body.content_markup(editor.document()),
        "<div><br></div>"
    );
    assert!(editor.document().has_class(body.element(), "active"));
}
