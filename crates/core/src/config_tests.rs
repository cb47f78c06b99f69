// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::TempDir;

#[test]
fn defaults_skip_when_no_config() {
    let settings = Settings::default();
    assert!(settings.engine.disable_when_no_eslint_config);
    assert!(settings.show_rule);
    assert!(!settings.engine.use_global_eslint);
    assert_eq!(settings.engine.node_executable(), "node");
}

#[test]
fn parse_full_file() {
    let toml = r#"
fix_on_save = true
ignored_rules_when_modified = ["eol-last", "no-trailing-spaces"]
ignored_rules_when_fixing = ["no-debugger"]
ignore_fixable_rules_while_typing = true
show_rule = false

[engine]
use_global_eslint = true
global_node_path = "/opt/node"
eslint_rules_dir = "rules"
eslintrc_path = "~/.eslintrc.json"
disable_eslint_ignore = true
disable_when_no_eslint_config = false
node_executable = "/usr/local/bin/node"
"#;
    let settings = Settings::parse(toml, Path::new("config.toml")).unwrap();
    assert!(settings.fix_on_save);
    assert_eq!(
        settings.ignored_rules_when_modified,
        vec!["eol-last", "no-trailing-spaces"]
    );
    assert_eq!(settings.ignored_rules_when_fixing, vec!["no-debugger"]);
    assert!(!settings.show_rule);
    let engine = settings.job_config();
    assert!(engine.use_global_eslint);
    assert_eq!(engine.global_node_path.as_deref(), Some("/opt/node"));
    assert_eq!(engine.eslint_rules_dir.as_deref(), Some("rules"));
    assert!(engine.disable_eslint_ignore);
    assert!(!engine.disable_when_no_eslint_config);
    assert_eq!(engine.node_executable(), "/usr/local/bin/node");
}

#[test]
fn partial_engine_table_keeps_defaults() {
    let settings =
        Settings::parse("[engine]\nuse_global_eslint = true\n", Path::new("c.toml")).unwrap();
    assert!(settings.engine.use_global_eslint);
    assert!(settings.engine.disable_when_no_eslint_config);
}

#[test]
fn parse_error_names_file() {
    let err = Settings::parse("show_rule = \"yes\"", Path::new("bad.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::Parse { .. }));
    assert!(err.to_string().contains("bad.toml"), "got: {err}");
}

#[test]
fn load_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn engine_config_json_is_snake_case() {
    let json = serde_json::to_value(EngineConfig::default()).unwrap();
    assert_eq!(json["disable_when_no_eslint_config"], true);
    assert!(json["use_global_eslint"].is_boolean());
}

#[tokio::test]
async fn reload_notifies_subscribers_on_change() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "show_rule = true\n").unwrap();

    let store = SettingsStore::open(Some(path.clone())).unwrap();
    let mut rx = store.subscribe();
    assert!(store.current().show_rule);

    std::fs::write(&path, "show_rule = false\n").unwrap();
    assert!(store.reload().unwrap());
    rx.changed().await.unwrap();
    assert!(!rx.borrow().show_rule);

    // Same content again: no notification
    assert!(!store.reload().unwrap());
    assert!(!rx.has_changed().unwrap());
}

#[test]
fn reload_without_path_is_noop() {
    let store = SettingsStore::open(None).unwrap();
    assert!(!store.reload().unwrap());
}
