//! Integration tests for Settings layered loading.
//!
//! Layers: defaults, then global file, then local `.gentree.toml`, then `GENTREE_*` env vars.
//! Each layer replaces only the values it specifies.
//!
//! Note: these tests pass an explicit global path (or none) so the user's real XDG config
//! never leaks in.

use std::fs;

use tempfile::TempDir;

use gentree::config::{local_config_path, Settings};

#[test]
fn given_local_config_when_loading_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "[output]\nbranch_separator = \" / \"\n",
    )
    .unwrap();

    let settings = Settings::load_layers(None, Some(dir.path())).expect("load settings");

    assert_eq!(settings.output.branch_separator, " / ");
    assert!(settings.output.color, "unspecified fields keep defaults");
}

#[test]
fn given_global_and_local_when_loading_then_local_wins_per_field() {
    let global_dir = TempDir::new().unwrap();
    let global_path = global_dir.path().join("gentree.toml");
    fs::write(
        &global_path,
        "[output]\ncolor = false\nbranch_separator = \" > \"\n",
    )
    .unwrap();

    let local_dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(local_dir.path()),
        "[output]\nbranch_separator = \" | \"\n",
    )
    .unwrap();

    let settings = Settings::load_layers(Some(global_path.as_path()), Some(local_dir.path())).unwrap();

    assert!(!settings.output.color, "global value survives");
    assert_eq!(settings.output.branch_separator, " | ");
}

#[test]
fn given_missing_files_when_loading_then_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load_layers(Some(dir.path().join("nope.toml").as_path()), Some(dir.path())).unwrap();
    assert_eq!(settings.output, Settings::default().output);
}

#[test]
fn given_malformed_local_config_when_loading_then_error_names_file() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "[output\n").unwrap();

    let err = Settings::load_layers(None, Some(dir.path())).unwrap_err();
    assert!(err.to_string().contains(".gentree.toml"));
}

#[test]
fn given_env_override_when_loading_then_env_wins() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "[tree]\ncycle_guard = false\n").unwrap();

    // the only test in this binary that reads or writes this variable
    std::env::set_var("GENTREE_TREE__CYCLE_GUARD", "true");
    let settings = Settings::load_layers(None, Some(dir.path()));
    std::env::remove_var("GENTREE_TREE__CYCLE_GUARD");

    assert!(settings.unwrap().tree.cycle_guard);
}

#[test]
fn given_template_when_written_as_local_config_then_loads_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), Settings::template()).unwrap();

    let settings = Settings::load_layers(None, Some(dir.path())).unwrap();
    assert_eq!(settings.output, Settings::default().output);
}
