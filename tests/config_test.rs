//! Integration tests for Settings config loading with layered precedence.
//!
//! Precedence: defaults → global → local `.outdiff.toml` → `OUTDIFF_*` env vars.
//!
//! Note: These tests run without a global config (temp directories only),
//! so they effectively test local config merging with defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use outdiff::application::ApplicationError;
use outdiff::config::{local_config_path, Settings};
use outdiff::domain::MatchPolicyKind;

// ============================================================
// Settings::load() local config tests
// ============================================================

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let project = TempDir::new().unwrap();
    let config = r#"
match_policy = "normalized"
header = false
"#;
    fs::write(local_config_path(project.path()), config).unwrap();

    // Act
    let settings = Settings::load(Some(project.path())).expect("load settings");

    // Assert
    assert_eq!(settings.match_policy, MatchPolicyKind::Normalized);
    assert!(!settings.header);
    assert!(settings.output.is_none());
}

/// Relative paths in a config file resolve against the file's directory.
#[test]
fn given_relative_paths_in_local_config_when_load_then_anchored_at_project() {
    // Arrange
    let project = TempDir::new().unwrap();
    let config = r#"
before = "input/old.txt"
after = "input/new.txt"
output = "/tmp/outdiff-report.txt"
"#;
    fs::write(local_config_path(project.path()), config).unwrap();

    // Act
    let settings = Settings::load(Some(project.path())).expect("load settings");

    // Assert
    assert_eq!(settings.before, Some(project.path().join("input/old.txt")));
    assert_eq!(settings.after, Some(project.path().join("input/new.txt")));
    assert_eq!(settings.output, Some(PathBuf::from("/tmp/outdiff-report.txt")));
}

#[test]
fn given_project_without_config_when_load_then_uses_defaults() {
    let project = TempDir::new().unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    assert_eq!(settings.before, None);
    assert_eq!(settings.match_policy, MatchPolicyKind::Exact);
    assert!(settings.header);
}

#[test]
fn given_unknown_match_policy_when_load_then_config_error() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "match_policy = \"fuzzy\"\n",
    )
    .unwrap();

    // Act
    let result = Settings::load(Some(project.path()));

    // Assert
    match result {
        Err(ApplicationError::Config { message }) => {
            assert!(message.contains(".outdiff.toml"), "message: {message}");
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn given_malformed_toml_when_load_then_config_error() {
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "header = [").unwrap();

    let result = Settings::load(Some(project.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

// ============================================================
// Template / round trip
// ============================================================

#[test]
fn given_written_template_when_load_then_matches_defaults() {
    // Arrange: the template only contains commented-out settings
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), Settings::template()).unwrap();

    // Act
    let settings = Settings::load(Some(project.path())).expect("load settings");

    // Assert
    assert_eq!(settings, Settings::load(None).expect("load defaults"));
}
