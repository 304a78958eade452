//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/outdiff/outdiff.toml`
//! 3. Local config: `<project_dir>/.outdiff.toml`
//! 4. Environment variables: `OUTDIFF_*` prefix
//!
//! Command-line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::MatchPolicyKind;
use crate::util::path::expand_env_vars;

/// Unified configuration for outdiff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Outline snapshot to convert from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<PathBuf>,
    /// Outline snapshot to convert to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<PathBuf>,
    /// Where to write the step report (stdout when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// How nodes are matched across snapshots
    pub match_policy: MatchPolicyKind,
    /// Write the "Steps to convert ..." header line
    pub header: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            before: None,
            after: None,
            output: None,
            match_policy: MatchPolicyKind::Exact,
            header: true,
        }
    }
}

/// Raw settings for intermediate parsing (every field optional to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub before: Option<PathBuf>,
    pub after: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub match_policy: Option<MatchPolicyKind>,
    pub header: Option<bool>,
}

impl RawSettings {
    /// Resolve relative paths against `base` (the directory holding the file).
    fn anchored_at(mut self, base: &Path) -> Self {
        let anchor = |p: Option<PathBuf>| {
            p.map(|p| {
                let expanded = PathBuf::from(expand_env_vars(&p.to_string_lossy()));
                if expanded.is_relative() {
                    base.join(expanded)
                } else {
                    expanded
                }
            })
        };
        self.before = anchor(self.before);
        self.after = anchor(self.after);
        self.output = anchor(self.output);
        self
    }
}

/// Get the XDG config directory for outdiff.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "outdiff").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("outdiff.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".outdiff.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path fields.
    ///
    /// Handles `~`, `$VAR`, and `${VAR}` syntax.
    fn expand_paths(&mut self) {
        let expand = |p: &mut Option<PathBuf>| {
            if let Some(path) = p {
                *path = PathBuf::from(expand_env_vars(&path.to_string_lossy()));
            }
        };
        expand(&mut self.before);
        expand(&mut self.after);
        expand(&mut self.output);
    }

    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            before: overlay.before.clone().or_else(|| self.before.clone()),
            after: overlay.after.clone().or_else(|| self.after.clone()),
            output: overlay.output.clone().or_else(|| self.output.clone()),
            match_policy: overlay.match_policy.unwrap_or(self.match_policy),
            header: overlay.header.unwrap_or(self.header),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.outdiff.toml`
    ///
    /// Relative paths in a config file resolve against that file's directory.
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                let base = global_path.parent().unwrap_or(Path::new("."));
                current = current.merge_with(&raw.anchored_at(base));
            }
        }

        // 3. Local config
        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw.anchored_at(dir));
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply OUTDIFF_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(Environment::with_prefix("OUTDIFF").separator("__"));

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("before") {
            settings.before = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("after") {
            settings.after = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("output") {
            settings.output = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("match_policy") {
            settings.match_policy = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get_bool("header") {
            settings.header = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# outdiff configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/outdiff/outdiff.toml
#   Local:  <project_dir>/.outdiff.toml
#   Env:    OUTDIFF_* environment variables (explicit overrides)
#   Flags:  command-line arguments
#
# Relative paths resolve against the directory of the file they appear in.

# Outline snapshots (indented text, one node per line)
# before = "input/hierarchical_outline_old.txt"
# after = "input/hierarchical_outline_new.txt"

# Step report destination (printed to stdout when unset)
# output = "output/tree_diff_output.txt"

# Node matching across snapshots: "exact" or "normalized" (case/space-insensitive)
# match_policy = "exact"

# Start the report with "Steps to convert <before> to <after>:"
# header = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
