//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/gentree/gentree.toml`
//! 3. Local config: `.gentree.toml` next to the hierarchy file
//! 4. Environment variables: `GENTREE_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::tree::TreeOptions;

#[derive(Error, Debug)]
#[error("config error: {message}")]
pub struct SettingsError {
    pub message: String,
}

/// Terminal output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSettings {
    /// Colorize output (NO_COLOR still wins)
    pub color: bool,
    /// Joins nodes of a branch, leaf first
    pub branch_separator: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: true,
            branch_separator: " <- ".into(),
        }
    }
}

/// Unified configuration for gentree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Engine options applied to every loaded tree
    pub tree: TreeOptions,
    pub output: OutputSettings,
}

/// Raw settings for intermediate parsing: `None` means "not specified, inherit".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree: RawTreeSettings,
    pub output: RawOutputSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTreeSettings {
    pub cycle_guard: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawOutputSettings {
    pub color: Option<bool>,
    pub branch_separator: Option<String>,
}

/// Get the XDG config directory for gentree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gentree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("gentree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".gentree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| SettingsError {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree: TreeOptions {
                cycle_guard: overlay.tree.cycle_guard.unwrap_or(self.tree.cycle_guard),
            },
            output: OutputSettings {
                color: overlay.output.color.unwrap_or(self.output.color),
                branch_separator: overlay
                    .output
                    .branch_separator
                    .clone()
                    .unwrap_or_else(|| self.output.branch_separator.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.gentree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_layers(global_config_path().as_deref(), local_dir)
    }

    /// Load settings from an explicit global file instead of the XDG location.
    pub fn load_layers(global_path: Option<&Path>, local_dir: Option<&Path>) -> Result<Self, SettingsError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("local config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        // 4. Environment variables
        Self::apply_env_overrides(current)
    }

    /// Apply GENTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("GENTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("tree.cycle_guard") {
            settings.tree.cycle_guard = val;
        }
        if let Ok(val) = config.get_bool("output.color") {
            settings.output.color = val;
        }
        if let Ok(val) = config.get_string("output.branch_separator") {
            settings.output.branch_separator = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# gentree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/gentree/gentree.toml
#   Local:  .gentree.toml next to the hierarchy file
#   Env:    GENTREE_* environment variables, e.g. GENTREE_TREE__CYCLE_GUARD=true

[tree]
# Reject hierarchies where an entry's ancestors never reach the root
# cycle_guard = false

[output]
# color = true
# branch_separator = " <- "
"#
        .to_string()
    }
}

fn config_err(e: config::ConfigError) -> SettingsError {
    SettingsError {
        message: e.to_string(),
    }
}
