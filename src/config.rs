//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bintree/bintree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `BINTREE_*` prefix, `__` between sections
//!    (e.g. `BINTREE_DISPLAY__SHOW_POSITIONS=true`)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::builder::DEFAULT_MAX_TOKENS;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// How query results are printed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Tree rendering options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Label for a missing child whose sibling exists
    pub absent_label: String,
    /// Prefix every node with its pre-order position
    pub show_positions: bool,
    /// Levels rendered before a subtree is collapsed
    pub max_depth: usize,
    /// Label standing in for a collapsed subtree
    pub elided_label: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            absent_label: "·".into(),
            show_positions: false,
            max_depth: 64,
            elided_label: "…".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InputSettings {
    /// Serialized trees with more tokens are rejected before building
    pub max_tokens: usize,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Unified configuration for bintree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub output: OutputFormat,
    pub display: DisplaySettings,
    pub input: InputSettings,
}

/// Get the XDG config directory for bintree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bintree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bintree.toml"))
}

/// `BINTREE_*` variables; `__` separates sections.
pub fn environment() -> Environment {
    Environment::with_prefix("BINTREE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file, must exist when given
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_from(global_config_path().as_deref(), explicit, environment())
    }

    /// Load settings from the given layers instead of the user's locations.
    ///
    /// `env` is usually [`environment`], optionally with a pinned `source`.
    #[instrument(level = "debug", skip(env))]
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: Environment,
    ) -> Result<Self, SettingsError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("using global config {}", global_path.display());
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Self = builder.add_source(env).build()?.try_deserialize()?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# bintree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/bintree/bintree.toml
#   Explicit: bintree --config <path>
#   Env:      BINTREE_* environment variables, e.g. BINTREE_OUTPUT=json

# Result format: "text" or "json"
# output = "text"

[display]
# Label shown for a missing child when its sibling exists
# absent_label = "·"

# Prefix every node with its pre-order position (the numbers `cousins` and `lca` take)
# show_positions = false

# Levels shown before deeper subtrees collapse into `elided_label`
# max_depth = 64
# elided_label = "…"

[input]
# Reject serialized trees with more tokens than this
# max_tokens = 1000000
"#
        .to_string()
    }
}
