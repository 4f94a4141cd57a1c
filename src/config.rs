//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/avlviz/avlviz.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `AVLVIZ_*` prefix

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::render::Renderer;
use crate::application::{ApplicationError, ApplicationResult};

/// Unified configuration for avlviz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Max gap between two clicks on a node for them to count as a double click
    pub double_click_threshold_ms: u64,
    /// Show `(BF: n)` next to each key
    pub show_balance_factor: bool,
    /// Indent JSON snapshots
    pub pretty_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            double_click_threshold_ms: 300,
            show_balance_factor: true,
            pretty_json: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub double_click_threshold_ms: Option<u64>,
    pub show_balance_factor: Option<bool>,
    pub pretty_json: Option<bool>,
}

/// Get the XDG config directory for avlviz.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "avlviz").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("avlviz.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Threshold as a `Duration`.
    pub fn double_click_threshold(&self) -> Duration {
        Duration::from_millis(self.double_click_threshold_ms)
    }

    /// Rendering options derived from these settings.
    pub fn renderer(&self) -> Renderer {
        Renderer {
            show_balance_factor: self.show_balance_factor,
            pretty_json: self.pretty_json,
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            double_click_threshold_ms: overlay
                .double_click_threshold_ms
                .unwrap_or(self.double_click_threshold_ms),
            show_balance_factor: overlay
                .show_balance_factor
                .unwrap_or(self.show_balance_factor),
            pretty_json: overlay.pretty_json.unwrap_or(self.pretty_json),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file; unlike the global file it must exist
    pub fn load(explicit: Option<&Path>) -> ApplicationResult<Self> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, if present
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = explicit {
            let path = expand_path(path);
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            let raw = load_raw_settings(&path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply AVLVIZ_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("AVLVIZ")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = optional(config.get::<u64>("double_click_threshold_ms"))? {
            settings.double_click_threshold_ms = val;
        }
        if let Some(val) = optional(config.get_bool("show_balance_factor"))? {
            settings.show_balance_factor = val;
        }
        if let Some(val) = optional(config.get_bool("pretty_json"))? {
            settings.pretty_json = val;
        }

        Ok(settings)
    }

    /// Reject settings the session cannot work with.
    pub fn validate(&self) -> ApplicationResult<()> {
        if self.double_click_threshold_ms == 0 {
            return Err(ApplicationError::Config {
                message: "double_click_threshold_ms must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# avlviz configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/avlviz/avlviz.toml
#   Explicit: avlviz --config <file>
#   Env:      AVLVIZ_* environment variables (e.g. AVLVIZ_PRETTY_JSON=false)

# Two clicks on the same node within this many milliseconds delete it
# double_click_threshold_ms = 300

# Label nodes as "<key> (BF: <balance factor>)" instead of just "<key>"
# show_balance_factor = true

# Indent JSON snapshots
# pretty_json = true
"#
        .to_string()
    }
}

/// Treat a missing key as "not specified" but keep real parse failures.
fn optional<T>(result: Result<T, ConfigError>) -> ApplicationResult<Option<T>> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
