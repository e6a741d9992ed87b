//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/alloctree/alloctree.toml`
//! 3. Environment variables: `ALLOCTREE_*` prefix (`__` separates sections)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::util::path::expand_path;

/// Output formatting options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimal places for values and variances
    pub decimals: usize,
    /// Show the baseline next to the current value
    pub show_original: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimals: 2,
            show_original: true,
        }
    }
}

/// Raw display config for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplayConfig {
    pub decimals: Option<usize>,
    pub show_original: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub seed: Option<PathBuf>,
    #[serde(default)]
    pub display: RawDisplayConfig,
}

impl DisplayConfig {
    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawDisplayConfig) -> Self {
        Self {
            decimals: overlay.decimals.unwrap_or(self.decimals),
            show_original: overlay.show_original.unwrap_or(self.show_original),
        }
    }
}

/// Unified configuration for alloctree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Seed file used when `--seed` is not given
    pub seed: Option<PathBuf>,
    /// Output formatting
    pub display: DisplayConfig,
}

/// Get the XDG config directory for alloctree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "alloctree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("alloctree.toml"))
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
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.seed = self.seed.as_deref().map(expand_path);
    }

    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            seed: overlay.seed.clone().or_else(|| self.seed.clone()),
            display: self.display.merge(&overlay.display),
        }
    }

    /// Load settings with layered precedence from the global config location.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `config_file` in place of the global config.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. `config_file`, if given and present
    /// 3. Environment variables: `ALLOCTREE_*` prefix
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = config_file {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply ALLOCTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ALLOCTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("seed") {
            settings.seed = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_int("display.decimals") {
            settings.display.decimals = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("display.decimals must be non-negative, got {val}"),
            })?;
        }
        if let Ok(val) = config.get_bool("display.show_original") {
            settings.display.show_original = val;
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
        r#"# alloctree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/alloctree/alloctree.toml
#   Env:    ALLOCTREE_* environment variables (ALLOCTREE_DISPLAY__DECIMALS=4)

# Seed file loaded when --seed is not given (JSON or TOML)
# seed = "~/budgets/2024.json"

[display]
# Decimal places for values and variances
# decimals = 2

# Show the original value next to the current one
# show_original = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load_from(None).expect("load defaults");
        assert_eq!(settings.display, DisplayConfig::default());
    }

    #[test]
    fn given_tilde_in_seed_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            seed: Some(PathBuf::from("~/seed.json")),
            display: DisplayConfig::default(),
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let seed = settings.seed.expect("seed kept");
        assert!(
            seed.starts_with(&home),
            "seed should start with home dir: {}",
            seed.display()
        );
    }

    #[test]
    fn test_display_merge_keeps_unspecified() {
        let base = DisplayConfig::default();
        let merged = base.merge(&RawDisplayConfig {
            decimals: Some(4),
            show_original: None,
        });
        assert_eq!(merged.decimals, 4);
        assert!(merged.show_original);
    }

    #[test]
    fn test_template_parses_as_settings() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("valid toml");
        assert!(raw.seed.is_none());
        assert!(raw.display.decimals.is_none());
    }

    #[test]
    fn test_to_toml_roundtrips_display() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
