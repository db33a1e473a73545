//! The single source of truth for decodex runtime configuration.
//!
//! `DecodexConfig` is built once at the application boundary, from an optional
//! TOML (or JSON) file plus command-line overrides, and then handed to the
//! components that need it: the module registry (zstd level), the recipe
//! manager (generated recipe names) and the recipe store (directory layout).
//! Every field has a default, so an empty file is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DecodexError;

//==================================================================================
// I. The Unified DecodexConfig
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct DecodexConfig {
    /// Directory holding one file per saved recipe. Created on startup if missing.
    #[serde(default = "default_recipe_dir")]
    pub recipe_dir: PathBuf,

    /// Extension (without the dot) given to recipe files.
    #[serde(default = "default_recipe_extension")]
    pub recipe_extension: String,

    /// Prefix for the names of implicitly created editing recipes
    /// (`recipe-1`, `recipe-2`, ...).
    #[serde(default = "default_recipe_prefix")]
    pub default_recipe_prefix: String,

    /// Compression level used by the `zstdcompress` module.
    #[serde(default = "default_zstd_level")]
    pub zstd_level: i32,

    /// Log level filter (`error`, `warn`, `info`, `debug`, `trace`).
    #[serde(default)]
    pub log_level: Option<String>,

    /// If set, log records are appended to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for DecodexConfig {
    fn default() -> Self {
        Self {
            recipe_dir: default_recipe_dir(),
            recipe_extension: default_recipe_extension(),
            default_recipe_prefix: default_recipe_prefix(),
            zstd_level: default_zstd_level(),
            log_level: None,
            log_file: None,
        }
    }
}

//==================================================================================
// II. Loading
//==================================================================================

impl DecodexConfig {
    /// Reads a configuration file. Files ending in `.json` are parsed as JSON,
    /// everything else as TOML.
    pub fn from_file(path: &Path) -> Result<Self, DecodexError> {
        let text = fs::read_to_string(path).map_err(|e| {
            DecodexError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&text)?,
            _ => toml::from_str(&text)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the constraints serde cannot express.
    pub fn validate(&self) -> Result<(), DecodexError> {
        if self.recipe_extension.is_empty()
            || self.recipe_extension.contains(&['.', '/', '\\'][..])
        {
            return Err(DecodexError::Config(format!(
                "recipe_extension '{}' must be a bare extension such as 'txt'",
                self.recipe_extension
            )));
        }
        if self.default_recipe_prefix.trim().is_empty() {
            return Err(DecodexError::Config(
                "default_recipe_prefix must not be blank".to_string(),
            ));
        }
        if !zstd::compression_level_range().contains(&self.zstd_level) {
            return Err(DecodexError::Config(format!(
                "zstd_level {} is outside {:?}",
                self.zstd_level,
                zstd::compression_level_range()
            )));
        }
        if let Some(level) = &self.log_level {
            level
                .parse::<log::LevelFilter>()
                .map_err(|_| DecodexError::Config(format!("unknown log_level '{}'", level)))?;
        }
        Ok(())
    }
}

/// Helper for `serde` to provide a default for `recipe_dir`.
fn default_recipe_dir() -> PathBuf {
    PathBuf::from("recipes")
}

fn default_recipe_extension() -> String {
    "txt".to_string()
}

fn default_recipe_prefix() -> String {
    "recipe".to_string()
}

fn default_zstd_level() -> i32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: DecodexConfig = toml::from_str("").unwrap();
        assert_eq!(config, DecodexConfig::default());
        assert_eq!(config.recipe_dir, PathBuf::from("recipes"));
        assert_eq!(config.zstd_level, 3);
    }

    #[test]
    fn test_partial_toml_overrides_only_named_fields() {
        let config: DecodexConfig =
            toml::from_str("recipe_dir = \"/tmp/r\"\nzstd_level = 19\n").unwrap();
        assert_eq!(config.recipe_dir, PathBuf::from("/tmp/r"));
        assert_eq!(config.zstd_level, 19);
        assert_eq!(config.recipe_extension, "txt");
    }

    #[test]
    fn test_from_file_reads_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{\"default_recipe_prefix\": \"draft\", \"log_level\": \"debug\"}}").unwrap();
        let config = DecodexConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_recipe_prefix, "draft");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<DecodexConfig, _> = toml::from_str("recipe_directory = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = DecodexConfig::default();
        config.recipe_extension = ".txt".to_string();
        assert!(matches!(config.validate(), Err(DecodexError::Config(_))));

        let mut config = DecodexConfig::default();
        config.log_level = Some("loud".to_string());
        assert!(config.validate().is_err());

        let mut config = DecodexConfig::default();
        config.zstd_level = 1000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = DecodexConfig::from_file(Path::new("/nonexistent/decodex.toml")).unwrap_err();
        assert!(matches!(err, DecodexError::Config(_)));
    }
}
