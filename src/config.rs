//! Configuration file support for license-bom.
//!
//! Provides YAML-based configuration through `license-bom.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::application::dto::{OutputFormat, MAX_JOBS};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "license-bom.config.yml";

/// Top-level configuration file schema.
///
/// Every key is optional; command-line options take precedence.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub root: Option<PathBuf>,
    pub std_root: Option<PathBuf>,
    pub overrides: Option<PathBuf>,
    pub exclude_packages: Option<Vec<String>>,
    pub jobs: Option<usize>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// The `format` key parsed; validated on load
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.format
            .as_deref()
            .and_then(|f| OutputFormat::from_str(f).ok())
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty document deserializes to null, not to an empty mapping.
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(format) = config.format.as_deref() {
        if let Err(e) = OutputFormat::from_str(format) {
            bail!("Invalid config: format: {}", e);
        }
    }

    if let Some(jobs) = config.jobs {
        if jobs == 0 || jobs > MAX_JOBS {
            bail!(
                "Invalid config: jobs must be between 1 and {}, got {}.\n\n\
                 💡 Hint: Remove the key to use the default of 8.",
                MAX_JOBS,
                jobs
            );
        }
    }

    if let Some(ref patterns) = config.exclude_packages {
        for (i, pattern) in patterns.iter().enumerate() {
            if pattern.trim().is_empty() {
                bail!(
                    "Invalid config: exclude_packages[{}] must not be empty.\n\n\
                     💡 Hint: Each entry is a package pattern such as \"colors/internal/*\".",
                    i
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
