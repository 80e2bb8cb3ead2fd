//! Application configuration.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a `config.toml` in the config directory overrides any
//! subset of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! save_folder = "saved"           # Root directory holding the collections
//! default_collection = "Default"  # Collection used when none is given
//!
//! [layout]
//! items_per_row = 4               # Grid units per row
//! rows_per_page = 3               # Line units per page
//! most_recent_first = true        # Browse newest entries first
//!
//! [preview]
//! max_size = 200                  # Longer edge of exported thumbnails (px)
//!
//! [processing]
//! max_processes = 4               # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want.
//!
//! ```toml
//! [layout]
//! items_per_row = 6
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::collection::Collection;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoteSaveConfig {
    /// Directory holding one subdirectory per collection.
    pub save_folder: String,
    /// Collection used when a command does not name one.
    pub default_collection: String,
    /// Grid constraints and browse order.
    pub layout: LayoutConfig,
    /// Thumbnail settings for HTML export.
    pub preview: PreviewConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for NoteSaveConfig {
    fn default() -> Self {
        Self {
            save_folder: "saved".to_string(),
            default_collection: "Default".to_string(),
            layout: LayoutConfig::default(),
            preview: PreviewConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl NoteSaveConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.save_folder.trim().is_empty() {
            return Err(ConfigError::Validation(
                "save_folder must not be empty".into(),
            ));
        }
        if Collection::parse(&self.default_collection).is_err() {
            return Err(ConfigError::Validation(format!(
                "default_collection {:?} is not a valid collection name",
                self.default_collection
            )));
        }
        if self.layout.items_per_row == 0 {
            return Err(ConfigError::Validation(
                "layout.items_per_row must be at least 1".into(),
            ));
        }
        if self.layout.rows_per_page == 0 {
            return Err(ConfigError::Validation(
                "layout.rows_per_page must be at least 1".into(),
            ));
        }
        if self.preview.max_size == 0 {
            return Err(ConfigError::Validation(
                "preview.max_size must be non-zero".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Grid constraints and browse order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Grid units per row; an entry takes one unit per image.
    pub items_per_row: usize,
    /// Line units per page; an oversized row counts for several.
    pub rows_per_page: usize,
    /// Show the newest entry first.
    pub most_recent_first: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            items_per_row: 4,
            rows_per_page: 3,
            most_recent_first: true,
        }
    }
}

/// Thumbnail settings for HTML export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Longer edge in pixels. Smaller images are never upscaled.
    pub max_size: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { max_size: 200 }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel preview workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(NoteSaveConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<NoteSaveConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: NoteSaveConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<NoteSaveConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!("loaded config from {}", dir.display());
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# note-save configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# Directory holding the collections, one subdirectory each.
save_folder = "saved"

# Collection used when a command does not name one. It is always listed,
# even before anything has been saved to it.
default_collection = "Default"

# ---------------------------------------------------------------------------
# Grid layout
# ---------------------------------------------------------------------------
[layout]
# Grid units per row. Each entry is one unit wide per image (text-only
# entries take one unit). An entry wider than a row gets a row of its own.
items_per_row = 4

# Line units per page. A row that holds an oversized entry is several
# line units tall.
rows_per_page = 3

# Browse newest entries first.
most_recent_first = true

# ---------------------------------------------------------------------------
# Export previews
# ---------------------------------------------------------------------------
[preview]
# Longer edge, in pixels, of the thumbnails written by `export`.
# Smaller images are copied at their own size.
max_size = 200

# ---------------------------------------------------------------------------
# Parallel processing
# ---------------------------------------------------------------------------
[processing]
# Maximum number of parallel preview workers.
# Omit or comment out to use all available CPU cores.
# Values larger than the number of cores are clamped down.
# max_processes = 4
"##
}
