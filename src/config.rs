//! Lightbox configuration.
//!
//! Handles loading, validating, and merging `lightbox.toml`. The file is
//! optional and sparse: stock defaults are the base layer and user values are
//! merged on top, key by key.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [classes]
//! tall = "gallery__item--tall"   # Added to portrait thumbnails
//! wide = "gallery__item--wide"   # Added to panorama thumbnails
//! hidden = "is-hidden"           # Added to the inactive modal slot
//!
//! [modal]
//! alt_fallback = "Gallery item"  # Alt text when an entry declares none
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::{DEFAULT_ALT_FALLBACK, LayoutClass};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Lightbox configuration loaded from `lightbox.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    /// CSS class names written into the page.
    pub classes: ClassConfig,
    /// Modal content settings.
    pub modal: ModalConfig,
}

impl LightboxConfig {
    /// Validate config values are usable as class names and text.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("classes.tall", &self.classes.tall),
            ("classes.wide", &self.classes.wide),
            ("classes.hidden", &self.classes.hidden),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if value.chars().any(char::is_whitespace) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a single class name, got {value:?}"
                )));
            }
        }
        if self.classes.tall == self.classes.wide {
            return Err(ConfigError::Validation(
                "classes.tall and classes.wide must differ".into(),
            ));
        }
        if self.modal.alt_fallback.trim().is_empty() {
            return Err(ConfigError::Validation(
                "modal.alt_fallback must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Class names applied by the classifier and the content-swap routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassConfig {
    pub tall: String,
    pub wide: String,
    pub hidden: String,
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            tall: "gallery__item--tall".to_string(),
            wide: "gallery__item--wide".to_string(),
            hidden: "is-hidden".to_string(),
        }
    }
}

impl ClassConfig {
    pub fn name_for(&self, class: LayoutClass) -> &str {
        match class {
            LayoutClass::Tall => &self.tall,
            LayoutClass::Wide => &self.wide,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModalConfig {
    /// Alt text for the modal image when the entry has none.
    pub alt_fallback: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            alt_fallback: DEFAULT_ALT_FALLBACK.to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(LightboxConfig::default()).expect("default config must serialize")
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

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<LightboxConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: LightboxConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file, or stock defaults when `path` is `None`.
///
/// A path that is given but does not exist is an error; only omitting the
/// flag falls back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<LightboxConfig, ConfigError> {
    let overlay = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Some(toml::from_str::<toml::Value>(&content)?)
        }
        None => None,
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `lightbox.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Gallery Lightbox Configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# CSS class names
# ---------------------------------------------------------------------------
[classes]
# Added to gallery items whose thumbnail is taller than it is wide.
tall = "gallery__item--tall"

# Added to gallery items whose thumbnail is more than twice as wide as tall.
wide = "gallery__item--wide"

# Added to whichever modal slot (image or video) is not in use.
hidden = "is-hidden"

# ---------------------------------------------------------------------------
# Modal
# ---------------------------------------------------------------------------
[modal]
# Alt text for the enlarged image when the gallery entry has none.
alt_fallback = "Gallery item"
"##
}
