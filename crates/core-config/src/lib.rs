//! Configuration for the unprintable completion helper.
//!
//! One `UnprintableConfig` lives per engine instance. Every mutation goes
//! through a validating setter, so an instance can never hold an invalid
//! placeholder or width:
//! - `placeholder` must be exactly one character.
//! - `abbr_width` must be a non-negative integer (0 = unlimited).
//!
//! Options arrive either as the completion framework's source-params JSON
//! object (`apply_params`) or from an `[unprintable]` TOML table
//! (`from_toml_str` / `load_from`). Both use the camelCase option names
//! below. Unknown keys are ignored (logged at debug) so newer framework
//! params do not break older builds. Applying a params object is
//! all-or-nothing: on error the previous configuration stays in place.

use serde_json::{Map, Value};
use std::{fs, io, path::Path};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_HIGHLIGHT_NAME: &str = "ddc_unprintable";
pub const DEFAULT_HIGHLIGHT_GROUP: &str = "SpecialKey";
pub const DEFAULT_PLACEHOLDER: char = '?';

pub const OPT_HIGHLIGHT_NAME: &str = "highlightName";
pub const OPT_HIGHLIGHT_GROUP: &str = "highlightGroup";
pub const OPT_PLACEHOLDER: &str = "placeholder";
pub const OPT_ABBR_WIDTH: &str = "abbrWidth";
pub const OPT_CALLBACK_ID: &str = "callbackId";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("placeholder must be exactly one character, got {value:?}")]
    InvalidPlaceholder { value: String },
    #[error("abbrWidth must be a non-negative integer, got {value}")]
    InvalidAbbrWidth { value: String },
    #[error("option `{name}` expects {expected}")]
    InvalidOption {
        name: String,
        expected: &'static str,
    },
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnprintableConfig {
    highlight_name: String,
    highlight_group: String,
    placeholder: char,
    abbr_width: usize,
    callback_id: String,
}

impl Default for UnprintableConfig {
    fn default() -> Self {
        Self {
            highlight_name: DEFAULT_HIGHLIGHT_NAME.to_owned(),
            highlight_group: DEFAULT_HIGHLIGHT_GROUP.to_owned(),
            placeholder: DEFAULT_PLACEHOLDER,
            abbr_width: 0,
            callback_id: random_callback_id(),
        }
    }
}

/// `unprintable-` followed by 8 random hex digits.
pub fn random_callback_id() -> String {
    format!("unprintable-{:08x}", rand::random::<u32>())
}

impl UnprintableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlight_name(&self) -> &str {
        &self.highlight_name
    }

    pub fn highlight_group(&self) -> &str {
        &self.highlight_group
    }

    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    /// Abbreviation width in display cells; 0 disables truncation.
    pub fn abbr_width(&self) -> usize {
        self.abbr_width
    }

    pub fn callback_id(&self) -> &str {
        &self.callback_id
    }

    pub fn set_highlight_name(&mut self, name: impl Into<String>) {
        self.highlight_name = name.into();
    }

    pub fn set_highlight_group(&mut self, group: impl Into<String>) {
        self.highlight_group = group.into();
    }

    pub fn set_placeholder(&mut self, value: &str) -> Result<(), ConfigError> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                self.placeholder = c;
                Ok(())
            }
            _ => Err(ConfigError::InvalidPlaceholder {
                value: value.to_owned(),
            }),
        }
    }

    pub fn set_abbr_width(&mut self, width: i64) -> Result<(), ConfigError> {
        let width = usize::try_from(width).map_err(|_| ConfigError::InvalidAbbrWidth {
            value: width.to_string(),
        })?;
        self.abbr_width = width;
        Ok(())
    }

    pub fn set_callback_id(&mut self, id: impl Into<String>) {
        self.callback_id = id.into();
    }

    /// Apply a source-params object. Either every recognized option is
    /// applied or, on the first invalid one, none is.
    pub fn apply_params(&mut self, params: &Value) -> Result<(), ConfigError> {
        let Some(map) = params.as_object() else {
            return Err(ConfigError::InvalidOption {
                name: "params".to_owned(),
                expected: "an object",
            });
        };
        let mut next = self.clone();
        next.apply_map(map)?;
        if next != *self {
            info!(
                target: "config",
                highlight_name = next.highlight_name.as_str(),
                highlight_group = next.highlight_group.as_str(),
                abbr_width = next.abbr_width,
                callback_id = next.callback_id.as_str(),
                "unprintable_config_applied"
            );
        }
        *self = next;
        Ok(())
    }

    fn apply_map(&mut self, map: &Map<String, Value>) -> Result<(), ConfigError> {
        for (key, value) in map {
            match key.as_str() {
                OPT_HIGHLIGHT_NAME => self.set_highlight_name(expect_str(key, value)?),
                OPT_HIGHLIGHT_GROUP => self.set_highlight_group(expect_str(key, value)?),
                OPT_PLACEHOLDER => self.set_placeholder(expect_str(key, value)?)?,
                OPT_CALLBACK_ID => self.set_callback_id(expect_str(key, value)?),
                OPT_ABBR_WIDTH => match value.as_i64() {
                    Some(width) => self.set_abbr_width(width)?,
                    None => {
                        return Err(ConfigError::InvalidAbbrWidth {
                            value: value.to_string(),
                        });
                    }
                },
                other => debug!(target: "config", key = other, "unknown_option_ignored"),
            }
        }
        Ok(())
    }

    /// Build a config from TOML text; options live under `[unprintable]`.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut cfg = Self::default();
        if let Some(section) = table.get("unprintable") {
            let params =
                serde_json::to_value(section).map_err(|e| ConfigError::Parse(e.to_string()))?;
            cfg.apply_params(&params)?;
        }
        Ok(cfg)
    }
}

/// Load config from `path`. A missing file yields defaults; unreadable or
/// malformed files are errors.
pub fn load_from(path: &Path) -> Result<UnprintableConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => UnprintableConfig::from_toml_str(&content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(target: "config", path = %path.display(), "config_missing_using_defaults");
            Ok(UnprintableConfig::default())
        }
        Err(e) => Err(ConfigError::Io(e)),
    }
}

fn expect_str<'a>(name: &str, value: &'a Value) -> Result<&'a str, ConfigError> {
    value.as_str().ok_or_else(|| ConfigError::InvalidOption {
        name: name.to_owned(),
        expected: "a string",
    })
}
