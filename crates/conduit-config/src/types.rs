//! Configuration types mapping to the TOML schema.
//!
//! Top-level config:
//! ```toml
//! [logging]                          # level, json, directory
//! [output]                           # pretty
//! [replacements.strings]             # "params.x" = "value"
//! [replacements.arrays]              # "params.list" = ["a", "b"]
//! [replacements.objects."params.o"]  # field = "value"
//! ```

use std::path::PathBuf;

use conduit_params::ReplacementContext;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

/// Log levels accepted by `[logging] level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration structure.
///
/// All sections are optional so that partial configs (e.g. project-local
/// overrides) can be loaded and merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConduitConfig {
    pub logging: Option<LoggingConfig>,
    pub output: Option<OutputConfig>,
    /// Replacement maps applied by `conduit resolve` when no file is given.
    pub replacements: Option<ReplacementContext>,
}

impl ConduitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: ConduitConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another config on top of this one (other takes priority).
    ///
    /// `logging` and `output` are replaced wholesale; replacement maps are
    /// extended key by key.
    pub fn merge(&mut self, other: ConduitConfig) {
        if other.logging.is_some() {
            self.logging = other.logging;
        }

        if other.output.is_some() {
            self.output = other.output;
        }

        if let Some(replacements) = other.replacements {
            match self.replacements.as_mut() {
                Some(existing) => existing.merge(replacements),
                None => self.replacements = Some(replacements),
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref())
            && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        {
            return Err(ConfigError::InvalidLogLevel(level.to_string()));
        }
        Ok(())
    }

    /// Configured log level, if any.
    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref()?.level.as_deref()
    }

    /// Whether output JSON should be pretty-printed. Defaults to `false`.
    pub fn pretty_output(&self) -> bool {
        self.output.as_ref().is_some_and(|o| o.pretty)
    }

    /// Configured replacement maps, or an empty context.
    pub fn replacement_context(&self) -> ReplacementContext {
        self.replacements.clone().unwrap_or_default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

/// `[logging]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Use the JSON formatter on stderr.
    pub json: bool,
    /// Also write daily rolling JSON logs into this directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// `[output]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
}
