//! CLI command handlers.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Serialize;

use conduit_config::LoadedConfig;

pub mod check;
pub mod config;
pub mod lengths;
pub mod matrix;
pub mod resolve;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Explicit user config directory, if one was given.
    pub config_dir: Option<PathBuf>,
    /// Configuration discovered at startup.
    pub loaded: LoadedConfig,
}

impl Context {
    /// Print a value to stdout as JSON.
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{text}");
        Ok(())
    }
}

/// Read a whole input file.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
