//! Configuration system for the Conduit CLI.
//!
//! Provides TOML-based configuration with:
//! - Logging settings (`[logging]`)
//! - Output formatting (`[output]`)
//! - Replacement maps used when resolving parameters (`[replacements]`)
//! - Config file layering (user config dir + project-local overrides)

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{
    ConfigSource, LoadedConfig, load_config_file, load_config_with_options, user_config_path,
};
pub use error::{ConfigError, Result};
pub use types::*;
