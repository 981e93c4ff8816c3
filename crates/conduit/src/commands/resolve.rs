//! Resolve command - substitute references in param bindings.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::{debug, info};

use conduit_params::{ReplacementContext, decode_params, replace_variables};

use super::{Context, read_input};

/// Arguments for the resolve command.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// JSON file holding a list of `{"name", "value"}` params
    pub file: PathBuf,

    /// TOML file with `[strings]`, `[arrays]` and `[objects]` tables
    /// (default: the `[replacements]` section of the loaded config)
    #[arg(long)]
    pub replacements: Option<PathBuf>,
}

/// Run the resolve command.
pub fn run(args: ResolveArgs, ctx: &Context) -> Result<()> {
    let params = decode_params(&read_input(&args.file)?)
        .with_context(|| format!("failed to parse params in {}", args.file.display()))?;

    let replacements = match &args.replacements {
        Some(path) => load_replacements(path)?,
        None => ctx.loaded.config.replacement_context(),
    };
    debug!(
        strings = replacements.strings.len(),
        arrays = replacements.arrays.len(),
        objects = replacements.objects.len(),
        "replacement context ready"
    );

    let resolved = replace_variables(&params, &replacements);
    info!(count = resolved.len(), "resolved params");
    ctx.print_json(&resolved)
}

fn load_replacements(path: &std::path::Path) -> Result<ReplacementContext> {
    let text = read_input(path)?;
    toml::from_str(&text)
        .with_context(|| format!("failed to parse replacements in {}", path.display()))
}
