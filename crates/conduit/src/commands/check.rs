//! Check command - default declarations and report duplicates.

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use clap::Args;
use serde::Serialize;

use conduit_params::{
    ParamSpec, decode_param_specs, set_defaults_all, sort_by_type, validate_no_duplicate_names,
};

use super::{Context, read_input};

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON file holding a list of param declarations
    pub file: PathBuf,
}

#[derive(Serialize)]
struct Grouped {
    string: Vec<ParamSpec>,
    array: Vec<ParamSpec>,
    object: Vec<ParamSpec>,
}

/// Run the check command.
///
/// Prints the defaulted declarations grouped by type, then fails if any
/// name is declared twice.
pub fn run(args: CheckArgs, ctx: &Context) -> Result<()> {
    let mut specs = decode_param_specs(&read_input(&args.file)?)
        .with_context(|| format!("failed to parse declarations in {}", args.file.display()))?;
    set_defaults_all(&mut specs);

    let (string, array, object) = sort_by_type(&specs);
    ctx.print_json(&Grouped {
        string,
        array,
        object,
    })?;

    if let Some(err) = validate_no_duplicate_names(&specs) {
        bail!(err);
    }
    Ok(())
}
