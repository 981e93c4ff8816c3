//! Lengths command - array sizes for fan-out.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use conduit_params::{
    decode_param_specs, decode_params, extract_default_param_array_lengths,
    extract_param_array_lengths,
};

use super::{Context, read_input};

/// Arguments for the lengths command.
#[derive(Args, Debug)]
pub struct LengthsArgs {
    /// JSON file holding params (or declarations with `--defaults`)
    pub file: PathBuf,

    /// Read declarations and report the lengths of their array defaults
    #[arg(long)]
    pub defaults: bool,
}

/// Run the lengths command.
pub fn run(args: LengthsArgs, ctx: &Context) -> Result<()> {
    let input = read_input(&args.file)?;
    let what = if args.defaults { "declarations" } else { "params" };
    let context = || format!("failed to parse {what} in {}", args.file.display());

    let lengths = if args.defaults {
        extract_default_param_array_lengths(&decode_param_specs(&input).with_context(context)?)
    } else {
        extract_param_array_lengths(&decode_params(&input).with_context(context)?)
    };

    let sorted: BTreeMap<_, _> = lengths.into_iter().collect();
    ctx.print_json(&sorted)
}
