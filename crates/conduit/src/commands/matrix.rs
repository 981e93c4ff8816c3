//! Matrix command - task and result names of a matrix length reference.

use anyhow::Result;
use clap::Args;
use serde_json::json;

use conduit_params::{Param, split_task_and_result};

use super::Context;

/// Arguments for the matrix command.
#[derive(Args, Debug)]
pub struct MatrixArgs {
    /// A value such as `$(tasks.build.matrix.length)` or a bare
    /// `tasks.build.matrix.IMAGE.length`
    pub value: String,
}

/// Run the matrix command. Non-matching input prints empty names.
pub fn run(args: MatrixArgs, ctx: &Context) -> Result<()> {
    let (task, result) = match Param::new("value", args.value.as_str()).parse_task_and_result_name()
    {
        (task, _) if task.is_empty() => split_task_and_result(&args.value),
        found => found,
    };
    ctx.print_json(&json!({ "task": task, "result": result }))
}
