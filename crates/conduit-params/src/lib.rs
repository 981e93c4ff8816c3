//! Typed parameters and variable substitution for Conduit pipelines.
//!
//! Task and pipeline definitions declare parameters ([`ParamSpec`]) and bind
//! them to values ([`Param`]). Before a task runs, every `$(...)` reference
//! inside those values is resolved against a [`ReplacementContext`] built
//! from earlier task results, workspace bindings and context variables.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌──────────────────┐
//! │ codec        │──▶│ spec defaults │──▶│ replace          │
//! │ JSON ⇄ value │   │ type inference│   │ promote / splice │
//! └──────────────┘   └───────────────┘   └────────┬─────────┘
//!                                                 │ uses reference
//!                                        ┌────────▼─────────┐
//!                                        │ collection       │
//!                                        │ names / lengths  │
//!                                        └──────────────────┘
//! ```
//!
//! Everything here is pure and synchronous. Resolution never fails:
//! references with no replacement stay in the output as literal text so a
//! partially known context still yields a displayable value.

pub mod codec;
pub mod collection;
pub mod error;
pub mod reference;
pub mod replace;
pub mod result;
pub mod spec;
pub mod validation;
pub mod value;

pub use codec::{decode, decode_param_specs, decode_params, decode_raw, encode};
pub use collection::{
    extract_default_param_array_lengths, extract_names, extract_param_array_lengths,
    sort_by_type, spec_names, validate_no_duplicate_names,
};
pub use error::{ParamsError, Result};
pub use reference::{
    MatrixContext, Reference, ReferenceKind, array_reference, parse_matrix_context,
    parse_references, split_task_and_result, whole_reference,
};
pub use replace::{
    ReplacementContext, apply_array_replacements, apply_replacements, replace_variables,
};
pub use result::ResultSpec;
pub use spec::{ParamSpec, PropertySpec, set_defaults_all};
pub use validation::FieldError;
pub use value::{Param, ParamType, ParamValue};
