//! `$(...)` reference grammar.
//!
//! # Syntax
//!
//! - `$(params.name)`: plain reference
//! - `$(params.name[*])`: every element of an array or object
//! - `$(params.name[0])`: one array element
//! - `$(params.name.field)`: one object field
//! - `$(tasks.build.matrix.length)` / `$(tasks.build.matrix.IMAGE.length)`:
//!   fan-out size of a matrixed task
//!
//! Index and field forms are not evaluated here. `name[0]` and `name.field`
//! are opaque lookup keys; whoever builds the replacement maps is
//! responsible for putting the right value under them.

const OPEN: &str = "$(";
const CLOSE: char = ')';
const STAR: &str = "[*]";
const PARAMS_PREFIX: &str = "params.";

/// What a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `$(name)`
    Scalar,
    /// `$(name[*])`
    Star,
    /// `$(name[N])`
    Index(usize),
    /// `$(name.field)`
    Field,
    /// `$(tasks.<task>.matrix[.<result>].length)`
    MatrixContext,
}

/// One `$(...)` occurrence in a text value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    /// The occurrence including delimiters, e.g. `$(params.x[*])`.
    pub raw: &'a str,
    /// Text between the delimiters, e.g. `params.x[*]`.
    pub expression: &'a str,
    pub kind: ReferenceKind,
}

impl<'a> Reference<'a> {
    fn new(raw: &'a str, expression: &'a str) -> Self {
        Self {
            raw,
            expression,
            kind: classify(expression),
        }
    }

    /// Lookup key for array and object maps: the expression minus `[*]`.
    pub fn key(&self) -> &'a str {
        self.expression
            .strip_suffix(STAR)
            .unwrap_or(self.expression)
    }
}

fn classify(expression: &str) -> ReferenceKind {
    if parse_matrix_context(expression).is_some() {
        return ReferenceKind::MatrixContext;
    }
    if expression.ends_with(STAR) {
        return ReferenceKind::Star;
    }
    if let Some(index) = trailing_index(expression) {
        return ReferenceKind::Index(index);
    }
    let unscoped = expression
        .strip_prefix(PARAMS_PREFIX)
        .unwrap_or(expression);
    if unscoped.contains('.') {
        ReferenceKind::Field
    } else {
        ReferenceKind::Scalar
    }
}

/// `name[12]` → `Some(12)`.
fn trailing_index(expression: &str) -> Option<usize> {
    let body = expression.strip_suffix(']')?;
    let open = body.rfind('[')?;
    let digits = &body[open + 1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Find every reference in `text`, left to right.
///
/// An unterminated `$(` ends the scan; empty `$()` is skipped. Neither is
/// an error.
pub fn parse_references(text: &str) -> Vec<Reference<'_>> {
    let mut references = Vec::new();
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find(OPEN) {
        let start = cursor + found;
        let body = start + OPEN.len();
        let Some(close) = text[body..].find(CLOSE) else {
            break;
        };
        let end = body + close;
        let expression = &text[body..end];

        // `$(a $(b)`: restart at the innermost opener.
        if let Some(inner) = expression.rfind(OPEN) {
            cursor = body + inner;
            continue;
        }

        if !expression.is_empty() {
            references.push(Reference::new(&text[start..=end], expression));
        }
        cursor = end + 1;
    }

    references
}

/// The reference that makes up the entire text, if any.
///
/// Only `$(` + `[_a-zA-Z0-9.-]+` + optional `[N]` or `[*]` + `)` qualifies.
/// Surrounding text, whitespace, or a second reference disqualify it.
pub fn whole_reference(text: &str) -> Option<Reference<'_>> {
    let expression = text.strip_prefix(OPEN)?.strip_suffix(CLOSE)?;

    let (name, subscript) = match expression.find('[') {
        Some(open) => (&expression[..open], Some(&expression[open..])),
        None => (expression, None),
    };

    let name_ok = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-'));
    if !name_ok {
        return None;
    }

    if let Some(subscript) = subscript {
        let inner = subscript.strip_prefix('[')?.strip_suffix(']')?;
        let inner_ok =
            inner == "*" || (!inner.is_empty() && inner.bytes().all(|b| b.is_ascii_digit()));
        if !inner_ok {
            return None;
        }
    }

    Some(Reference::new(text, expression))
}

/// Strip `$(` and `[*])` from a star reference, returning the bare name.
///
/// A leading `params.` scope is dropped too. Input that is not in the
/// delimited star form comes back unchanged, so callers compare the output
/// with the input to tell the two cases apart.
pub fn array_reference(expr: &str) -> &str {
    let Some(name) = expr
        .strip_prefix(OPEN)
        .and_then(|rest| rest.strip_suffix("[*])"))
    else {
        return expr;
    };
    name.strip_prefix(PARAMS_PREFIX).unwrap_or(name)
}

// ─────────────────────────────────────────────────────────────────────────────
// Matrix context
// ─────────────────────────────────────────────────────────────────────────────

/// A `tasks.<task>.matrix[.<result>].length` context reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixContext<'a> {
    /// The matrixed pipeline task.
    pub task: &'a str,
    /// Result whose per-combination length is requested, if any.
    pub result: Option<&'a str>,
}

/// Classify a matrix context reference, with or without `$( )` delimiters.
pub fn parse_matrix_context(expr: &str) -> Option<MatrixContext<'_>> {
    let expr = expr
        .strip_prefix(OPEN)
        .and_then(|rest| rest.strip_suffix(CLOSE))
        .unwrap_or(expr);

    let segments: Vec<&str> = expr.split('.').collect();
    match segments.as_slice() {
        &["tasks", task, "matrix", "length"] if !task.is_empty() => {
            Some(MatrixContext { task, result: None })
        }
        &["tasks", task, "matrix", result, "length"] if !task.is_empty() && !result.is_empty() => {
            Some(MatrixContext {
                task,
                result: Some(result),
            })
        }
        _ => None,
    }
}

/// `(task, result)` of a matrix context reference, `("", "")` otherwise.
pub fn split_task_and_result(expr: &str) -> (String, String) {
    match parse_matrix_context(expr) {
        Some(ctx) => (
            ctx.task.to_string(),
            ctx.result.unwrap_or_default().to_string(),
        ),
        None => (String::new(), String::new()),
    }
}
