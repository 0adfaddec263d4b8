//! Result line protocol spoken by the runner scripts
//!
//! After the program finishes, every runner prints an empty line followed by exactly one
//! JSON array:
//!
//! ```text
//!
//! ["ok", <value>]      program returned a value
//! ["ok"]               program returned undefined
//! ["err", "<message>"] program threw (or its result could not be serialized)
//! ```
//!
//! The runner catches exceptions, so the engine process exits with status 0 whenever the
//! program itself ran; a non-zero status always means the engine failed.

use crate::error::{ExecError, ExecResult};
use serde_json::Value;

/// Prefix marking an `err` message as a compile failure rather than a thrown error
pub const SYNTAX_ERROR_PREFIX: &str = "SyntaxError:";

const OK_TAG: &str = "ok";
const ERR_TAG: &str = "err";

/// One decoded result line
#[derive(Debug, Clone, PartialEq)]
pub enum ResultLine {
    Ok(Option<Value>),
    Err(Option<String>),
}

impl ResultLine {
    /// Render the line exactly as a runner script would print it.
    pub fn encode(&self) -> String {
        let array = match self {
            ResultLine::Ok(None) => vec![Value::from(OK_TAG)],
            ResultLine::Ok(Some(value)) => vec![Value::from(OK_TAG), value.clone()],
            ResultLine::Err(None) => vec![Value::from(ERR_TAG)],
            ResultLine::Err(Some(message)) => {
                vec![Value::from(ERR_TAG), Value::from(message.as_str())]
            }
        };
        Value::Array(array).to_string()
    }

    /// Parse a result line; `None` when it is not a well-formed tagged tuple.
    pub fn parse(line: &str) -> Option<Self> {
        let Value::Array(mut items) = serde_json::from_str::<Value>(line).ok()? else {
            return None;
        };
        if items.is_empty() || items.len() > 2 {
            return None;
        }
        let payload = if items.len() == 2 { items.pop() } else { None };
        let tag = items.pop()?;

        match tag.as_str()? {
            OK_TAG => Some(ResultLine::Ok(payload)),
            _ => Some(ResultLine::Err(payload.map(|v| match v {
                Value::String(s) => s,
                other => other.to_string(),
            }))),
        }
    }

    /// Turn the line into the caller-facing outcome.
    pub fn into_result(self) -> ExecResult<Value> {
        match self {
            ResultLine::Ok(value) => Ok(value.unwrap_or(Value::Null)),
            ResultLine::Err(Some(message)) if message.starts_with(SYNTAX_ERROR_PREFIX) => {
                Err(ExecError::RuntimeError(message))
            }
            ResultLine::Err(message) => Err(ExecError::ProgramError(message.unwrap_or_default())),
        }
    }
}

/// Pick the result line out of captured runner output.
///
/// Expects normalized line endings. The second-to-last line is taken: the runner's final
/// `print` leaves a trailing newline, so the last element after splitting is empty.
pub fn result_line(output: &str) -> &str {
    let mut lines = output.rsplit('\n');
    let _trailing = lines.next();
    lines.next().unwrap_or("")
}

/// Decode captured runner output into a value or a classified error.
pub fn extract_result(output: &str) -> ExecResult<Value> {
    let normalized = normalize_newlines(output);
    let line = result_line(&normalized);

    if line.is_empty() {
        return Ok(Value::Null);
    }

    match ResultLine::parse(line) {
        Some(result) => result.into_result(),
        None => {
            tracing::warn!(line = %truncate(line, 200), "Runner output has no result line");
            Ok(Value::Null)
        }
    }
}

fn normalize_newlines(output: &str) -> String {
    output.replace("\r\n", "\n").replace('\r', "\n")
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
