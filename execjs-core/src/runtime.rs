//! Runtime trait and implementations

mod builtin;
mod embedded;
mod external;
mod process;
#[cfg(feature = "v8")]
pub mod v8;

use crate::config::DEFAULT_TEMP_PREFIX;
use crate::error::{ExecError, ExecResult};
use crate::template::encode_unicode_codepoints;
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::str::FromStr;

pub(crate) use builtin::builtin_runtimes;
pub use embedded::{embedded_engine_available, EmbeddedRuntime};
pub use external::ExternalRuntime;

/// A JavaScript engine programs can be run through
#[async_trait]
pub trait Runtime: Send + Sync {
    /// Display name
    fn name(&self) -> &str;

    /// Whether the engine can run on this system
    fn is_available(&self) -> bool;

    /// Run `source` as a function body, after the `preamble` statements, and return
    /// whatever it returns.
    async fn exec(&self, preamble: &str, source: &str) -> ExecResult<Value>;

    /// Evaluate `source` as an expression.
    async fn eval(&self, preamble: &str, source: &str) -> ExecResult<Value> {
        self.exec(preamble, &eval_body(source)).await
    }
}

impl std::fmt::Debug for dyn Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Runtime({})", self.name())
    }
}

/// `return eval('(' + <source> + ')')` with the source as an ASCII-only JSON string.
pub(crate) fn eval_body(source: &str) -> String {
    if source.trim().is_empty() {
        return "return eval('')".to_string();
    }
    let quoted = encode_unicode_codepoints(&Value::from(source).to_string());
    format!("return eval('('+{}+')')", quoted)
}

/// Text encoding of runner scripts and engine output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    Ascii,
}

impl Encoding {
    pub fn encode(self, text: &str) -> ExecResult<Vec<u8>> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Ascii => match text.char_indices().find(|(_, c)| !c.is_ascii()) {
                None => Ok(text.as_bytes().to_vec()),
                Some((pos, c)) => Err(ExecError::RuntimeError(format!(
                    "Cannot encode {:?} at byte {} as ASCII",
                    c, pos
                ))),
            },
        }
    }

    /// Decode, failing on bytes the encoding cannot represent.
    pub fn decode_strict(self, bytes: &[u8]) -> ExecResult<String> {
        match self {
            Encoding::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| {
                ExecError::RuntimeError(format!(
                    "Invalid UTF-8 at byte {}",
                    e.utf8_error().valid_up_to()
                ))
            }),
            Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                None => Ok(self.decode(bytes)),
                Some(pos) => Err(ExecError::RuntimeError(format!(
                    "Cannot decode byte 0x{:02x} at {} as ASCII",
                    bytes[pos], pos
                ))),
            },
        }
    }

    /// Decode, replacing what the encoding cannot represent.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Encoding::Ascii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { b as char } else { char::REPLACEMENT_CHARACTER })
                .collect(),
        }
    }
}

impl FromStr for Encoding {
    type Err = ExecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            other => Err(ExecError::Config(format!("Unsupported encoding: {}", other))),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "UTF-8"),
            Encoding::Ascii => write!(f, "ASCII"),
        }
    }
}

/// Where runner scripts are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempSettings {
    /// Directory for the script files (system temp dir when `None`)
    pub dir: Option<PathBuf>,
    /// File-name prefix
    pub prefix: String,
}

impl Default for TempSettings {
    fn default() -> Self {
        Self {
            dir: None,
            prefix: DEFAULT_TEMP_PREFIX.to_string(),
        }
    }
}

impl From<&crate::config::ExecConfig> for TempSettings {
    fn from(config: &crate::config::ExecConfig) -> Self {
        Self {
            dir: config.temp_dir.clone(),
            prefix: config.temp_prefix.clone(),
        }
    }
}
