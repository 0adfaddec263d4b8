//! Babel transforms on top of an execjs [`Context`].
//!
//! ```no_run
//! # async fn demo() -> Result<(), execjs_babel::TransformError> {
//! use execjs_babel::{TransformOptions, Transformer};
//!
//! let transformer = Transformer::new("/opt/babel/browser.js")?;
//! let code = transformer
//!     .transform_string("const a = () => 233", &TransformOptions::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```

use execjs_core::{Context, ExecError, Runtime, Value};
use serde::{Deserialize, Serialize};
use serde_json::Map;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Failed to load Babel: {0}")]
    Load(#[source] ExecError),

    /// Babel rejected the input
    #[error("{0}")]
    Transform(String),

    #[error("Babel result has no code field")]
    MissingCode,

    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Options passed to `babel.transform`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformOptions {
    pub presets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<Value>,
    /// Any other Babel option, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            presets: ["es2015", "stage-0", "react"]
                .into_iter()
                .map(String::from)
                .collect(),
            plugins: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl TransformOptions {
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A context with the Babel module loaded as `babel`
#[derive(Debug, Clone)]
pub struct Transformer {
    context: Context,
}

impl Transformer {
    /// Load Babel from `babel_path` into the auto-detected runtime.
    pub fn new(babel_path: impl AsRef<Path>) -> Result<Self, TransformError> {
        let runtime = execjs_core::get(None).map_err(TransformError::Load)?;
        Self::with_runtime(runtime, babel_path)
    }

    /// Load Babel into a specific runtime. It must provide `require`.
    pub fn with_runtime(
        runtime: Arc<dyn Runtime>,
        babel_path: impl AsRef<Path>,
    ) -> Result<Self, TransformError> {
        let source = require_source(babel_path.as_ref());
        tracing::debug!(runtime = runtime.name(), source = %source, "Loading Babel");
        let context = Context::compile(runtime, source).map_err(TransformError::Load)?;
        Ok(Self { context })
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Transform `code` and return the generated source.
    pub async fn transform_string(
        &self,
        code: &str,
        options: &TransformOptions,
    ) -> Result<String, TransformError> {
        let options = serde_json::to_value(options).map_err(ExecError::from)?;
        let result = self
            .context
            .call("babel.transform", &[Value::from(code), options])
            .await
            .map_err(|e| match e {
                ExecError::ProgramError(message) => {
                    TransformError::Transform(strip_error_label(&message).to_string())
                }
                other => TransformError::Exec(other),
            })?;

        match result.get("code") {
            Some(Value::String(code)) => Ok(code.clone()),
            _ => Err(TransformError::MissingCode),
        }
    }
}

fn require_source(path: &Path) -> String {
    // A JSON string literal is a valid JS string literal for any path
    let literal = Value::from(path.to_string_lossy().into_owned()).to_string();
    format!("var babel = require({});", literal)
}

/// `SyntaxError: unknown: Unexpected token` becomes `unknown: Unexpected token`.
fn strip_error_label(message: &str) -> &str {
    match message.split_once(": ") {
        Some((label, rest))
            if !label.is_empty()
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') =>
        {
            rest
        }
        _ => message,
    }
}
