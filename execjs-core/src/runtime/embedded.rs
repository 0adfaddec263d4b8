//! In-process engine

use super::Runtime;
use crate::error::ExecResult;
use crate::template::encode_unicode_codepoints;
use async_trait::async_trait;
use serde_json::Value;

/// Whether this build carries the embedded V8 engine.
pub fn embedded_engine_available() -> bool {
    cfg!(feature = "v8")
}

/// V8 embedded through deno_core; programs never leave the process
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedRuntime;

impl EmbeddedRuntime {
    pub fn new() -> Self {
        Self
    }

    /// Wrap preamble and source into one anonymous function call.
    pub fn script(preamble: &str, source: &str) -> String {
        format!(
            "(function() {{\n{};\n{};\n}})()",
            encode_unicode_codepoints(preamble),
            encode_unicode_codepoints(source)
        )
    }
}

#[async_trait]
impl Runtime for EmbeddedRuntime {
    fn name(&self) -> &str {
        "V8"
    }

    fn is_available(&self) -> bool {
        embedded_engine_available()
    }

    #[cfg(feature = "v8")]
    async fn exec(&self, preamble: &str, source: &str) -> ExecResult<Value> {
        super::v8::run_script(Self::script(preamble, source)).await
    }

    #[cfg(not(feature = "v8"))]
    async fn exec(&self, _preamble: &str, _source: &str) -> ExecResult<Value> {
        Err(crate::error::ExecError::RuntimeUnavailable(
            "V8 runtime not enabled. Compile with --features v8".to_string(),
        ))
    }

    async fn eval(&self, preamble: &str, source: &str) -> ExecResult<Value> {
        self.exec(preamble, &format!("return {}", source)).await
    }
}
