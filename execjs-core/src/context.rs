//! Bound sessions against one runtime

use crate::error::{ExecError, ExecResult};
use crate::runtime::Runtime;
use serde_json::Value;
use std::sync::Arc;

/// A runtime plus a preamble prepended to every program run through it.
///
/// Each call is independent; nothing but the preamble carries over between calls.
#[derive(Clone)]
pub struct Context {
    runtime: Arc<dyn Runtime>,
    source: String,
}

impl Context {
    /// Bind without checking availability.
    pub fn new(runtime: Arc<dyn Runtime>, source: impl Into<String>) -> Self {
        Self {
            runtime,
            source: source.into(),
        }
    }

    /// Bind `source` as the preamble, failing if the runtime cannot run here.
    pub fn compile(runtime: Arc<dyn Runtime>, source: impl Into<String>) -> ExecResult<Self> {
        ensure_available(runtime.as_ref())?;
        Ok(Self::new(runtime, source))
    }

    pub fn runtime(&self) -> &Arc<dyn Runtime> {
        &self.runtime
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Run `source` as a function body and return what it returns.
    pub async fn exec(&self, source: &str) -> ExecResult<Value> {
        ensure_available(self.runtime.as_ref())?;
        self.runtime.exec(&self.source, source).await
    }

    /// Evaluate an expression.
    pub async fn eval(&self, source: &str) -> ExecResult<Value> {
        ensure_available(self.runtime.as_ref())?;
        self.runtime.eval(&self.source, source).await
    }

    /// Call the function `identifier` with JSON arguments.
    pub async fn call(&self, identifier: &str, args: &[Value]) -> ExecResult<Value> {
        self.eval(&call_expression(identifier, args)?).await
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("runtime", &self.runtime.name())
            .field("source_len", &self.source.len())
            .finish()
    }
}

pub(crate) fn ensure_available(runtime: &dyn Runtime) -> ExecResult<()> {
    if runtime.is_available() {
        Ok(())
    } else {
        Err(ExecError::RuntimeUnavailable(format!(
            "{} runtime is not available on this system",
            runtime.name()
        )))
    }
}

/// `<identifier>.apply(this, <args as JSON array>)`
pub(crate) fn call_expression(identifier: &str, args: &[Value]) -> ExecResult<String> {
    let args = serde_json::to_string(args)?;
    Ok(format!("{}.apply(this, {})", identifier, args))
}
