//! V8 JavaScript engine using deno_core

mod convert;

use crate::error::{ExecError, ExecResult};
use deno_core::v8;
use deno_core::{JsRuntime, RuntimeOptions};
use serde_json::Value;

pub use convert::to_value;

/// Compile and run `code` in a fresh isolate on a blocking thread.
pub(crate) async fn run_script(code: String) -> ExecResult<Value> {
    let start = std::time::Instant::now();
    let result = tokio::task::spawn_blocking(move || run_blocking(&code))
        .await
        .map_err(|e| ExecError::RuntimeError(format!("V8 task panicked: {}", e)))?;

    tracing::debug!(
        duration_ms = start.elapsed().as_millis() as u64,
        ok = result.is_ok(),
        "V8 script finished"
    );
    result
}

fn run_blocking(code: &str) -> ExecResult<Value> {
    let mut runtime = JsRuntime::new(RuntimeOptions::default());
    let scope = &mut runtime.handle_scope();
    let scope = &mut v8::TryCatch::new(scope);

    let source = v8::String::new(scope, code)
        .ok_or_else(|| ExecError::RuntimeError("Script source is too large".to_string()))?;

    // Compile failures are reported like engine failures, thrown errors like program errors
    let Some(script) = v8::Script::compile(scope, source, None) else {
        return Err(ExecError::RuntimeError(exception_message(scope)));
    };
    let Some(value) = script.run(scope) else {
        return Err(ExecError::ProgramError(exception_message(scope)));
    };

    Ok(to_value(scope, value))
}

fn exception_message(scope: &mut v8::TryCatch<v8::HandleScope>) -> String {
    match scope.exception() {
        Some(exception) => exception.to_rust_string_lossy(scope),
        None => "Unknown JavaScript error".to_string(),
    }
}
