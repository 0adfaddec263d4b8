//! CLI command implementations

use anyhow::{Context as _, Result};
use execjs_core::{Context, Encoding, Registry, Value};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

/// One evaluation as requested on the command line
#[derive(Debug, Clone)]
pub struct EvalRequest {
    pub runtime: Option<String>,
    pub files: Vec<PathBuf>,
    pub encoding: Encoding,
    /// Read from stdin when `None`
    pub expression: Option<String>,
}

/// Available runtime names, sorted
pub fn available_runtime_names(registry: &Registry) -> Vec<String> {
    let mut names: Vec<String> = registry.available_runtimes().into_keys().collect();
    names.sort();
    names
}

/// Compile the context files and evaluate the expression against them
pub async fn execute_eval(registry: &Registry, request: EvalRequest) -> Result<Value> {
    let runtime = registry.get(request.runtime.as_deref())?;
    info!("Using runtime: {}", runtime.name());

    let preamble = read_sources(&request.files, request.encoding).await?;
    let context = Context::compile(runtime, preamble)?;

    let expression = match inline_expression(request.expression) {
        Some(expression) => expression,
        None => read_stdin().await?,
    };
    debug!(len = expression.len(), "Evaluating expression");

    Ok(context.eval(&expression).await?)
}

/// An empty `-e` falls back to stdin like a missing one
fn inline_expression(expression: Option<String>) -> Option<String> {
    expression.filter(|expression| !expression.is_empty())
}

/// Read the files in order and join them with newlines
pub async fn read_sources(files: &[PathBuf], encoding: Encoding) -> Result<String> {
    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let source = encoding
            .decode_strict(&bytes)
            .with_context(|| format!("Failed to decode {} as {}", path.display(), encoding))?;
        sources.push(source);
    }
    Ok(sources.join("\n"))
}

async fn read_stdin() -> Result<String> {
    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read expression from stdin")?;
    Ok(input)
}
