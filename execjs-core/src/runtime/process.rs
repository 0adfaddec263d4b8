//! Process-based execution of runner scripts

use super::{Encoding, TempSettings};
use crate::error::{ExecError, ExecResult};
use crate::execution::ExecutionId;
use crate::probe::ResolvedCommand;
use std::io::{Read, Write};
use std::process::Stdio;
use tokio::process::Command;
use tracing::Instrument;

/// Suffix of runner script files
pub(crate) const SCRIPT_SUFFIX: &str = ".js";

/// Write `script` to a fresh temp file, run `command` on it and return its combined
/// stdout/stderr.
///
/// The temp file is removed on every path out of this function, including spawn failure
/// and the future being dropped (which also kills the child).
pub(crate) async fn execute(
    command: &ResolvedCommand,
    encoding: Encoding,
    script: &str,
    temp: &TempSettings,
) -> ExecResult<String> {
    let id = ExecutionId::new();
    let span = tracing::debug_span!(
        "execjs.exec",
        execution_id = %id,
        program = %command.program.display()
    );
    run(command, encoding, script, temp).instrument(span).await
}

async fn run(
    command: &ResolvedCommand,
    encoding: Encoding,
    script: &str,
    temp: &TempSettings,
) -> ExecResult<String> {
    let bytes = encoding.encode(script)?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(&temp.prefix).suffix(SCRIPT_SUFFIX);
    let mut file = match &temp.dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };
    file.write_all(&bytes)?;
    file.flush()?;
    let path = file.into_temp_path();
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote runner script");

    // stdout and stderr share one pipe so the output keeps its interleaving
    let (mut reader, writer) = std::io::pipe()?;
    let writer_err = writer.try_clone()?;

    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .arg(path.as_os_str())
        .stdin(Stdio::null())
        .stdout(writer)
        .stderr(writer_err)
        .kill_on_drop(true);

    let spawned = cmd.spawn();
    // Close the parent's copies of the write end, or the reader never sees EOF
    drop(cmd);
    let mut child = spawned.map_err(|e| {
        ExecError::RuntimeError(format!(
            "Failed to launch {}: {}",
            command.program.display(),
            e
        ))
    })?;

    let reader_task = tokio::task::spawn_blocking(move || {
        let mut captured = Vec::new();
        reader.read_to_end(&mut captured).map(|_| captured)
    });

    let status = child.wait().await?;
    let captured = reader_task
        .await
        .map_err(|e| ExecError::RuntimeError(format!("Output reader failed: {}", e)))??;

    if let Err(e) = path.close() {
        tracing::warn!(error = %e, "Failed to remove runner script");
    }

    let output = encoding.decode(&captured);
    if status.success() {
        tracing::debug!(output_len = output.len(), "Runner finished");
        Ok(output)
    } else {
        tracing::warn!(
            exit_code = ?status.code(),
            output_len = output.len(),
            "Runtime process failed"
        );
        Err(ExecError::RuntimeError(output))
    }
}
