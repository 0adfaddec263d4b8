//! Engines driven as a child process

use super::process;
use super::{Encoding, Runtime, TempSettings};
use crate::error::{ExecError, ExecResult};
use crate::probe::{which, CommandSpec, ResolvedCommand};
use crate::protocol::extract_result;
use crate::template::RunnerTemplate;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::OnceLock;

/// An engine run as `<command> <runner script>`
pub struct ExternalRuntime {
    name: String,
    command: Vec<CommandSpec>,
    encoding: Encoding,
    runner: RunnerTemplate,
    temp: TempSettings,
    binary: OnceLock<Option<ResolvedCommand>>,
}

impl ExternalRuntime {
    /// `command` lists candidate command lines in preference order.
    pub fn new<I, C>(name: impl Into<String>, command: I, runner_source: &str) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CommandSpec>,
    {
        Self {
            name: name.into(),
            command: command.into_iter().map(Into::into).collect(),
            encoding: Encoding::default(),
            runner: RunnerTemplate::parse(runner_source),
            temp: TempSettings::default(),
            binary: OnceLock::new(),
        }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_temp_settings(mut self, temp: TempSettings) -> Self {
        self.temp = temp;
        self
    }

    pub fn command(&self) -> &[CommandSpec] {
        &self.command
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn runner(&self) -> &RunnerTemplate {
        &self.runner
    }

    pub fn temp_settings(&self) -> &TempSettings {
        &self.temp
    }

    /// The resolved command line; probed once per instance.
    pub fn binary(&self) -> Option<&ResolvedCommand> {
        self.binary
            .get_or_init(|| {
                let resolved = which(&self.command);
                tracing::debug!(
                    runtime = %self.name,
                    program = ?resolved.as_ref().map(|c| c.program.display().to_string()),
                    "Probed runtime command"
                );
                resolved
            })
            .as_ref()
    }

    /// The full script run for `preamble` + `source`.
    pub fn runner_script(&self, preamble: &str, source: &str) -> String {
        if preamble.is_empty() {
            self.runner.render(source)
        } else {
            self.runner.render(&format!("{}\n{}", preamble, source))
        }
    }
}

impl std::fmt::Debug for ExternalRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalRuntime")
            .field("name", &self.name)
            .field("command", &self.command)
            .field("encoding", &self.encoding)
            .finish()
    }
}

#[async_trait]
impl Runtime for ExternalRuntime {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.binary().is_some()
    }

    async fn exec(&self, preamble: &str, source: &str) -> ExecResult<Value> {
        let command = self.binary().ok_or_else(|| {
            ExecError::RuntimeUnavailable(format!(
                "{} runtime is not available on this system",
                self.name
            ))
        })?;

        let script = self.runner_script(preamble, source);
        let output = process::execute(command, self.encoding, &script, &self.temp).await?;
        extract_result(&output)
    }
}
