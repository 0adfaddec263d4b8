//! Common test utilities shared across integration and E2E tests

use execjs_core::{ExecConfig, ExternalRuntime, Registry, Runtime, TempSettings};
use std::path::Path;
use std::sync::Arc;

/// Setup logging for tests
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("execjs_core=debug")
        .with_test_writer()
        .try_init();
}

/// A runtime whose "engine" is `sh` and whose programs are shell scripts.
///
/// The runner script is the program itself, so a program prints the protocol lines
/// directly, and `$0` is the temporary script path.
pub fn shell_runtime() -> ExternalRuntime {
    ExternalRuntime::new("Shell", ["sh"], "#{source}\n")
}

/// [`shell_runtime`] writing its scripts under `dir` with `prefix`
pub fn shell_runtime_in(dir: &Path, prefix: &str) -> ExternalRuntime {
    shell_runtime().with_temp_settings(TempSettings {
        dir: Some(dir.to_path_buf()),
        prefix: prefix.to_string(),
    })
}

/// A shell program printing `line` as the result line
pub fn print_result(line: &str) -> String {
    format!("echo ''\ncat <<'RESULT'\n{}\nRESULT\n", line)
}

/// The built-in registry, with an override variable nobody sets
pub fn builtin_registry() -> Registry {
    let config = ExecConfig {
        env_var: "EXECJS_TESTS_NEVER_SET".to_string(),
        ..ExecConfig::default()
    };
    Registry::builtin(&config)
}

/// Node from the built-in registry, or `None` (with a note) when it is not installed
pub fn node_runtime() -> Option<Arc<dyn Runtime>> {
    match builtin_registry().get(Some("Node")) {
        Ok(runtime) => Some(runtime),
        Err(e) => {
            eprintln!("skipping: {}", e);
            None
        }
    }
}
