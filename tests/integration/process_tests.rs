//! The process adapter driven through `sh`

use assert_matches::assert_matches;
use execjs_core::{ExecError, Runtime};
use execjs_tests::common::{print_result, setup_test_logging, shell_runtime, shell_runtime_in};
use serde_json::json;
use std::path::PathBuf;

#[tokio::test]
async fn test_result_line_is_decoded() {
    setup_test_logging();
    let runtime = shell_runtime();

    let value = runtime
        .exec("", &print_result(r#"["ok", {"b": 1, "a": [true, null]}]"#))
        .await
        .unwrap();
    assert_eq!(value, json!({"b": 1, "a": [true, null]}));
}

#[tokio::test]
async fn test_program_output_before_result_is_ignored() {
    let runtime = shell_runtime();
    let program = format!("echo noise\necho more noise\n{}", print_result(r#"["ok", 7]"#));

    assert_eq!(runtime.exec("", &program).await.unwrap(), json!(7));
}

#[tokio::test]
async fn test_err_line_is_program_error() {
    let runtime = shell_runtime();

    let err = runtime
        .exec("", &print_result(r#"["err", "Error: boom"]"#))
        .await
        .unwrap_err();
    assert_matches!(err, ExecError::ProgramError(ref message) if message.contains("boom"));
}

#[tokio::test]
async fn test_preamble_runs_first() {
    let runtime = shell_runtime();

    let value = runtime
        .exec("GREETING=hello", "echo ''\necho \"[\\\"ok\\\", \\\"$GREETING\\\"]\"")
        .await
        .unwrap();
    assert_eq!(value, json!("hello"));
}

#[tokio::test]
async fn test_non_zero_exit_is_runtime_error() {
    let runtime = shell_runtime();

    let err = runtime
        .exec("", "echo 'engine exploded' >&2\nexit 3")
        .await
        .unwrap_err();
    assert_matches!(err, ExecError::RuntimeError(ref message) if message.contains("engine exploded"));
}

#[tokio::test]
async fn test_script_file_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = shell_runtime_in(dir.path(), "probe");

    let value = runtime
        .exec("", "echo ''\necho \"[\\\"ok\\\", \\\"$0\\\"]\"")
        .await
        .unwrap();
    let path = PathBuf::from(value.as_str().unwrap());

    assert_eq!(path.parent(), Some(dir.path()));
    let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.starts_with("probe"), "{}", file_name);
    assert!(file_name.ends_with(".js"), "{}", file_name);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_script_file_is_removed_after_failure() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = shell_runtime_in(dir.path(), "execjs");

    runtime.exec("", "exit 1").await.unwrap_err();
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_concurrent_invocations_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = shell_runtime_in(dir.path(), "execjs");

    let programs: Vec<String> = (0..8)
        .map(|i| format!("echo ''\necho \"[\\\"ok\\\", [{}, \\\"$0\\\"]]\"", i))
        .collect();
    let results =
        futures::future::join_all(programs.iter().map(|program| runtime.exec("", program))).await;

    let mut paths = Vec::new();
    for (i, result) in results.into_iter().enumerate() {
        let value = result.unwrap();
        assert_eq!(value[0], json!(i));
        paths.push(value[1].as_str().unwrap().to_string());
    }
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 8);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
