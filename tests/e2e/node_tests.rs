//! Node.js through the runner script; skipped when Node is not installed

use assert_matches::assert_matches;
use execjs_core::{Context, ExecError};
use execjs_tests::common::{node_runtime, setup_test_logging};
use serde_json::json;

#[tokio::test]
async fn test_eval_split() {
    setup_test_logging();
    let Some(node) = node_runtime() else { return };

    let value = node.eval("", "'red yellow blue'.split(' ')").await.unwrap();
    assert_eq!(value, json!(["red", "yellow", "blue"]));
}

#[tokio::test]
async fn test_exec_undefined_and_values() {
    let Some(node) = node_runtime() else { return };

    assert_eq!(node.exec("", "return").await.unwrap(), json!(null));
    assert_eq!(
        node.exec("", "return {a: 1, b: [2.5, 'x']}").await.unwrap(),
        json!({"a": 1, "b": [2.5, "x"]})
    );
    assert_eq!(node.eval("", "").await.unwrap(), json!(null));
}

#[tokio::test]
async fn test_unicode_round_trip() {
    let Some(node) = node_runtime() else { return };

    let value = node.eval("", "'\u{3042}\u{1F600}'").await.unwrap();
    assert_eq!(value, json!("\u{3042}\u{1F600}"));
}

#[tokio::test]
async fn test_throw_is_program_error() {
    let Some(node) = node_runtime() else { return };

    let err = node.exec("", "throw new Error('boom')").await.unwrap_err();
    assert_matches!(err, ExecError::ProgramError(ref message) if message.contains("boom"));
}

#[tokio::test]
async fn test_unbalanced_parens_is_syntax_error() {
    let Some(node) = node_runtime() else { return };

    let err = node.eval("", "(1 + 2").await.unwrap_err();
    assert_matches!(err, ExecError::RuntimeError(ref message) if message.starts_with("SyntaxError:"));
}

#[tokio::test]
async fn test_unserializable_result_is_err() {
    let Some(node) = node_runtime() else { return };

    let err = node
        .exec("", "var a = {}; a.self = a; return a")
        .await
        .unwrap_err();
    assert_matches!(err, ExecError::ProgramError(ref message) if message.contains("circular"));
}

#[tokio::test]
async fn test_context_call() {
    let Some(node) = node_runtime() else { return };

    let ctx = Context::compile(node, "function add(x, y) { return x + y; }").unwrap();
    assert_eq!(ctx.call("add", &[json!(1), json!(2)]).await.unwrap(), json!(3));
    assert_eq!(ctx.call("add", &[json!("a"), json!("b")]).await.unwrap(), json!("ab"));
}

#[tokio::test]
async fn test_calls_do_not_share_state() {
    let Some(node) = node_runtime() else { return };

    let ctx = Context::compile(node, "var counter = 0;").unwrap();
    assert_eq!(ctx.exec("counter += 1; return counter").await.unwrap(), json!(1));
    assert_eq!(ctx.exec("counter += 1; return counter").await.unwrap(), json!(1));
}
