//! The transformer against a stand-in Babel module loaded by Node

use assert_matches::assert_matches;
use execjs_babel::{TransformError, TransformOptions, Transformer};
use execjs_core::ExecError;
use execjs_tests::common::node_runtime;

/// Upper-cases its input and echoes the presets; throws on `fail` and `parse`
const FAKE_BABEL: &str = r#"
module.exports = {
  transform: function(code, opts) {
    if (code === 'fail') {
      throw new Error('unknown: Unexpected token (1:0)');
    }
    if (code === 'parse') {
      throw new SyntaxError('Unexpected end of input');
    }
    return { code: code.toUpperCase() + ' /* ' + opts.presets.join(',') + ' */', map: null };
  }
};
"#;

fn fake_babel() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("babel.js"), FAKE_BABEL).unwrap();
    dir
}

#[tokio::test]
async fn test_transform_string() {
    let Some(node) = node_runtime() else { return };
    let dir = fake_babel();
    let transformer = Transformer::with_runtime(node, dir.path().join("babel.js")).unwrap();

    let code = transformer
        .transform_string("var a = 1", &TransformOptions::default())
        .await
        .unwrap();
    assert_eq!(code, "VAR A = 1 /* es2015,stage-0,react */");
}

#[tokio::test]
async fn test_transform_error_drops_label() {
    let Some(node) = node_runtime() else { return };
    let dir = fake_babel();
    let transformer = Transformer::with_runtime(node, dir.path().join("babel.js")).unwrap();

    let err = transformer
        .transform_string("fail", &TransformOptions::default())
        .await
        .unwrap_err();
    assert_matches!(
        err,
        TransformError::Transform(ref message) if message == "unknown: Unexpected token (1:0)"
    );
}

#[tokio::test]
async fn test_syntax_error_is_not_a_transform_error() {
    let Some(node) = node_runtime() else { return };
    let dir = fake_babel();
    let transformer = Transformer::with_runtime(node, dir.path().join("babel.js")).unwrap();

    let err = transformer
        .transform_string("parse", &TransformOptions::default())
        .await
        .unwrap_err();
    assert_matches!(err, TransformError::Exec(ExecError::RuntimeError(_)));
}
