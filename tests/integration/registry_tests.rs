//! Registry behavior with the built-in runtimes

use assert_matches::assert_matches;
use execjs_core::{ErrorKind, ExecError, ExternalRuntime, Registry, Runtime};
use execjs_tests::common::{builtin_registry, shell_runtime};
use std::sync::Arc;

#[test]
fn test_builtin_names_in_priority_order() {
    let names: Vec<String> = builtin_registry().runtimes().into_keys().collect();
    assert_eq!(
        names,
        vec![
            "V8",
            "Node",
            "JavaScriptCore",
            "SpiderMonkey",
            "Spidermonkey",
            "JScript",
            "PhantomJS",
            "SlimerJS"
        ]
    );
}

#[test]
fn test_alias_shares_one_runtime() {
    let runtimes = builtin_registry().runtimes();
    assert!(Arc::ptr_eq(&runtimes["SpiderMonkey"], &runtimes["Spidermonkey"]));
    assert_eq!(runtimes["Spidermonkey"].name(), "SpiderMonkey");
}

#[test]
fn test_available_is_subset_of_registered() {
    let registry = builtin_registry();
    let all = registry.runtimes();
    for (name, runtime) in registry.available_runtimes() {
        assert!(all.contains_key(&name));
        assert!(runtime.is_available());
    }
}

#[test]
fn test_unknown_runtime_is_not_defined() {
    let err = builtin_registry().get(Some("Rhino")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RuntimeUnavailable);
    assert_eq!(err.to_string(), "Rhino runtime is not defined");
}

#[test]
fn test_missing_engine_is_not_available() {
    let mut registry = Registry::new().with_env_var("EXECJS_TESTS_NEVER_SET");
    registry.register(
        "Ghost",
        Arc::new(ExternalRuntime::new("Ghost Engine", ["no-such-engine-4711"], "#{source}")),
    );

    let err = registry.get(Some("Ghost")).unwrap_err();
    assert_matches!(
        err,
        ExecError::RuntimeUnavailable(ref message)
            if message == "Ghost Engine runtime is not available on this system"
    );
}

#[cfg(unix)]
#[test]
fn test_environment_override_selects_registered_runtime() {
    let mut registry = Registry::new().with_env_var("EXECJS_TESTS_OVERRIDE");
    registry.register(
        "Ghost",
        Arc::new(ExternalRuntime::new("Ghost Engine", ["no-such-engine-4711"], "#{source}")),
    );
    registry.register("First", Arc::new(shell_runtime()));
    registry.register("Second", Arc::new(shell_runtime()));

    let first = registry.get(None).unwrap();
    assert!(Arc::ptr_eq(&first, &registry.runtimes()["First"]));

    std::env::set_var("EXECJS_TESTS_OVERRIDE", "Second");
    let second = registry.get(None).unwrap();
    assert!(Arc::ptr_eq(&second, &registry.runtimes()["Second"]));
    std::env::remove_var("EXECJS_TESTS_OVERRIDE");
}
