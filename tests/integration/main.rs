//! Integration tests for execjs-core against real child processes

#[cfg(unix)]
mod process_tests;
mod registry_tests;
