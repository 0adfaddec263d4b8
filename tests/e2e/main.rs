//! End-to-end tests against engines installed on this machine

mod babel_tests;
mod node_tests;
