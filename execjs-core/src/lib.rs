//! execjs - Run JavaScript from Rust
//!
//! Picks an available JavaScript engine (an external process such as Node.js, or an
//! embedded V8), runs a program through it and hands the result back as a
//! [`serde_json::Value`].
//!
//! ```no_run
//! # async fn demo() -> execjs_core::ExecResult<()> {
//! let colors = execjs_core::eval("'red yellow blue'.split(' ')").await?;
//! assert_eq!(colors, serde_json::json!(["red", "yellow", "blue"]));
//!
//! let ctx = execjs_core::compile("function add(x, y) { return x + y; }")?;
//! let sum = ctx.call("add", &[1.into(), 2.into()]).await?;
//! assert_eq!(sum, serde_json::json!(3));
//! # Ok(())
//! # }
//! ```

mod config;
mod context;
mod error;
mod execution;
mod probe;
pub mod protocol;
mod registry;
mod runtime;
pub mod template;

pub use config::{ExecConfig, DEFAULT_ENV_VAR, DEFAULT_TEMP_PREFIX};
pub use context::Context;
pub use error::{ErrorKind, ExecError, ExecResult};
pub use execution::ExecutionId;
pub use probe::{which, CommandSpec, ResolvedCommand};
pub use protocol::ResultLine;
pub use registry::{
    available_runtimes, compile, eval, exec, get, get_from_environment, register, runtimes,
    Registry, RuntimeMap,
};
pub use runtime::{
    embedded_engine_available, Encoding, EmbeddedRuntime, ExternalRuntime, Runtime, TempSettings,
};
pub use template::{encode_unicode_codepoints, RunnerTemplate};

/// Values crossing the engine boundary
pub type Value = serde_json::Value;
