//! Runtime registry and auto-detection

use crate::config::{ExecConfig, DEFAULT_ENV_VAR};
use crate::context::Context;
use crate::error::{ExecError, ExecResult};
use crate::runtime::{builtin_runtimes, Runtime, TempSettings};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

/// Runtimes by registered name, in registration order
pub type RuntimeMap = IndexMap<String, Arc<dyn Runtime>>;

/// Ordered set of named runtimes.
///
/// Registration order is auto-detection priority. Aliases are extra names for the same
/// `Arc`.
pub struct Registry {
    runtimes: RuntimeMap,
    env_var: String,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// An empty registry consulting `EXECJS_RUNTIME`
    pub fn new() -> Self {
        Self {
            runtimes: IndexMap::new(),
            env_var: DEFAULT_ENV_VAR.to_string(),
        }
    }

    /// The built-in runtimes, configured from `config`
    pub fn builtin(config: &ExecConfig) -> Self {
        let temp = TempSettings::from(config);
        let mut registry = Self::new().with_env_var(config.env_var.clone());
        for (name, runtime) in builtin_runtimes(&temp) {
            registry.register(name, runtime);
        }
        registry
    }

    /// Use a different environment variable for the auto-detection override
    pub fn with_env_var(mut self, env_var: impl Into<String>) -> Self {
        self.env_var = env_var.into();
        self
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    /// Insert or replace; a replaced name keeps its position.
    pub fn register(&mut self, name: impl Into<String>, runtime: Arc<dyn Runtime>) {
        let name = name.into();
        tracing::debug!(name = %name, runtime = runtime.name(), "Registering runtime");
        self.runtimes.insert(name, runtime);
    }

    /// Look up `name`, or auto-detect when `None`.
    pub fn get(&self, name: Option<&str>) -> ExecResult<Arc<dyn Runtime>> {
        let Some(name) = name else {
            return self.auto_detect();
        };

        let runtime = self.runtimes.get(name).ok_or_else(|| {
            ExecError::RuntimeUnavailable(format!("{} runtime is not defined", name))
        })?;
        if !runtime.is_available() {
            return Err(ExecError::RuntimeUnavailable(format!(
                "{} runtime is not available on this system",
                runtime.name()
            )));
        }
        Ok(Arc::clone(runtime))
    }

    /// The runtime named by the override variable; `None` when it is unset or empty.
    pub fn get_from_environment(&self) -> ExecResult<Option<Arc<dyn Runtime>>> {
        match std::env::var(&self.env_var) {
            Ok(name) if !name.is_empty() => {
                tracing::debug!(env_var = %self.env_var, name = %name, "Runtime override set");
                self.get(Some(&name)).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn auto_detect(&self) -> ExecResult<Arc<dyn Runtime>> {
        if let Some(runtime) = self.get_from_environment()? {
            return Ok(runtime);
        }

        self.runtimes
            .iter()
            .find(|(_, runtime)| runtime.is_available())
            .map(|(name, runtime)| {
                tracing::info!(name = %name, runtime = runtime.name(), "Auto-detected runtime");
                Arc::clone(runtime)
            })
            .ok_or_else(|| {
                ExecError::RuntimeUnavailable("Could not find a JavaScript runtime.".to_string())
            })
    }

    /// Snapshot of every registered runtime
    pub fn runtimes(&self) -> RuntimeMap {
        self.runtimes.clone()
    }

    /// Snapshot of the runtimes that can run on this system
    pub fn available_runtimes(&self) -> RuntimeMap {
        self.runtimes
            .iter()
            .filter(|(_, runtime)| runtime.is_available())
            .map(|(name, runtime)| (name.clone(), Arc::clone(runtime)))
            .collect()
    }
}

static DEFAULT_REGISTRY: LazyLock<RwLock<Registry>> =
    LazyLock::new(|| RwLock::new(Registry::builtin(&ExecConfig::default())));

fn with_default<T>(f: impl FnOnce(&Registry) -> T) -> T {
    let registry = DEFAULT_REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    f(&registry)
}

/// Register a runtime in the process-wide registry.
pub fn register(name: impl Into<String>, runtime: Arc<dyn Runtime>) {
    DEFAULT_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(name, runtime);
}

/// Look up (or with `None`, auto-detect) a runtime in the process-wide registry.
pub fn get(name: Option<&str>) -> ExecResult<Arc<dyn Runtime>> {
    with_default(|registry| registry.get(name))
}

pub fn get_from_environment() -> ExecResult<Option<Arc<dyn Runtime>>> {
    with_default(|registry| registry.get_from_environment())
}

pub fn runtimes() -> RuntimeMap {
    with_default(|registry| registry.runtimes())
}

pub fn available_runtimes() -> RuntimeMap {
    with_default(|registry| registry.available_runtimes())
}

/// Run `source` as a function body with the auto-detected runtime.
pub async fn exec(source: &str) -> ExecResult<Value> {
    let runtime = get(None)?;
    Context::new(runtime, "").exec(source).await
}

/// Evaluate an expression with the auto-detected runtime.
pub async fn eval(source: &str) -> ExecResult<Value> {
    let runtime = get(None)?;
    Context::new(runtime, "").eval(source).await
}

/// Bind `source` as a preamble on the auto-detected runtime.
pub fn compile(source: &str) -> ExecResult<Context> {
    Context::compile(get(None)?, source)
}
