//! Configuration for runtime selection and runner temp files

use crate::error::{ExecError, ExecResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the runtime auto-detection should pick
pub const DEFAULT_ENV_VAR: &str = "EXECJS_RUNTIME";

/// File-name prefix of the temporary runner scripts
pub const DEFAULT_TEMP_PREFIX: &str = "execjs";

/// Execution configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecConfig {
    /// Preferred runtime name (takes part in selection like `--runtime`)
    #[serde(default)]
    pub runtime: Option<String>,
    /// Environment variable consulted during auto-detection
    #[serde(default = "ExecConfig::default_env_var")]
    pub env_var: String,
    /// Directory for runner scripts (system temp dir when unset)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    /// Runner script file-name prefix
    #[serde(default = "ExecConfig::default_temp_prefix")]
    pub temp_prefix: String,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            runtime: None,
            env_var: Self::default_env_var(),
            temp_dir: None,
            temp_prefix: Self::default_temp_prefix(),
        }
    }
}

impl ExecConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> ExecResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExecError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Load the per-user configuration, falling back to defaults when it is absent
    pub fn load_default() -> ExecResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> ExecResult<Self> {
        let config: ExecConfig = toml::from_str(content)
            .map_err(|e| ExecError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// `~/.config/execjs/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("execjs").join("config.toml"))
    }

    fn validate(&self) -> ExecResult<()> {
        if self.env_var.is_empty() {
            return Err(ExecError::Config("env_var must not be empty".to_string()));
        }
        if self.temp_prefix.contains(std::path::is_separator) {
            return Err(ExecError::Config(format!(
                "temp_prefix must be a plain file-name prefix, got {:?}",
                self.temp_prefix
            )));
        }
        Ok(())
    }

    fn default_env_var() -> String {
        DEFAULT_ENV_VAR.to_string()
    }

    fn default_temp_prefix() -> String {
        DEFAULT_TEMP_PREFIX.to_string()
    }
}
