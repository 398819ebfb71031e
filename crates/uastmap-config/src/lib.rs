//! Configuration management for the UAST mapping generator

pub mod logging;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "uastmap.toml";

/// Prefix of environment overrides; `__` separates nested keys
pub const ENV_PREFIX: &str = "UASTMAP_";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root holding one directory per language grammar
    pub grammars_dir: PathBuf,
    /// Destination of generated map files
    pub output_dir: PathBuf,
    /// UAST schema resource
    pub schema_path: PathBuf,
    /// Node-type catalog file name searched inside each grammar directory
    pub catalog_filename: String,
    /// Extension of generated map files, without the dot
    pub map_extension: String,
    pub drafter: DrafterConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grammars_dir: PathBuf::from("third_party/grammars"),
            output_dir: PathBuf::from("pkg/uast/uastmaps"),
            schema_path: PathBuf::from("pkg/uast/pkg/spec/uast-schema.json"),
            catalog_filename: "node-types.json".to_string(),
            map_extension: "uastmap".to_string(),
            drafter: DrafterConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// External command that turns a node-type catalog into a draft map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrafterConfig {
    pub program: String,
    /// Leading arguments, placed before the per-language ones
    pub args: Vec<String>,
}

impl Default for DrafterConfig {
    fn default() -> Self {
        Self {
            program: "./build/bin/uast".to_string(),
            args: vec!["mapping".to_string(), "--generate".to_string()],
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format for development
    #[default]
    Pretty,
    /// Structured JSON format
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Figment error: {0}")]
    Figment(#[from] figment::Error),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

impl From<ConfigError> for figment::Error {
    fn from(err: ConfigError) -> figment::Error {
        use figment::error::Kind;
        figment::Error::from(Kind::Message(err.to_string()))
    }
}

impl AppConfig {
    /// Layered configuration sources, lowest priority first:
    /// 1. Built-in defaults
    /// 2. `config_file`, or `uastmap.toml` in the working directory if present
    /// 3. Environment variables (`UASTMAP_OUTPUT_DIR`, `UASTMAP_DRAFTER__PROGRAM`, ...)
    ///
    /// An explicitly named config file must exist.
    pub fn figment(config_file: Option<&Path>) -> Result<Figment, ConfigError> {
        let toml_path = match config_file {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::invalid(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if toml_path.is_file() {
            tracing::debug!(path = %toml_path.display(), "Loading TOML configuration");
        }

        Ok(Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(toml_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Load and validate configuration. CLI flags are applied by the caller
    /// on top of the returned value.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config: AppConfig = Self::figment(config_file)?.extract()?;
        config.validate()?;

        tracing::debug!(
            grammars_dir = %config.grammars_dir.display(),
            output_dir = %config.output_dir.display(),
            drafter = %config.drafter.program,
            "Configuration loaded"
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.drafter.program.trim().is_empty() {
            return Err(ConfigError::invalid("Drafter program cannot be empty"));
        }

        if self.catalog_filename.trim().is_empty() {
            return Err(ConfigError::invalid("Catalog file name cannot be empty"));
        }

        if self.map_extension.trim().is_empty() {
            return Err(ConfigError::invalid("Map extension cannot be empty"));
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::invalid(format!(
                "Invalid log level '{}', must be one of: {}",
                self.logging.level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// `<output_dir>/<dir>.<map_extension>`
    pub fn output_path(&self, dir: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", dir, self.map_extension))
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::invalid(e.to_string()))
    }
}
