//! External draft producer
//!
//! Draft maps come from a separate command that reads a grammar's node-type
//! catalog and prints mapping DSL on stdout:
//!
//! ```text
//! <program> <args...> --node-types <catalog> --language <name> --format text [--extensions .a,.b]
//! ```

use crate::error::DraftError;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;
use uastmap_config::DrafterConfig;
use uastmap_core::LanguagePattern;

/// Inputs for drafting one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRequest {
    pub catalog: PathBuf,
    pub canonical_name: String,
    pub extensions: Vec<String>,
}

impl DraftRequest {
    pub fn new(catalog: PathBuf, pattern: &LanguagePattern) -> Self {
        Self {
            catalog,
            canonical_name: pattern.canonical_name.clone(),
            extensions: pattern.extensions.clone(),
        }
    }
}

/// Produces draft mapping text for a language.
pub trait DraftProducer {
    fn draft(&self, request: &DraftRequest) -> Result<String, DraftError>;
}

/// Runs the configured drafting command as a subprocess.
#[derive(Debug, Clone)]
pub struct CommandDrafter {
    program: String,
    args: Vec<String>,
}

impl CommandDrafter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &DrafterConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argument list for `request`, configured arguments first
    pub fn command_args(&self, request: &DraftRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        args.push("--node-types".into());
        args.push(request.catalog.clone().into_os_string());
        args.push("--language".into());
        args.push(request.canonical_name.clone().into());
        args.push("--format".into());
        args.push("text".into());

        if !request.extensions.is_empty() {
            args.push("--extensions".into());
            args.push(request.extensions.join(",").into());
        }

        args
    }
}

impl DraftProducer for CommandDrafter {
    fn draft(&self, request: &DraftRequest) -> Result<String, DraftError> {
        let args = self.command_args(request);
        debug!(
            program = %self.program,
            args = ?args,
            "Running draft command"
        );

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| DraftError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DraftError::failed(
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}
