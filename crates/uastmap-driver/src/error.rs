//! Driver error types

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uastmap_core::SchemaError;

/// Failure of the external draft producer for one language
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Draft command failed ({}): {stderr}", describe_exit(.code))]
    Failed { code: Option<i32>, stderr: String },

    #[error("Draft output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl DraftError {
    pub fn failed(code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::Failed {
            code,
            stderr: stderr.into(),
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Generation driver errors.
///
/// `Schema`, `GrammarsDir` and `OutputDir` abort a run. `Draft` and `Io`
/// are scoped to one language and end up in the run report.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Cannot read grammars directory {path}: {source}")]
    GrammarsDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DriverError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True for errors that end the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Schema(_) | Self::GrammarsDir { .. } | Self::OutputDir { .. }
        )
    }
}
