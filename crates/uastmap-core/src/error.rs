//! Error types for uastmap-core

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load the schema enumerations.
///
/// Every variant is fatal for a generation run: without the permitted types
/// and roles no map can be validated.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SchemaError {
    #[error("UAST schema file not found at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in UAST schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No {name} enum found in UAST schema")]
    MissingEnum { name: &'static str },
}

impl SchemaError {
    /// Create a new read error for the schema at `path`
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a new missing-enumeration error
    pub fn missing_enum(name: &'static str) -> Self {
        Self::MissingEnum { name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_enum_message_names_the_enum() {
        let err = SchemaError::missing_enum("Role");
        assert_eq!(err.to_string(), "No Role enum found in UAST schema");
    }

    #[test]
    fn test_read_error_mentions_path() {
        let err = SchemaError::read(
            "schema/uast.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("schema/uast.json"));
    }
}
