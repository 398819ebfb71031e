//! Audit of map files already present in the output directory

use crate::error::DriverError;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};
use uastmap_core::dsl::LANGUAGE_HEADER_MARKER;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapAudit {
    /// Map files inspected
    pub checked: usize,
    /// File names whose content does not open with a language header
    pub missing_language_sections: Vec<String>,
    /// Map files that could not be read
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unreadable: Vec<String>,
}

impl MapAudit {
    pub fn is_clean(&self) -> bool {
        self.missing_language_sections.is_empty() && self.unreadable.is_empty()
    }
}

impl fmt::Display for MapAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Checking existing UAST maps for missing language sections...")?;
        if self.is_clean() {
            return writeln!(f, "All existing UAST maps have language sections");
        }
        if !self.missing_language_sections.is_empty() {
            writeln!(
                f,
                "Files missing language sections: {}",
                self.missing_language_sections.len()
            )?;
            for file in &self.missing_language_sections {
                writeln!(f, "  - {}", file)?;
            }
        }
        if !self.unreadable.is_empty() {
            writeln!(f, "Files that could not be read: {}", self.unreadable.len())?;
            for file in &self.unreadable {
                writeln!(f, "  - {}", file)?;
            }
        }
        Ok(())
    }
}

/// Check every `*.<extension>` file directly inside `output_dir`.
///
/// Only an unreadable directory is an error; files that cannot be read are
/// listed in the audit.
pub fn audit_existing_maps(output_dir: &Path, extension: &str) -> Result<MapAudit, DriverError> {
    let entries = std::fs::read_dir(output_dir).map_err(|e| DriverError::io(output_dir, e))?;

    let mut maps = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DriverError::io(output_dir, e))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            maps.push(path);
        }
    }
    maps.sort();

    let mut audit = MapAudit {
        checked: maps.len(),
        ..MapAudit::default()
    };

    for path in maps {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match std::fs::read(&path) {
            Ok(content) if !content.starts_with(LANGUAGE_HEADER_MARKER.as_bytes()) => {
                warn!(file = %name, "UAST map is missing its language section");
                audit.missing_language_sections.push(name);
            }
            Ok(_) => {}
            Err(e) => {
                warn!(file = %name, error = %e, "Failed to read UAST map");
                audit.unreadable.push(name);
            }
        }
    }

    debug!(
        checked = audit.checked,
        missing = audit.missing_language_sections.len(),
        unreadable = audit.unreadable.len(),
        "Audited existing UAST maps"
    );

    Ok(audit)
}
