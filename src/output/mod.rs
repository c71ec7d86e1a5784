//! Output writers for derived data.
//!
//! This module handles writing data to disk in various formats:
//! - Parsed-trace artifacts (JSON envelope, optionally gzip)
//! - Section reports (plain text)
//! - Plot series (JSON) for the external plotting step

pub mod artifact;
pub mod json;
pub mod report;

// Re-export main functions
pub use artifact::{load, read_artifact, save, write_artifact, InputKind};
pub use json::{build_series, read_series, write_series, SectionCdf, SeriesExport};
pub use report::{build_report, overhead_series, render_report, write_report, SectionReport};

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create the parent directories of an output file if needed
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
