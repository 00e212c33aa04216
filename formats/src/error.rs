//! Errors for reading and locating ADS-B data.
//!

use std::path::PathBuf;

use thiserror::Error;

/// Render the list of searched locations.
///
fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("ADS-B data file not found, searched: {}", display_paths(.0))]
    DataFileNotFound(Vec<PathBuf>),
    #[error("can not open {}: {}", .0.display(), .1)]
    Open(PathBuf, #[source] std::io::Error),
    #[error("error reading input at line {0}: {1}")]
    Read(usize, #[source] std::io::Error),
}
