//! Error types for rename config generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while generating rename directives.
///
/// Every variant names the offending package, and the export path where one
/// is involved.
#[derive(Error, Debug)]
pub enum ExtendDocsError {
    #[error("Package \"{package}\" has no export map at {}", .path.display())]
    MissingExportMap { package: String, path: PathBuf },

    #[error("Export map of package \"{package}\" at {} is invalid: {reason}", .path.display())]
    InvalidExportMap {
        package: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Cannot read source file {} for export \"{export}\" of package \"{package}\"", .path.display())]
    UnreadableSourceFile {
        package: String,
        export: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No recognizable export in {} for export \"{export}\" of package \"{package}\"", .path.display())]
    NoRecognizableExport {
        package: String,
        export: String,
        path: PathBuf,
    },

    #[error("Cannot list packages in {}", .path.display())]
    PackageDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid options file {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, ExtendDocsError>;
