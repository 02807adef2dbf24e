//! Rename config generation for white-labeled web component documentation.
//!
//! Scans an installed package tree (`node_modules`, scoped or flat), reads
//! each package's export map and the modules behind it, and produces an
//! ordered list of [`RenameDirective`]s describing how class names, custom
//! element tags and their import paths map onto a rebranded distribution.

pub mod config;
pub mod directive;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod scanner;

pub use config::{ExtendDocsConfig, ExtendDocsOptions};
pub use directive::{PathRewrite, Rename, RenameDirective, RenameKind};
pub use error::{ExtendDocsError, Result};
pub use generator::{
    generate_extend_docs_config, scan_package_dir, EntryExports, ExtendDocsGenerator, InstalledPackage,
};
pub use manifest::{ExportMap, ExportMapEntry};
pub use scanner::{ExportEntry, ExportKind, ExportScanner};
