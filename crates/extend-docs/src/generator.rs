//! Rename config generator - turns an installed package tree into rename
//! directives for white-labeled documentation.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ExtendDocsConfig;
use crate::directive::{PathRewrite, Rename, RenameDirective};
use crate::error::ExtendDocsError;
use crate::manifest::{ExportMap, ExportMapEntry};
use crate::scanner::{ExportEntry, ExportKind, ExportScanner};
use crate::Result;

/// An installed package found in the scanned directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    /// Directory name, without scope
    pub name: String,
    /// Name used in directive names (`@scope/name` or `name`)
    pub display_name: String,
    pub path: PathBuf,
}

/// Exports found behind one export map entry
#[derive(Debug, Clone)]
pub struct EntryExports {
    pub entry: ExportMapEntry,
    pub file: PathBuf,
    pub exports: Vec<ExportEntry>,
}

/// Rename config generator
pub struct ExtendDocsGenerator {
    config: ExtendDocsConfig,
    scanner: ExportScanner,
}

impl ExtendDocsGenerator {
    /// Create a new generator
    pub fn new(config: ExtendDocsConfig) -> Self {
        Self {
            config,
            scanner: ExportScanner::new(),
        }
    }

    pub fn config(&self) -> &ExtendDocsConfig {
        &self.config
    }

    /// Generate rename directives for every package, in discovery order
    pub fn generate(&self) -> Result<Vec<RenameDirective>> {
        let mut directives = Vec::new();

        for package in self.packages()? {
            log::debug!("Scanning package {}", package.display_name);
            directives.extend(self.generate_package(&package)?);
        }

        Ok(directives)
    }

    /// List package directories sorted by name.
    ///
    /// Hidden entries such as `.bin` and plain files are ignored.
    pub fn packages(&self) -> Result<Vec<InstalledPackage>> {
        let dir = self.config.packages_dir();

        if !dir.is_dir() {
            return Err(ExtendDocsError::PackageDirectory {
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "directory not found"),
                path: dir,
            });
        }

        let mut packages = Vec::new();

        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ExtendDocsError::PackageDirectory {
                path: dir.clone(),
                source: e.into(),
            })?;

            let name = entry.file_name().to_string_lossy().to_string();
            if !entry.file_type().is_dir() || name.starts_with('.') {
                continue;
            }

            packages.push(InstalledPackage {
                display_name: self.config.display_name(&name),
                name,
                path: entry.path().to_path_buf(),
            });
        }

        Ok(packages)
    }

    /// Resolve the export map of a package and scan every entry point
    pub fn scan_package(&self, package: &InstalledPackage) -> Result<Vec<EntryExports>> {
        scan_package_dir(
            &self.scanner,
            &package.path,
            &package.display_name,
            &self.config.exports_map_json_file_name,
        )
    }

    /// Generate the directives of a single package
    pub fn generate_package(&self, package: &InstalledPackage) -> Result<Vec<RenameDirective>> {
        let mut directives = Vec::new();

        for scanned in self.scan_package(package)? {
            for export in &scanned.exports {
                directives.push(self.directive_for(package, &scanned.entry, export));
            }
        }

        Ok(directives)
    }

    fn directive_for(&self, package: &InstalledPackage, entry: &ExportMapEntry, export: &ExportEntry) -> RenameDirective {
        let subpath = entry.subpath();

        match export.kind {
            ExportKind::Variable => RenameDirective::variable(
                format!("{} - {}", package.display_name, export.name),
                Rename {
                    from: export.name.clone(),
                    to: self.rename_class(&export.name),
                    paths: vec![PathRewrite {
                        from: import_path(&self.config.source_bare_import, &package.name, subpath),
                        to: import_path(&self.config.class_bare_import, &package.name, subpath),
                    }],
                },
            ),
            ExportKind::Tag => RenameDirective::tag(
                join_subpath(&package.display_name, subpath),
                Rename {
                    from: export.name.clone(),
                    to: self.rename_tag(&export.name),
                    paths: vec![PathRewrite {
                        from: import_path(&self.config.source_bare_import, &package.name, subpath),
                        to: import_path(&self.config.tag_bare_import, &package.name, subpath),
                    }],
                },
            ),
        }
    }

    /// `LionAccordion` becomes `<classPrefix>Accordion`; symbols without the
    /// source prefix keep their name.
    pub fn rename_class(&self, name: &str) -> String {
        match name.strip_prefix(self.config.source_class_prefix.as_str()) {
            Some(rest)
                if !self.config.source_class_prefix.is_empty()
                    && rest.starts_with(|c: char| c.is_ascii_uppercase()) =>
            {
                format!("{}{}", self.config.class_prefix, rest)
            }
            _ => name.to_string(),
        }
    }

    /// `lion-accordion` becomes `<tagPrefix>accordion`
    pub fn rename_tag(&self, tag: &str) -> String {
        match tag.strip_prefix(self.config.source_tag_prefix.as_str()) {
            Some(rest) if !self.config.source_tag_prefix.is_empty() => {
                format!("{}{}", self.config.tag_prefix, rest)
            }
            _ => tag.to_string(),
        }
    }
}

/// Resolve the export map of the package in `package_dir` and scan every
/// entry point.
///
/// Define entries contribute only their tag registrations, other entries
/// contribute everything they export. An entry without anything to rename
/// is an error.
pub fn scan_package_dir(
    scanner: &ExportScanner,
    package_dir: &Path,
    package: &str,
    exports_map_json_file_name: &str,
) -> Result<Vec<EntryExports>> {
    let export_map = ExportMap::load(package_dir, package, exports_map_json_file_name)?;

    if export_map.is_empty() {
        log::debug!("Package {} has no scannable exports", package);
    }

    let mut scanned = Vec::with_capacity(export_map.entries.len());

    for entry in export_map.entries {
        let file = package_dir.join(&entry.target);
        let mut exports = scanner.scan_file(&file, package, &entry.export_path)?;

        if entry.is_define_entry() {
            exports.retain(|export| export.kind == ExportKind::Tag);
        }

        if exports.is_empty() {
            return Err(ExtendDocsError::NoRecognizableExport {
                package: package.to_string(),
                export: entry.export_path.clone(),
                path: file,
            });
        }

        log::debug!("{} {}: {} export(s)", package, entry.export_path, exports.len());
        scanned.push(EntryExports { entry, file, exports });
    }

    Ok(scanned)
}

fn join_subpath(base: &str, subpath: &str) -> String {
    if subpath.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, subpath)
    }
}

fn import_path(bare_import: &str, package: &str, subpath: &str) -> String {
    join_subpath(&format!("{}{}", bare_import, package), subpath)
}

/// Generate rename directives for the install tree described by `config`
pub fn generate_extend_docs_config(config: ExtendDocsConfig) -> Result<Vec<RenameDirective>> {
    ExtendDocsGenerator::new(config).generate()
}
