//! Export map loading - reads the `exports` field of a package manifest.

use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::ExtendDocsError;
use crate::Result;

/// Export conditions tried in order when a target is conditional
const CONDITIONS: &[&str] = &["import", "module", "default", "require"];

/// File extensions of modules that can be scanned for exports
const MODULE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx", "ts", "mts", "tsx"];

/// One public entry point of a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportMapEntry {
    /// Export path as written in the manifest (e.g. `.` or `./define`)
    pub export_path: String,
    /// Module file relative to the package directory
    pub target: String,
}

impl ExportMapEntry {
    /// Export path without the leading `.`/`./` (empty for the main entry)
    pub fn subpath(&self) -> &str {
        let path = self.export_path.trim_start_matches('.');
        path.trim_start_matches('/')
    }

    /// Whether this entry follows the custom element define convention
    /// (`./define`, `./define-checkbox`, `./foo/define`, ...)
    pub fn is_define_entry(&self) -> bool {
        self.subpath()
            .rsplit('/')
            .next()
            .map(|segment| segment.starts_with("define"))
            .unwrap_or(false)
    }
}

/// Ordered export map of a single package
#[derive(Debug, Clone, Default)]
pub struct ExportMap {
    pub entries: Vec<ExportMapEntry>,
}

impl ExportMap {
    /// Load the export map of the package in `package_dir` from `file_name`
    pub fn load(package_dir: &Path, package: &str, file_name: &str) -> Result<Self> {
        let path = package_dir.join(file_name);

        if !path.is_file() {
            return Err(ExtendDocsError::MissingExportMap {
                package: package.to_string(),
                path,
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| invalid(package, &path, e.to_string()))?;
        let json: Value = serde_json::from_str(&content).map_err(|e| invalid(package, &path, e.to_string()))?;

        // A manifest without an export map is the same as no export map at all
        if json.get("exports").is_none() && !is_subpath_map(&json) {
            return Err(ExtendDocsError::MissingExportMap {
                package: package.to_string(),
                path,
            });
        }

        Self::from_json(&json).map_err(|reason| invalid(package, &path, reason))
    }

    /// Build an export map from a parsed manifest.
    ///
    /// Accepts either a package.json style manifest with an `exports` field or
    /// a bare map whose keys all start with `.`.
    pub fn from_json(json: &Value) -> std::result::Result<Self, String> {
        let exports = match json.get("exports") {
            Some(exports) => exports,
            None if is_subpath_map(json) => json,
            None => return Err("no \"exports\" field".to_string()),
        };

        let mut map = ExportMap::default();

        match exports {
            Value::String(_) => map.push(".", exports),
            Value::Object(obj) if is_subpath_map(exports) => {
                for (export_path, target) in obj {
                    map.push(export_path, target);
                }
            }
            // Conditions only, e.g. { "import": "./index.js" }
            Value::Object(_) => map.push(".", exports),
            _ => return Err("\"exports\" must be a string or an object".to_string()),
        }

        Ok(map)
    }

    fn push(&mut self, export_path: &str, target: &Value) {
        if export_path.contains('*') {
            log::debug!("Skipping wildcard export {}", export_path);
            return;
        }

        let Some(target) = resolve_target(target) else {
            log::debug!("Skipping export {} without a module target", export_path);
            return;
        };

        if !is_module_file(&target) {
            log::debug!("Skipping export {} -> {} (not a module)", export_path, target);
            return;
        }

        self.entries.push(ExportMapEntry {
            export_path: export_path.to_string(),
            target,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn invalid(package: &str, path: &Path, reason: String) -> ExtendDocsError {
    ExtendDocsError::InvalidExportMap {
        package: package.to_string(),
        path: path.to_path_buf(),
        reason,
    }
}

fn is_subpath_map(value: &Value) -> bool {
    match value {
        Value::Object(obj) => !obj.is_empty() && obj.keys().all(|k| k.starts_with('.')),
        _ => false,
    }
}

/// Resolve a (possibly conditional) export target to a file reference
fn resolve_target(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => CONDITIONS
            .iter()
            .filter_map(|condition| obj.get(*condition))
            .find_map(resolve_target),
        Value::Array(items) => items.iter().find_map(resolve_target),
        _ => None,
    }
}

fn is_module_file(target: &str) -> bool {
    PathBuf::from(target)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MODULE_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)))
        .unwrap_or(false)
}
