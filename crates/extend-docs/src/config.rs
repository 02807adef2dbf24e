//! Generator configuration and the optional JSON options file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ExtendDocsError;
use crate::Result;

/// Configuration for rename config generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtendDocsConfig {
    /// Root of the installed package tree
    pub node_modules_dir: PathBuf,
    /// Scope folder holding the packages; empty for a flat layout
    pub npm_scope: String,
    /// Prefix given to renamed classes
    pub class_prefix: String,
    /// Import prefix for renamed class paths
    pub class_bare_import: String,
    /// Prefix given to renamed custom element tags
    pub tag_prefix: String,
    /// Import prefix for renamed tag paths
    pub tag_bare_import: String,
    /// Name of the manifest carrying each package's export map
    pub exports_map_json_file_name: String,
    /// Class prefix that gets replaced
    pub source_class_prefix: String,
    /// Tag prefix that gets replaced
    pub source_tag_prefix: String,
    /// Import prefix of the original paths
    pub source_bare_import: String,
}

impl Default for ExtendDocsConfig {
    fn default() -> Self {
        Self {
            node_modules_dir: PathBuf::from("node_modules"),
            npm_scope: "@lion".to_string(),
            class_prefix: "Lion".to_string(),
            class_bare_import: "@lion/".to_string(),
            tag_prefix: "lion-".to_string(),
            tag_bare_import: "@lion/".to_string(),
            exports_map_json_file_name: "package.json".to_string(),
            source_class_prefix: "Lion".to_string(),
            source_tag_prefix: "lion-".to_string(),
            source_bare_import: "@lion/".to_string(),
        }
    }
}

impl ExtendDocsConfig {
    /// Create a configuration for the given install tree with default options
    pub fn new(node_modules_dir: impl Into<PathBuf>) -> Self {
        Self {
            node_modules_dir: node_modules_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_npm_scope(mut self, scope: impl Into<String>) -> Self {
        self.npm_scope = scope.into();
        self
    }

    pub fn with_class_target(mut self, prefix: impl Into<String>, bare_import: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self.class_bare_import = bare_import.into();
        self
    }

    pub fn with_tag_target(mut self, prefix: impl Into<String>, bare_import: impl Into<String>) -> Self {
        self.tag_prefix = prefix.into();
        self.tag_bare_import = bare_import.into();
        self
    }

    pub fn with_exports_map_json_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.exports_map_json_file_name = file_name.into();
        self
    }

    /// Directory whose subdirectories are the packages to scan
    pub fn packages_dir(&self) -> PathBuf {
        if self.npm_scope.is_empty() {
            self.node_modules_dir.clone()
        } else {
            self.node_modules_dir.join(&self.npm_scope)
        }
    }

    /// Name of a package as shown in directive names
    pub fn display_name(&self, package: &str) -> String {
        if self.npm_scope.is_empty() {
            package.to_string()
        } else {
            format!("{}/{}", self.npm_scope, package)
        }
    }

    /// Apply every option that is set, leaving the rest untouched
    pub fn merge(&mut self, options: ExtendDocsOptions) {
        if let Some(v) = options.node_modules_dir {
            self.node_modules_dir = v;
        }
        if let Some(v) = options.npm_scope {
            self.npm_scope = v;
        }
        if let Some(v) = options.class_prefix {
            self.class_prefix = v;
        }
        if let Some(v) = options.class_bare_import {
            self.class_bare_import = v;
        }
        if let Some(v) = options.tag_prefix {
            self.tag_prefix = v;
        }
        if let Some(v) = options.tag_bare_import {
            self.tag_bare_import = v;
        }
        if let Some(v) = options.exports_map_json_file_name {
            self.exports_map_json_file_name = v;
        }
        if let Some(v) = options.source_class_prefix {
            self.source_class_prefix = v;
        }
        if let Some(v) = options.source_tag_prefix {
            self.source_tag_prefix = v;
        }
        if let Some(v) = options.source_bare_import {
            self.source_bare_import = v;
        }
    }
}

/// Partially specified options, as read from an options file or the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExtendDocsOptions {
    pub node_modules_dir: Option<PathBuf>,
    pub npm_scope: Option<String>,
    pub class_prefix: Option<String>,
    pub class_bare_import: Option<String>,
    pub tag_prefix: Option<String>,
    pub tag_bare_import: Option<String>,
    pub exports_map_json_file_name: Option<String>,
    pub source_class_prefix: Option<String>,
    pub source_tag_prefix: Option<String>,
    pub source_bare_import: Option<String>,
}

impl ExtendDocsOptions {
    /// Load options from a JSON file.
    ///
    /// A relative `nodeModulesDir` is resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ExtendDocsError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut options: ExtendDocsOptions =
            serde_json::from_str(&content).map_err(|e| ExtendDocsError::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if let (Some(dir), Some(base)) = (options.node_modules_dir.as_ref(), path.parent()) {
            if dir.is_relative() {
                options.node_modules_dir = Some(base.join(dir));
            }
        }

        Ok(options)
    }
}
