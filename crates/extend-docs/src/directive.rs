//! Rename directives consumed by the documentation pipeline.

use serde::{Deserialize, Serialize};

/// An import path rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRewrite {
    pub from: String,
    pub to: String,
}

/// Old and new name of a symbol plus the import paths to rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rename {
    pub from: String,
    pub to: String,
    pub paths: Vec<PathRewrite>,
}

/// What a directive renames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenameKind {
    /// A class, function or variable
    Variable(Rename),
    /// A custom element tag
    Tag(Rename),
}

/// One rename instruction.
///
/// Serializes as `{ "name": ..., "variable": { ... } }` or
/// `{ "name": ..., "tag": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameDirective {
    pub name: String,
    #[serde(flatten)]
    pub kind: RenameKind,
}

impl RenameDirective {
    pub fn variable(name: impl Into<String>, rename: Rename) -> Self {
        Self {
            name: name.into(),
            kind: RenameKind::Variable(rename),
        }
    }

    pub fn tag(name: impl Into<String>, rename: Rename) -> Self {
        Self {
            name: name.into(),
            kind: RenameKind::Tag(rename),
        }
    }

    pub fn rename(&self) -> &Rename {
        match &self.kind {
            RenameKind::Variable(rename) | RenameKind::Tag(rename) => rename,
        }
    }

    pub fn is_tag(&self) -> bool {
        matches!(self.kind, RenameKind::Tag(_))
    }
}
