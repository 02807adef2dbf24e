//! Export scanner - finds exported symbols and custom element registrations
//! in JavaScript modules.

use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::ExtendDocsError;
use crate::Result;

/// What an exported symbol is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// A class, function or variable export
    Variable,
    /// A custom element tag registered with `customElements.define`
    Tag,
}

/// A symbol discovered in a module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    pub name: String,
    pub kind: ExportKind,
    /// Byte offset of the statement in the module that produced it
    pub offset: usize,
}

/// `export * from '...'` without a namespace name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarExport {
    pub specifier: String,
    pub offset: usize,
}

/// Everything found in a single module, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleExports {
    pub entries: Vec<ExportEntry>,
    pub star_exports: Vec<StarExport>,
}

/// Scans JavaScript modules for their top-level exports
pub struct ExportScanner {
    /// `export class X`, `export function x`, `export const x`, ...
    declaration_regex: Regex,
    /// `export { a, b as c }` with an optional `from` clause
    named_regex: Regex,
    /// `export * from '...'` and `export * as ns from '...'`
    star_regex: Regex,
    /// `customElements.define('tag-name', ...)`
    define_regex: Regex,
}

impl ExportScanner {
    /// Create a new export scanner
    pub fn new() -> Self {
        Self {
            declaration_regex: Regex::new(
                r"\bexport\s+(?:declare\s+)?(?:abstract\s+)?(?:async\s+)?(?:class\s+|function\s*\*?\s*|(const|let|var)\s+)([A-Za-z_$][\w$]*)"
            ).unwrap(),
            named_regex: Regex::new(
                r#"\bexport\s*(type\s*)?\{([^}]*)\}(?:\s*from\s*['"]([^'"]*)['"])?"#
            ).unwrap(),
            star_regex: Regex::new(
                r#"\bexport\s*\*\s*(?:as\s+([A-Za-z_$][\w$]*)\s*)?from\s*['"]([^'"]*)['"]"#
            ).unwrap(),
            define_regex: Regex::new(
                r#"\bcustomElements\s*\.\s*define\s*\(\s*['"`]([^'"`]+)['"`]"#
            ).unwrap(),
        }
    }

    /// Scan a module and every relative module it star-re-exports.
    ///
    /// Entries of a followed module take the position of the `export *`
    /// statement that pulled them in.
    pub fn scan_file(&self, path: &Path, package: &str, export: &str) -> Result<Vec<ExportEntry>> {
        let mut visited = HashSet::new();
        self.scan_file_inner(path, package, export, &mut visited)
    }

    fn scan_file_inner(
        &self,
        path: &Path,
        package: &str,
        export: &str,
        visited: &mut HashSet<PathBuf>,
    ) -> Result<Vec<ExportEntry>> {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if !visited.insert(key) {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ExtendDocsError::UnreadableSourceFile {
            package: package.to_string(),
            export: export.to_string(),
            path: path.to_path_buf(),
            source,
        })?;

        let module = self.scan(&content);

        // Merge own entries and followed star exports by source position
        let mut blocks: Vec<(usize, Vec<ExportEntry>)> = module
            .entries
            .into_iter()
            .map(|entry| (entry.offset, vec![entry]))
            .collect();

        for star in module.star_exports {
            if !star.specifier.starts_with('.') {
                log::warn!(
                    "Skipping `export * from '{}'` in {}: only relative modules can be followed",
                    star.specifier,
                    path.display()
                );
                continue;
            }

            let target = resolve_relative(path, &star.specifier);
            log::debug!("Following `export *` into {}", target.display());

            let nested = self
                .scan_file_inner(&target, package, export, visited)?
                .into_iter()
                .filter(|entry| entry.kind == ExportKind::Variable)
                .map(|entry| ExportEntry { offset: star.offset, ..entry })
                .collect();
            blocks.push((star.offset, nested));
        }

        blocks.sort_by_key(|(offset, _)| *offset);
        Ok(blocks.into_iter().flat_map(|(_, entries)| entries).collect())
    }

    /// Scan module source for exports and tag registrations
    pub fn scan(&self, content: &str) -> ModuleExports {
        let blanked = blank(content);
        let code = blanked.code.as_str();
        let source = blanked.source.as_str();

        let mut module = ModuleExports::default();

        for cap in self.declaration_regex.captures_iter(code) {
            let (Some(stmt), Some(name)) = (cap.get(0), cap.get(2)) else { continue };
            module.entries.push(variable(name.as_str(), stmt.start()));
            if cap.get(1).is_some() {
                for binding in trailing_declarators(code, name.end()) {
                    module.entries.push(variable(binding, stmt.start()));
                }
            }
        }

        for cap in self.named_regex.captures_iter(code) {
            let Some(stmt) = cap.get(0) else { continue };
            if cap.get(1).is_some() {
                // export type { ... }
                continue;
            }
            if let Some(names) = cap.get(2) {
                for name in parse_export_clause(names.as_str()) {
                    module.entries.push(variable(&name, stmt.start()));
                }
            }
        }

        for cap in self.star_regex.captures_iter(code) {
            let Some(stmt) = cap.get(0) else { continue };
            match (cap.get(1), cap.get(2)) {
                (Some(namespace), _) => module.entries.push(variable(namespace.as_str(), stmt.start())),
                // Specifiers are blanked in `code`, read them back from `source`
                (None, Some(spec)) => module.star_exports.push(StarExport {
                    specifier: source[spec.range()].to_string(),
                    offset: stmt.start(),
                }),
                (None, None) => {}
            }
        }

        for cap in self.define_regex.captures_iter(source) {
            let (Some(call), Some(tag)) = (cap.get(0), cap.get(1)) else { continue };
            // Calls inside strings or templates are not registrations
            if !code[call.start()..].starts_with("customElements") {
                continue;
            }
            if tag.as_str().contains("${") {
                log::debug!("Skipping computed tag name `{}`", tag.as_str());
                continue;
            }
            module.entries.push(ExportEntry {
                name: tag.as_str().to_string(),
                kind: ExportKind::Tag,
                offset: call.start(),
            });
        }

        module.entries.sort_by_key(|entry| entry.offset);
        module.star_exports.sort_by_key(|star| star.offset);
        module
    }
}

impl Default for ExportScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn variable(name: &str, offset: usize) -> ExportEntry {
    ExportEntry {
        name: name.to_string(),
        kind: ExportKind::Variable,
        offset,
    }
}

/// Exported names of an `export { ... }` clause.
///
/// `a as b` exports `b`; default and type-only specifiers are dropped.
fn parse_export_clause(clause: &str) -> Vec<String> {
    clause
        .split(',')
        .map(str::trim)
        .filter(|spec| !spec.is_empty() && !spec.starts_with("type "))
        .filter_map(|spec| {
            let exported = match spec.split_once(" as ") {
                Some((_, alias)) => alias.trim(),
                None => spec,
            };
            let is_identifier = exported
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '$');
            (exported != "default" && is_identifier).then(|| exported.to_string())
        })
        .collect()
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Bindings after the first one in `const a = 1, b = 2, c = 3`.
///
/// Walks `code` from the end of the first name up to the end of the
/// statement, only looking at commas outside brackets.
fn trailing_declarators(code: &str, from: usize) -> Vec<&str> {
    let bytes = code.as_bytes();
    let mut names = Vec::new();
    let mut depth = 0usize;

    for i in from..bytes.len() {
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            b';' if depth == 0 => break,
            b'\n' if depth == 0 => {
                // A declarator list only continues over a line break next to a comma
                if !code[from..i].trim_end().ends_with(',') && !code[i..].trim_start().starts_with(',') {
                    break;
                }
            }
            b',' if depth == 0 => {
                let rest = code[i + 1..].trim_start();
                let len = rest.find(|c: char| !is_identifier_char(c)).unwrap_or(rest.len());
                let follows = rest[len..].trim_start().chars().next();
                let is_binding = len > 0
                    && !rest.starts_with(|c: char| c.is_ascii_digit())
                    && matches!(follows, None | Some('=' | ',' | ';' | ':' | '\n'));
                if is_binding {
                    names.push(&rest[..len]);
                }
            }
            _ => {}
        }
    }

    names
}

/// Keywords after which a `/` starts a regular expression
const REGEX_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "case", "do", "else", "in", "of", "new", "delete", "void", "throw",
    "yield", "await",
];

/// Whether a `/` following `code` starts a regular expression literal
/// rather than a division
fn regex_allowed(code: &str) -> bool {
    let before = code.trim_end();
    match before.chars().last() {
        None => true,
        Some(c) if "(,=:[!&|?{};+-*%<>~^".contains(c) => true,
        Some(c) if is_identifier_char(c) => {
            let word_start = before
                .char_indices()
                .rev()
                .find(|(_, c)| !is_identifier_char(*c))
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(0);
            REGEX_KEYWORDS.contains(&&before[word_start..])
        }
        _ => false,
    }
}

fn resolve_relative(from: &Path, specifier: &str) -> PathBuf {
    let base = from.parent().unwrap_or_else(|| Path::new("."));
    let target = base.join(specifier);
    if target.extension().is_none() && !target.is_file() {
        target.with_extension("js")
    } else {
        target
    }
}

/// Two views of a module with identical byte offsets
struct Blanked {
    /// Comments and string, template and regex contents replaced by spaces
    code: String,
    /// Only comments replaced by spaces
    source: String,
}

#[derive(Clone, Copy)]
enum Mode {
    Code,
    LineComment,
    BlockComment,
    Quote(char),
    Template,
    Regex { in_class: bool },
}

fn push_blank(out: &mut String, c: char) {
    for _ in 0..c.len_utf8() {
        out.push(' ');
    }
}

fn blank(content: &str) -> Blanked {
    let mut code = String::with_capacity(content.len());
    let mut source = String::with_capacity(content.len());
    let mut mode = Mode::Code;
    // Open `${` expressions of enclosing template literals, with their brace depth
    let mut template_braces: Vec<usize> = Vec::new();
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match mode {
            Mode::Code => {
                match c {
                    '/' if chars.peek() == Some(&'/') => {
                        mode = Mode::LineComment;
                        push_blank(&mut code, c);
                        push_blank(&mut source, c);
                        continue;
                    }
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        mode = Mode::BlockComment;
                        code.push_str("  ");
                        source.push_str("  ");
                        continue;
                    }
                    '/' if regex_allowed(&code) => mode = Mode::Regex { in_class: false },
                    '\'' | '"' => mode = Mode::Quote(c),
                    '`' => mode = Mode::Template,
                    '{' => {
                        if let Some(depth) = template_braces.last_mut() {
                            *depth += 1;
                        }
                    }
                    '}' => match template_braces.last_mut() {
                        Some(0) => {
                            template_braces.pop();
                            mode = Mode::Template;
                        }
                        Some(depth) => *depth -= 1,
                        None => {}
                    },
                    _ => {}
                }
                code.push(c);
                source.push(c);
            }
            Mode::LineComment => {
                if c == '\n' {
                    mode = Mode::Code;
                    code.push(c);
                    source.push(c);
                } else {
                    push_blank(&mut code, c);
                    push_blank(&mut source, c);
                }
            }
            Mode::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    mode = Mode::Code;
                    code.push_str("  ");
                    source.push_str("  ");
                } else if c == '\n' {
                    code.push(c);
                    source.push(c);
                } else {
                    push_blank(&mut code, c);
                    push_blank(&mut source, c);
                }
            }
            Mode::Quote(_) | Mode::Template | Mode::Regex { .. } if c == '\\' => {
                push_blank(&mut code, c);
                source.push(c);
                if let Some(escaped) = chars.next() {
                    push_blank(&mut code, escaped);
                    source.push(escaped);
                }
            }
            Mode::Quote(quote) => {
                if c == quote || c == '\n' {
                    mode = Mode::Code;
                    code.push(c);
                } else {
                    push_blank(&mut code, c);
                }
                source.push(c);
            }
            Mode::Regex { in_class } => {
                if c == '\n' || (c == '/' && !in_class) {
                    mode = Mode::Code;
                    code.push(c);
                } else {
                    match c {
                        '[' => mode = Mode::Regex { in_class: true },
                        ']' => mode = Mode::Regex { in_class: false },
                        _ => {}
                    }
                    push_blank(&mut code, c);
                }
                source.push(c);
            }
            Mode::Template => {
                if c == '`' {
                    mode = Mode::Code;
                    code.push(c);
                    source.push(c);
                } else if c == '$' && chars.peek() == Some(&'{') {
                    chars.next();
                    template_braces.push(0);
                    mode = Mode::Code;
                    code.push_str("${");
                    source.push_str("${");
                } else if c == '\n' {
                    code.push(c);
                    source.push(c);
                } else {
                    push_blank(&mut code, c);
                    source.push(c);
                }
            }
        }
    }

    Blanked { code, source }
}
