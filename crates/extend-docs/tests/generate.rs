//! End-to-end generation over package trees laid out like real installs.

use extend_docs::{ExtendDocsConfig, ExtendDocsError, ExtendDocsGenerator, RenameDirective};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write `files` (relative path, content) below `root`
fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let path = root.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

fn accordion_files(prefix: &str) -> Vec<(String, &'static str)> {
    vec![
        (
            format!("{prefix}accordion/package.json"),
            r#"{
  "name": "@lion/accordion",
  "version": "0.0.0",
  "exports": {
    ".": "./index.js",
    "./define": "./define.js"
  }
}"#,
        ),
        (
            format!("{prefix}accordion/index.js"),
            "export { LionAccordion } from './src/LionAccordion.js';\n",
        ),
        (
            format!("{prefix}accordion/define.js"),
            "import { LionAccordion } from './src/LionAccordion.js';\n\ncustomElements.define('lion-accordion', LionAccordion);\n",
        ),
    ]
}

fn write_accordion(root: &Path, prefix: &str) {
    let files = accordion_files(prefix);
    let files: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), *c)).collect();
    write_tree(root, &files);
}

fn ing_config(root: &Path) -> ExtendDocsConfig {
    ExtendDocsConfig::new(root)
        .with_class_target("Ing", "ing-web/")
        .with_tag_target("ing-", "#")
}

fn execute(config: ExtendDocsConfig) -> Value {
    let directives = ExtendDocsGenerator::new(config).generate().unwrap();
    serde_json::to_value(directives).unwrap()
}

#[test]
fn test_single_class_and_tag_export() {
    let temp_dir = TempDir::new().unwrap();
    write_accordion(temp_dir.path(), "@lion/");

    let result = execute(ing_config(temp_dir.path()));

    assert_eq!(
        result,
        json!([
            {
                "name": "@lion/accordion - LionAccordion",
                "variable": {
                    "from": "LionAccordion",
                    "to": "IngAccordion",
                    "paths": [{ "from": "@lion/accordion", "to": "ing-web/accordion" }]
                }
            },
            {
                "name": "@lion/accordion/define",
                "tag": {
                    "from": "lion-accordion",
                    "to": "ing-accordion",
                    "paths": [{ "from": "@lion/accordion/define", "to": "#accordion/define" }]
                }
            }
        ])
    );
}

#[test]
fn test_custom_export_map_file_name() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(
        temp_dir.path(),
        &[
            ("@lion/accordion/package.json", r#"{ "name": "@lion/accordion" }"#),
            (
                "@lion/accordion/exports.json",
                r#"{ "exports": { ".": "./index.js", "./define": "./define.js" } }"#,
            ),
            ("@lion/accordion/index.js", "export { LionAccordion } from './src/LionAccordion.js';\n"),
            ("@lion/accordion/define.js", "customElements.define('lion-accordion', LionAccordion);\n"),
        ],
    );

    let expected = {
        let reference = TempDir::new().unwrap();
        write_accordion(reference.path(), "@lion/");
        execute(ing_config(reference.path()))
    };

    let result = execute(ing_config(temp_dir.path()).with_exports_map_json_file_name("exports.json"));
    assert_eq!(result, expected);

    // The default manifest has no export map
    let err = ExtendDocsGenerator::new(ing_config(temp_dir.path())).generate().unwrap_err();
    assert!(matches!(err, ExtendDocsError::MissingExportMap { .. }));
}

#[test]
fn test_no_npm_scope_folder() {
    let temp_dir = TempDir::new().unwrap();
    write_accordion(temp_dir.path(), "");

    let result = execute(ing_config(temp_dir.path()).with_npm_scope(""));

    assert_eq!(
        result,
        json!([
            {
                "name": "accordion - LionAccordion",
                "variable": {
                    "from": "LionAccordion",
                    "to": "IngAccordion",
                    "paths": [{ "from": "@lion/accordion", "to": "ing-web/accordion" }]
                }
            },
            {
                "name": "accordion/define",
                "tag": {
                    "from": "lion-accordion",
                    "to": "ing-accordion",
                    "paths": [{ "from": "@lion/accordion/define", "to": "#accordion/define" }]
                }
            }
        ])
    );
}

#[test]
fn test_exports_without_prefix() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(
        temp_dir.path(),
        &[
            ("@lion/core/package.json", r#"{ "exports": { ".": "./index.js" } }"#),
            ("@lion/core/index.js", "export { calculateSum } from './src/calculateSum.js';\n"),
        ],
    );

    let result = execute(ing_config(temp_dir.path()));

    assert_eq!(
        result,
        json!([
            {
                "name": "@lion/core - calculateSum",
                "variable": {
                    "from": "calculateSum",
                    "to": "calculateSum",
                    "paths": [{ "from": "@lion/core", "to": "ing-web/core" }]
                }
            }
        ])
    );
}

#[test]
fn test_exports_with_multiple_lines() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(
        temp_dir.path(),
        &[
            ("@lion/core/package.json", r#"{ "exports": { ".": "./index.js" } }"#),
            ("@lion/core/index.js", "export {\n  html,\n  CSSResult,\n  adoptStyles,\n} from 'lit';\n"),
        ],
    );

    let directives = ExtendDocsGenerator::new(ing_config(temp_dir.path())).generate().unwrap();

    let summary: Vec<(&str, &str, &str)> = directives
        .iter()
        .map(|d| (d.name.as_str(), d.rename().from.as_str(), d.rename().to.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("@lion/core - html", "html", "html"),
            ("@lion/core - CSSResult", "CSSResult", "CSSResult"),
            ("@lion/core - adoptStyles", "adoptStyles", "adoptStyles"),
        ]
    );
    for directive in &directives {
        assert!(!directive.is_tag());
        assert_eq!(directive.rename().paths.len(), 1);
        assert_eq!(directive.rename().paths[0].from, "@lion/core");
        assert_eq!(directive.rename().paths[0].to, "ing-web/core");
    }
}

#[test]
fn test_custom_target() {
    let temp_dir = TempDir::new().unwrap();
    write_accordion(temp_dir.path(), "@lion/");

    let config = ExtendDocsConfig::new(temp_dir.path())
        .with_class_target("Wolf", "@wolf-web/")
        .with_tag_target("wolf-", "@wolf-web/");
    let result = execute(config);

    assert_eq!(
        result,
        json!([
            {
                "name": "@lion/accordion - LionAccordion",
                "variable": {
                    "from": "LionAccordion",
                    "to": "WolfAccordion",
                    "paths": [{ "from": "@lion/accordion", "to": "@wolf-web/accordion" }]
                }
            },
            {
                "name": "@lion/accordion/define",
                "tag": {
                    "from": "lion-accordion",
                    "to": "wolf-accordion",
                    "paths": [{ "from": "@lion/accordion/define", "to": "@wolf-web/accordion/define" }]
                }
            }
        ])
    );
}

fn write_checkbox_group(root: &Path) {
    write_tree(
        root,
        &[
            (
                "@lion/checkbox-group/package.json",
                r#"{
  "name": "@lion/checkbox-group",
  "exports": {
    ".": "./index.js",
    "./define-checkbox": "./lion-checkbox.js",
    "./define-checkbox-group": "./lion-checkbox-group.js",
    "./define-checkbox-indeterminate": "./lion-checkbox-indeterminate.js",
    "./define": "./define.js",
    "./docs/*": "./docs/*"
  }
}"#,
            ),
            (
                "@lion/checkbox-group/index.js",
                "export { LionCheckboxGroup } from './src/LionCheckboxGroup.js';\nexport { LionCheckboxIndeterminate } from './src/LionCheckboxIndeterminate.js';\nexport { LionCheckbox } from './src/LionCheckbox.js';\n",
            ),
            (
                "@lion/checkbox-group/lion-checkbox.js",
                "import { LionCheckbox } from './src/LionCheckbox.js';\n\ncustomElements.define('lion-checkbox', LionCheckbox);\n",
            ),
            (
                "@lion/checkbox-group/lion-checkbox-group.js",
                "import { LionCheckboxGroup } from './src/LionCheckboxGroup.js';\n\ncustomElements.define('lion-checkbox-group', LionCheckboxGroup);\n",
            ),
            (
                "@lion/checkbox-group/lion-checkbox-indeterminate.js",
                "import { LionCheckboxIndeterminate } from './src/LionCheckboxIndeterminate.js';\n\ncustomElements.define('lion-checkbox-indeterminate', LionCheckboxIndeterminate);\n",
            ),
            (
                "@lion/checkbox-group/define.js",
                "import './lion-checkbox.js';\nimport './lion-checkbox-group.js';\nimport './lion-checkbox-indeterminate.js';\n\ncustomElements.define('lion-xxx-workaround-xxx', class extends HTMLElement {});\n",
            ),
        ],
    );
}

#[test]
fn test_multiple_class_and_tag_exports() {
    let temp_dir = TempDir::new().unwrap();
    write_checkbox_group(temp_dir.path());

    let directives = ExtendDocsGenerator::new(ing_config(temp_dir.path())).generate().unwrap();

    let summary: Vec<(&str, bool, &str, &str, &str)> = directives
        .iter()
        .map(|d| {
            (
                d.name.as_str(),
                d.is_tag(),
                d.rename().from.as_str(),
                d.rename().to.as_str(),
                d.rename().paths[0].to.as_str(),
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            ("@lion/checkbox-group - LionCheckboxGroup", false, "LionCheckboxGroup", "IngCheckboxGroup", "ing-web/checkbox-group"),
            ("@lion/checkbox-group - LionCheckboxIndeterminate", false, "LionCheckboxIndeterminate", "IngCheckboxIndeterminate", "ing-web/checkbox-group"),
            ("@lion/checkbox-group - LionCheckbox", false, "LionCheckbox", "IngCheckbox", "ing-web/checkbox-group"),
            ("@lion/checkbox-group/define-checkbox", true, "lion-checkbox", "ing-checkbox", "#checkbox-group/define-checkbox"),
            ("@lion/checkbox-group/define-checkbox-group", true, "lion-checkbox-group", "ing-checkbox-group", "#checkbox-group/define-checkbox-group"),
            ("@lion/checkbox-group/define-checkbox-indeterminate", true, "lion-checkbox-indeterminate", "ing-checkbox-indeterminate", "#checkbox-group/define-checkbox-indeterminate"),
            ("@lion/checkbox-group/define", true, "lion-xxx-workaround-xxx", "ing-xxx-workaround-xxx", "#checkbox-group/define"),
        ]
    );
    assert_eq!(directives[3].rename().paths[0].from, "@lion/checkbox-group/define-checkbox");
}

#[test]
fn test_packages_in_directory_order_and_repeatable() {
    let temp_dir = TempDir::new().unwrap();
    write_checkbox_group(temp_dir.path());
    write_accordion(temp_dir.path(), "@lion/");

    let config = ing_config(temp_dir.path());
    let first: Vec<RenameDirective> = ExtendDocsGenerator::new(config.clone()).generate().unwrap();
    let second: Vec<RenameDirective> = ExtendDocsGenerator::new(config).generate().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 9);
    assert_eq!(first[0].name, "@lion/accordion - LionAccordion");
    assert_eq!(first[2].name, "@lion/checkbox-group - LionCheckboxGroup");
}

#[test]
fn test_missing_export_map() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("@lion/broken/index.js", "export const x = 1;\n")]);

    let err = ExtendDocsGenerator::new(ing_config(temp_dir.path())).generate().unwrap_err();
    match err {
        ExtendDocsError::MissingExportMap { package, path } => {
            assert_eq!(package, "@lion/broken");
            assert!(path.ends_with("package.json"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unreadable_source_file() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(
        temp_dir.path(),
        &[("@lion/broken/package.json", r#"{ "exports": { ".": "./missing.js" } }"#)],
    );

    let err = ExtendDocsGenerator::new(ing_config(temp_dir.path())).generate().unwrap_err();
    match err {
        ExtendDocsError::UnreadableSourceFile { package, export, path, .. } => {
            assert_eq!(package, "@lion/broken");
            assert_eq!(export, ".");
            assert!(path.ends_with("missing.js"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_no_recognizable_export() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(
        temp_dir.path(),
        &[
            ("@lion/broken/package.json", r#"{ "exports": { ".": "./index.js" } }"#),
            ("@lion/broken/index.js", "import './side-effect.js';\n"),
        ],
    );

    let err = ExtendDocsGenerator::new(ing_config(temp_dir.path())).generate().unwrap_err();
    assert!(matches!(err, ExtendDocsError::NoRecognizableExport { .. }));
}
