//! Inspect command - show what the generator sees in a single package.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::PathBuf;

use extend_docs::{scan_package_dir, EntryExports, ExportKind, ExportScanner};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Package directory (e.g. node_modules/@lion/accordion)
    pub package_dir: PathBuf,

    /// Manifest file holding the export map
    #[arg(long, default_value = "package.json")]
    pub exports_map_json_file_name: String,

    /// Output as JSON
    #[arg(long)]
    pub format_json: bool,
}

pub async fn execute(args: InspectArgs) -> Result<i32> {
    let package_dir = args
        .package_dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", args.package_dir.display()))?;

    let package = package_name(&package_dir);

    let scanned = match scan_package_dir(
        &ExportScanner::new(),
        &package_dir,
        &package,
        &args.exports_map_json_file_name,
    ) {
        Ok(scanned) => scanned,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            return Ok(1);
        }
    };

    if args.format_json {
        println!("{}", serde_json::to_string_pretty(&to_json(&package, &scanned))?);
        return Ok(0);
    }

    println!("{} {}", style("Package").green().bold(), package);
    for entry in &scanned {
        println!();
        println!(
            "{} -> {}",
            style(&entry.entry.export_path).bold(),
            entry.entry.target
        );
        for export in &entry.exports {
            let kind = match export.kind {
                ExportKind::Variable => style("variable").cyan(),
                ExportKind::Tag => style("tag").magenta(),
            };
            println!("  {:<8} {}", kind, export.name);
        }
    }

    Ok(0)
}

/// `@scope/name` when the package lives in a scope folder, else the folder name
fn package_name(package_dir: &std::path::Path) -> String {
    let name = package_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    match package_dir
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
    {
        Some(scope) if scope.starts_with('@') => format!("{}/{}", scope, name),
        _ => name,
    }
}

fn to_json(package: &str, scanned: &[EntryExports]) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = scanned
        .iter()
        .map(|entry| {
            let exports: Vec<serde_json::Value> = entry
                .exports
                .iter()
                .map(|export| {
                    serde_json::json!({
                        "name": export.name,
                        "kind": match export.kind {
                            ExportKind::Variable => "variable",
                            ExportKind::Tag => "tag",
                        },
                    })
                })
                .collect();

            serde_json::json!({
                "export": entry.entry.export_path,
                "target": entry.entry.target,
                "exports": exports,
            })
        })
        .collect();

    serde_json::json!({
        "package": package,
        "entries": entries,
    })
}
