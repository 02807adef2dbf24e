//! Generate command - write the rename config for an installed package tree.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use console::style;
use std::path::PathBuf;

use extend_docs::{generate_extend_docs_config, ExtendDocsConfig, ExtendDocsOptions, RenameDirective};

/// How the generated directives are rendered
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty printed JSON directives
    Json,
    /// Table of renames with counts
    Summary,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Root of the installed package tree [default: node_modules]
    #[arg(long, value_name = "DIR")]
    pub node_modules_dir: Option<PathBuf>,

    /// Scope folder holding the packages; pass "" for a flat layout [default: @lion]
    #[arg(long, value_name = "SCOPE")]
    pub npm_scope: Option<String>,

    /// Prefix for renamed classes
    #[arg(long)]
    pub class_prefix: Option<String>,

    /// Import prefix for renamed classes (e.g. "ing-web/")
    #[arg(long)]
    pub class_bare_import: Option<String>,

    /// Prefix for renamed custom element tags
    #[arg(long)]
    pub tag_prefix: Option<String>,

    /// Import prefix for renamed tags (e.g. "#")
    #[arg(long)]
    pub tag_bare_import: Option<String>,

    /// Manifest file holding each package's export map [default: package.json]
    #[arg(long, value_name = "FILE")]
    pub exports_map_json_file_name: Option<String>,

    /// JSON options file; flags override its values
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the directives to this file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

impl GenerateArgs {
    fn options(&self) -> ExtendDocsOptions {
        ExtendDocsOptions {
            node_modules_dir: self.node_modules_dir.clone(),
            npm_scope: self.npm_scope.clone(),
            class_prefix: self.class_prefix.clone(),
            class_bare_import: self.class_bare_import.clone(),
            tag_prefix: self.tag_prefix.clone(),
            tag_bare_import: self.tag_bare_import.clone(),
            exports_map_json_file_name: self.exports_map_json_file_name.clone(),
            ..Default::default()
        }
    }
}

/// Defaults, then the options file, then explicit flags
fn build_config(args: &GenerateArgs) -> Result<ExtendDocsConfig> {
    let mut config = ExtendDocsConfig::default();

    if let Some(path) = &args.config {
        let options = ExtendDocsOptions::from_file(path).context("Failed to load options file")?;
        config.merge(options);
    }

    config.merge(args.options());
    Ok(config)
}

pub async fn execute(args: GenerateArgs) -> Result<i32> {
    let config = build_config(&args)?;

    if !config.node_modules_dir.exists() {
        eprintln!(
            "{} {} not found. Install the packages first or pass --node-modules-dir.",
            style("Error:").red().bold(),
            config.node_modules_dir.display()
        );
        return Ok(1);
    }

    eprintln!(
        "{} Scanning {}",
        style("Extend docs").green().bold(),
        config.packages_dir().display()
    );

    let directives = tokio::task::spawn_blocking(move || generate_extend_docs_config(config))
        .await
        .context("Generator task failed")?
        .context("Failed to generate rename config")?;

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&directives)?,
        OutputFormat::Summary => render_summary(&directives),
    };

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, format!("{}\n", rendered))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Wrote {} directive(s) to {}",
                style("Success:").green().bold(),
                directives.len(),
                path.display()
            );
        }
        None => println!("{}", rendered),
    }

    Ok(0)
}

fn render_summary(directives: &[RenameDirective]) -> String {
    let kind = |d: &RenameDirective| if d.is_tag() { "tag" } else { "variable" };

    let from_width = directives
        .iter()
        .map(|d| d.rename().from.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut out = String::new();
    out.push_str(&format!("{:<8} {:<from_width$}    {}\n", "Kind", "From", "To", from_width = from_width));

    for directive in directives {
        let rename = directive.rename();
        out.push_str(&format!(
            "{:<8} {:<from_width$} -> {}\n",
            kind(directive),
            rename.from,
            rename.to,
            from_width = from_width
        ));
    }

    let tags = directives.iter().filter(|d| d.is_tag()).count();
    out.push_str(&format!(
        "\n{} directive(s): {} variable, {} tag",
        directives.len(),
        directives.len() - tags,
        tags
    ));
    out
}
