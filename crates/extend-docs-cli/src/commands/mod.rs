//! Subcommands.

mod generate;
mod inspect;

use anyhow::Result;
use clap::Subcommand;

pub use generate::GenerateArgs;
pub use inspect::InspectArgs;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate rename directives for an installed package tree
    Generate(GenerateArgs),

    /// Show the export map and exports of a single package
    Inspect(InspectArgs),
}

/// Execute a command, returning the process exit code
pub async fn execute(command: Commands) -> Result<i32> {
    match command {
        Commands::Generate(args) => generate::execute(args).await,
        Commands::Inspect(args) => inspect::execute(args).await,
    }
}
