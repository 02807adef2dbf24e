//! `extend-docs` - generate rename configs for white-labeled documentation.

mod commands;

use clap::Parser;
use console::style;

use commands::Commands;

#[derive(Parser, Debug)]
#[command(name = "extend-docs", version, about = "Rename config generator for white-labeled web component docs")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let code = match commands::execute(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            1
        }
    };

    std::process::exit(code);
}
