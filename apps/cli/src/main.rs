//! # Ferrum CLI
//!
//! Structural validation of FHIR R5 resources from the command line.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod logging;

use commands::{TypesCommand, ValidateCommand};

#[derive(Parser, Debug)]
#[command(name = "ferrum")]
#[command(about = "Validate FHIR R5 resources against their structural constraints")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate one or more JSON resource files
    Validate(ValidateCommand),
    /// List the resource types the validator knows
    Types(TypesCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init_logging(cli.verbose) {
        eprintln!("warning: {err:#}");
    }

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether every input passed.
fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Validate(cmd) => cmd.execute(),
        Commands::Types(cmd) => cmd.execute().map(|()| true),
    }
}
