use std::process::ExitCode;

use clap::Parser;
use datanode::constants::DEFAULT_LOG_DIRECTIVE;
use tracing_subscriber::{EnvFilter, filter::Directive};

mod cli;
mod commands;
mod document;
mod output;

use cli::{Cli, Commands};
use commands::{read, write};

fn main() -> ExitCode {
    // Initialize tracing
    let directive = match DEFAULT_LOG_DIRECTIVE.parse::<Directive>() {
        Ok(directive) => directive,
        Err(e) => {
            eprintln!("Invalid log directive: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

/// Dispatch the subcommand. `Ok(false)` means the command ran but found
/// nothing or was refused.
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let mut node = document::load(&cli.file)?;
    let format = cli.format;

    let (success, modified) = match &cli.command {
        Commands::Get(args) => (read::get(&node, args, format)?, false),
        Commands::Has(args) => {
            read::has(&node, args, format)?;
            (true, false)
        }
        Commands::Ls(args) => {
            read::ls(&node, args, format)?;
            (true, false)
        }
        Commands::Simplify => {
            read::simplify(&node, format)?;
            (true, false)
        }
        Commands::Put(args) => {
            let stored = write::put(&mut node, args, format)?;
            (stored, stored)
        }
        Commands::Append(args) => {
            let stored = write::append(&mut node, args, format)?;
            (stored, stored)
        }
        Commands::Remove(args) => {
            let stored = write::remove(&mut node, args, format)?;
            (stored, stored)
        }
        Commands::Clear => {
            write::clear(&mut node, format)?;
            (true, true)
        }
    };

    if modified {
        document::save(&cli.file, &node)?;
        tracing::info!(file = %cli.file.display(), "Document saved");
    }

    Ok(success)
}
