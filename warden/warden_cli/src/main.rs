use clap::{Parser, Subcommand};
use std::process;
use tracing_subscriber::EnvFilter;

mod commands;
mod ruleset;

use commands::{execute_check, execute_inspect, CheckArgs, InspectArgs};

/// Warden Command Line Interface
///
/// Checks authorization questions against a declarative rule file.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Log every decision (overridden by WARDEN_LOG)
    #[clap(long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether a user may perform a verb on a verb object
    Check(CheckArgs),

    /// List the names, verbs and policies a rule file registers
    Inspect(InspectArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("WARDEN_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Check(args) => execute_check(args).map(|_| ()),
        Commands::Inspect(args) => execute_inspect(args),
    };

    if let Err(error) = result {
        eprintln!("error: {:#}", error);
        process::exit(1);
    }
}
