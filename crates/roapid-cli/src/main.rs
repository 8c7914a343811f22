//! roapid CLI
//!
//! Command-line access to snapshot change detection and persistence

use clap::{Parser, Subcommand, ValueEnum};
use roapid_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "roapid")]
#[command(about = "roapid - timestamp-aware JSON snapshot store", long_about = None)]
struct Cli {
    #[command(flatten)]
    store: commands::StoreArgs,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Report whether a payload differs from the stored snapshot
    Check(commands::check::CheckArgs),
    /// Stamp and persist a payload, printing the stored bytes
    Save(commands::save::SaveArgs),
    /// Check, persist and emit a payload in one step
    Sync(commands::sync::SyncArgs),
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = cli.store.resolve().and_then(|config| match cli.command {
        Commands::Check(args) => commands::check::execute(&config, args),
        Commands::Save(args) => commands::save::execute(&config, args),
        Commands::Sync(args) => commands::sync::execute(&config, args),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
