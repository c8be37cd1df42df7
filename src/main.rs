//! namematch server & CLI
//!
//! Dual-mode application:
//! - Server Mode (default): HTTP API for recording and searching person names
//! - CLI Mode: Command-line access to the same tools
//!
//! Matching tolerates the spelling drift, transliteration variance and
//! phonetic similarity common to romanized Hindi/Indian names.

mod auth;
mod cli;
mod config;
mod error;
mod matching;
mod records;
mod server;
mod tools;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Settings;
use error::AppError;
use records::RecordStore;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Detect mode: CLI if args present, server otherwise
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        run_cli_mode().await
    } else {
        run_server_mode().await
    }
}

/// Run in CLI mode
async fn run_cli_mode() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let mut settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            let err = AppError::ConfigError(format!("{:#}", e));
            eprintln!("Error: {}", err);
            std::process::exit(err.exit_code());
        }
    };
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }

    let command = match cli.command {
        Some(command) => command,
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    if let Commands::Serve(args) = command {
        if let Some(bind) = args.bind {
            settings.bind = bind;
        }
        return server::serve(settings).await;
    }

    match execute_command(command, &settings) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Execute a one-shot command against the data directory
fn execute_command(command: Commands, settings: &Settings) -> Result<String, AppError> {
    let store = || RecordStore::open(&settings.data_dir).map_err(AppError::from);

    match command {
        Commands::Setup => {
            let users = auth::UserDirectory::new(&settings.data_dir, settings.password_hash_cost);
            tools::records::execute_setup(&users)
        }
        Commands::Search(args) => tools::search::execute_search(&store()?, settings, args),
        Commands::Standardize(args) => tools::names::execute_standardize(args),
        Commands::Compare(args) => tools::names::execute_compare(args),
        Commands::Add(args) => tools::records::execute_add(&store()?, args),
        Commands::Delete(args) => tools::records::execute_delete(&store()?, args),
        Commands::List => tools::records::execute_list(&store()?),
        Commands::Stats => tools::records::execute_stats(&store()?),
        Commands::Restandardize => tools::records::execute_restandardize(&store()?),
        Commands::Serve(_) => Err(AppError::InvalidInput(
            "serve is handled before dispatch".to_string(),
        )),
    }
}

/// Run in server mode
async fn run_server_mode() -> Result<()> {
    // RUST_LOG wins, info otherwise
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting namematch server");

    let settings = Settings::load()?;
    server::serve(settings).await
}
