//! Bangumi metadata CLI
//!
//! Local entry point for looking up book metadata from the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use bangumi_meta::{config, error::Result, models::MetaRecord, pipeline};
use clap::{Parser, Subcommand};

/// bangumi-meta - Book metadata lookup against the Bangumi catalog
#[derive(Parser, Debug)]
#[command(name = "bangumi-meta", version, about = "Book metadata lookup for Bangumi")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "bangumi.toml", global = true)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search by title and print the matching records
    Search {
        /// Free-text title to search for
        query: String,

        /// Print records as JSON instead of one line each
        #[arg(long)]
        json: bool,
    },

    /// Fetch a single subject by its numeric ID
    Subject {
        id: u64,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration
    Validate,

    /// Print the effective configuration (token masked)
    ShowConfig,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_records(records: &[MetaRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
    } else {
        for record in records {
            println!("{}", record.summary_line());
        }
    }
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.exists().then_some(cli.config.as_path());
    if config_path.is_none() {
        log::debug!(
            "No config file at {}, using defaults",
            cli.config.display()
        );
    }

    match cli.command {
        Command::Search { query, json } => {
            let config = Arc::new(config::load(config_path)?);
            let outcome = pipeline::run_search(config, &query).await?;
            print_records(&outcome.records, json)?;
        }

        Command::Subject { id, json } => {
            let config = Arc::new(config::load(config_path)?);
            let record = pipeline::run_lookup(config, id).await?;
            print_records(std::slice::from_ref(&record), json)?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            match config::load(config_path) {
                Ok(_) => log::info!("✓ Config OK"),
                Err(e) => {
                    log::error!("Config validation failed: {}", e);
                    return Err(e);
                }
            }
        }

        Command::ShowConfig => {
            let config = config::load(config_path)?;
            print!("{}", config::to_toml(&config)?);
        }
    }

    Ok(())
}
