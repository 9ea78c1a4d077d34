//! Realty CLI
//!
//! Command-line tools over a file-backed listing store.
//!
//! # Commands
//!
//! - `seed` - Load owners and properties from a JSON file
//! - `search` - Run a property search
//! - `history` - Show the trace history of a property
//! - `inspect` - Display journal and row statistics

mod commands;

use clap::{Parser, Subcommand};
use realty_core::{Config, Estate};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Realty command-line listing tools.
#[derive(Parser)]
#[command(name = "realty")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the store directory
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load owners and properties from a JSON file
    Seed {
        /// JSON file with `owners` and `properties` arrays
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Search active properties
    Search {
        /// Free-text term matched against name, address, description and code
        #[arg(short, long)]
        text: Option<String>,

        /// City substring
        #[arg(long)]
        city: Option<String>,

        /// Minimum price
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Maximum price
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Sort key (name, price, year, createdAt, updatedAt, city, bedrooms, bathrooms, squareFeet)
        #[arg(long, default_value = "createdAt")]
        sort: String,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,

        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: u32,

        /// Page size
        #[arg(long, default_value = "10")]
        size: u32,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the trace history of a property
    History {
        /// Internal listing code
        #[arg(short, long)]
        code: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Display journal and row statistics
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn open(path: Option<&Path>, command: &str) -> Result<Estate, Box<dyn std::error::Error>> {
    let path = path.ok_or_else(|| format!("Store path required for {command}"))?;
    Ok(Estate::open(path, Config::default())?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Seed { file } => {
            let estate = open(cli.path.as_deref(), "seed")?;
            let report = commands::seed::run(&estate, &file)?;
            println!(
                "Seeded {} owners and {} properties",
                report.owners, report.properties
            );
        }
        Commands::Search {
            text,
            city,
            min_price,
            max_price,
            sort,
            asc,
            page,
            size,
            format,
        } => {
            let estate = open(cli.path.as_deref(), "search")?;
            let args = commands::search::SearchArgs {
                text,
                city,
                min_price,
                max_price,
                sort,
                ascending: asc,
                page,
                size,
            };
            commands::search::run(&estate, &args, &format)?;
        }
        Commands::History { code, format } => {
            let estate = open(cli.path.as_deref(), "history")?;
            commands::history::run(&estate, &code, &format)?;
        }
        Commands::Inspect { format } => {
            let path = cli.path.ok_or("Store path required for inspect")?;
            commands::inspect::run(&path, &format)?;
        }
        Commands::Version => {
            println!("Realty CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Realty Core v{}", realty_core::VERSION);
        }
    }

    Ok(())
}
