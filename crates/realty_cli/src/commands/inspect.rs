//! Inspect command implementation.

use realty_core::{Config, Estate, EstateStats};
use std::path::Path;

/// Runs the inspect command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let journal = path.join(&config.journal_file_name);
    if !journal.exists() {
        return Err(format!("No store found at {}", path.display()).into());
    }

    let estate = Estate::open(path, config)?;
    let stats = estate.stats()?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
        _ => print_text_output(path, &stats),
    }
    Ok(())
}

fn print_text_output(path: &Path, stats: &EstateStats) {
    println!("Store: {}", path.display());
    println!();
    println!("Journal:");
    println!("  Size:                   {} bytes", stats.journal.size_bytes);
    println!("  Records:                {}", stats.journal.records);
    println!("  Committed transactions: {}", stats.journal.committed_transactions);
    println!("  Incomplete tail:        {}", stats.journal.incomplete_transactions);
    println!("  Last sequence:          {}", stats.committed_sequence);
    println!();
    println!("Rows:");
    println!("  Owners:     {}", stats.owners);
    println!("  Properties: {}", stats.properties);
    println!("  Images:     {}", stats.images);
    println!("  Traces:     {}", stats.traces);
}
