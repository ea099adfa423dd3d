//! Dataset fetch utility: pages the remote spell database, normalizes
//! every record, and writes the result as a JSON document in the same
//! shape the snapshot and import/export use.

use clap::Parser;
use grimoire::config::GrimoireConfig;
use grimoire::error::{GrimoireError, Result};
use grimoire::loader::{fetch_all, HttpSource};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "grimoire-fetch")]
#[command(about = "Fetch the remote spell database into a local dataset file", long_about = None)]
struct Cli {
    /// First page of the paginated remote source
    #[arg(long)]
    url: Option<String>,

    /// Output path for the dataset document
    #[arg(short, long, default_value = "spells.json")]
    out: PathBuf,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let url = cli
        .url
        .unwrap_or_else(|| GrimoireConfig::default().source_url);

    let spells = fetch_all(&HttpSource::new(), &url)?;
    let content = serde_json::to_string_pretty(&spells).map_err(GrimoireError::Serialization)?;
    fs::write(&cli.out, content).map_err(GrimoireError::Io)?;

    println!("Wrote {} spells to {}", spells.len(), cli.out.display());
    Ok(())
}
