use clap::{Parser, Subcommand};
use grimoire::query::SortMode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "grimoire")]
#[command(about = "Command-line spell reference for tabletop sessions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Never touch the network; rely on snapshot and cache only
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List spells, optionally filtered and sorted
    #[command(alias = "ls")]
    List {
        /// Substring match against name and description
        #[arg(short, long)]
        search: Option<String>,

        /// Spell levels to include (0 = cantrip); repeatable
        #[arg(short, long)]
        level: Vec<u8>,

        /// Schools to include; repeatable
        #[arg(long)]
        school: Vec<String>,

        /// Classes to include; repeatable
        #[arg(short, long)]
        class: Vec<String>,

        /// Tags to include; repeatable
        #[arg(short, long)]
        tag: Vec<String>,

        /// Only concentration spells
        #[arg(long)]
        concentration: bool,

        /// Only ritual spells
        #[arg(long)]
        ritual: bool,

        /// Only favorited spells
        #[arg(short, long)]
        favorites: bool,

        /// Require a verbal component
        #[arg(long)]
        verbal: bool,

        /// Require a somatic component
        #[arg(long)]
        somatic: bool,

        /// Require a material component
        #[arg(long)]
        material: bool,

        /// Sort order: name-asc, name-desc, level-asc, level-desc, time-asc
        #[arg(long, default_value = "level-asc")]
        sort: SortMode,
    },

    /// Show the full detail view for one or more spells
    #[command(alias = "v")]
    View {
        /// Spell ids or name fragments
        #[arg(required = true, num_args = 1..)]
        spells: Vec<String>,
    },

    /// Copy a spell's detail block to the clipboard
    #[command(alias = "cp")]
    Copy {
        /// Spell id or name fragment
        spell: String,
    },

    /// Toggle favorite status for one or more spells
    #[command(alias = "f")]
    Fav {
        /// Spell ids or name fragments
        #[arg(required = true, num_args = 1..)]
        spells: Vec<String>,
    },

    /// List a named filter preset
    Preset {
        /// Preset name (social, siege, scouting, journey)
        name: String,

        /// Sort order for the preset listing
        #[arg(long, default_value = "level-asc")]
        sort: SortMode,
    },

    /// Show distinct tags with spell counts
    Tags,

    /// Replace the collection from a JSON document
    Import {
        /// Path to the spell document
        path: PathBuf,
    },

    /// Write the collection to a JSON document
    Export {
        /// Output path (defaults to a timestamped filename)
        path: Option<PathBuf>,
    },

    /// Re-fetch the collection from the remote source
    Refresh,

    /// Manage the offline request cache
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (source-url, cache-name)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Initialize the data directory
    Init,
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Pre-fetch every manifest asset into the current generation
    Install,
    /// Remove stale cache generations
    Activate,
    /// Show the current generation and its entries
    Status,
}
