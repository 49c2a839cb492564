//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cinedb")]
#[command(about = "Query and maintain a movie catalog", long_about = None)]
pub(crate) struct Cli {
    /// Path to the catalog database (overrides settings and CINEDB_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create the database and load the bootstrap source into an empty catalog
    Init {
        /// Tab-separated source file (header row first)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Answer a catalog question (run `cinedb patterns` for the supported shapes)
    Search {
        /// The question, e.g. "Elenca i film del 1999"
        question: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add or update a single record: title,director,age,year,genre[,platform[,platform]]
    Add {
        /// The raw record line
        line: String,

        /// Field delimiter (overrides settings and CINEDB_DELIMITER)
        #[arg(short, long)]
        delimiter: Option<char>,
    },

    /// Show every table and its columns
    Schema {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show row counts for the catalog tables
    Stats,

    /// Delete every row from the catalog
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        confirm: bool,
    },

    /// List the supported questions
    Patterns,

    /// Inspect settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings and their sources
    Show,

    /// Print the settings file path
    Path,
}
