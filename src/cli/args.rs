//! CLI argument definitions using clap
//!
//! Commands:
//! - webcsv serve [--config <path>] [--host H] [--port P] [--schema S] [--strict]
//! - webcsv check (--schema S | --schema-file <path>) <file> [--strict]
//! - webcsv print (--schema S | --schema-file <path>)

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// WebCSV - schema-validated CSV over HTTP
#[derive(Parser, Debug)]
#[command(name = "webcsv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the record server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides the config file)
        #[arg(long)]
        port: Option<u16>,

        /// Reference schema description (overrides the config file)
        #[arg(long)]
        schema: Option<String>,

        /// Reject columns with unrecognized type labels
        #[arg(long)]
        strict: bool,
    },

    /// Validate a CSV file against a schema description
    Check {
        /// Schema description text
        #[arg(long, conflicts_with = "schema_file")]
        schema: Option<String>,

        /// File containing the schema description
        #[arg(long)]
        schema_file: Option<PathBuf>,

        /// Reject columns with unrecognized type labels
        #[arg(long)]
        strict: bool,

        /// CSV payload to validate
        file: PathBuf,
    },

    /// Parse a schema description and echo its normalized form
    Print {
        /// Schema description text
        #[arg(long, conflicts_with = "schema_file")]
        schema: Option<String>,

        /// File containing the schema description
        #[arg(long)]
        schema_file: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
