//! CLI module for webcsv
//!
//! Provides command-line interface for:
//! - serve: start the record server
//! - check: one-shot payload validation against a schema
//! - print: echo a schema description's normalized form

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::run;
pub use errors::{CliError, CliResult};
