//! webcsv - a compact textual schema language for CSV payloads
//!
//! The schema engine lives in [`schema`]; everything else is thin glue:
//! an in-memory record store, an axum CRUD transport, and a clap CLI.

pub mod cli;
pub mod http_server;
pub mod schema;
pub mod store;
