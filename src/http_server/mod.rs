//! HTTP transport for the WebCSV engine.
//!
//! Thin CRUD glue: every request is gated by the schema engine (parse the
//! supplied Content-Schema header, compare against the reference schema,
//! validate the CSV body) before it touches the record store.

mod config;
mod errors;
mod routes;
mod server;

pub use config::{HttpServerConfig, DEFAULT_SCHEMA};
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use routes::{AppState, CONTENT_SCHEMA_HEADER};
pub use server::HttpServer;
