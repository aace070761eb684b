//! WebCSV schema engine.
//!
//! A compact textual schema language describing the shape of a CSV payload,
//! with four core operations:
//!
//! - [`parse_schema`]: description text -> [`Schema`]
//! - [`Schema::validate_records`]: schema x raw bytes -> records or an
//!   aggregated [`ValidationReport`]
//! - [`Schema::print`]: schema -> description text (inverse of the parser)
//! - [`Schema::is_valid`]: structural equivalence between two schemas
//!
//! The engine owns no transport or storage; it consumes and produces plain
//! text and byte buffers only.

mod compare;
mod errors;
mod parser;
mod printer;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaResult, ValidationFailure, ValidationReport};
pub use parser::parse_schema;
pub use types::{ColumnSpec, ColumnType, Schema, DEFAULT_STRING_LENGTH};
pub use validator::{validate_field, ValidateOptions};
