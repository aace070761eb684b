//! Error types for the schema engine.
//!
//! Error kinds:
//! - `NoColumns`: the description text declares no columns (syntax error)
//! - `Decode`: the payload is not structurally valid CSV
//! - `Validation`: one or more field values violate the schema
//!
//! Schema incompatibility (a candidate schema rejected by `Schema::is_valid`)
//! is a caller-level decision, not an engine error: the comparator returns a
//! plain `bool` and the transport layer decides what to do with a rejection.

use std::fmt;

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors produced by the schema engine
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The description text contains no column definitions
    #[error("no schema columns defined")]
    NoColumns,

    /// The payload could not be decoded as CSV
    #[error("payload is not valid CSV: {0}")]
    Decode(#[from] csv::Error),

    /// One or more field values failed validation against the schema
    #[error("{0}")]
    Validation(ValidationReport),
}

/// A single field-level validation failure.
///
/// `line` is 1-based (matching how people count CSV lines), `column` is the
/// 0-based positional index into the schema's column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub line: usize,
    pub column: usize,
    pub reason: String,
}

impl ValidationFailure {
    pub fn new(line: usize, column: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            column,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Column {} of line {} {}", self.column, self.line, self.reason)
    }
}

/// Aggregate of every validation failure found in a payload.
///
/// Any entry rejects the whole payload; there is no partial acceptance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for the given (line, column) position.
    pub fn push(&mut self, line: usize, column: usize, reason: impl Into<String>) {
        self.failures.push(ValidationFailure::new(line, column, reason));
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in &self.failures {
            writeln!(f, "{}", failure)?;
        }
        Ok(())
    }
}
