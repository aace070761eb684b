//! Field and payload validation.
//!
//! Validation semantics:
//! - every field of every record is checked against the column at the same
//!   position (field `i` against `columns[i]`)
//! - a record whose field count differs from the declared column count is
//!   rejected outright, its fields are not inspected
//! - all failures within a record are collected; once a record has produced
//!   at least one failure, later records are not scanned
//! - any failure anywhere rejects the whole payload, there is no partial
//!   acceptance
//!
//! The validators are pure functions over immutable inputs; a parsed
//! [`Schema`] can be shared read-only across threads with no synchronization.

use chrono::{DateTime, NaiveDate};
use csv::ReaderBuilder;

use super::errors::{SchemaError, SchemaResult, ValidationReport};
use super::types::{ColumnSpec, ColumnType, Schema};

/// Knobs for payload validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateOptions {
    /// Reject fields whose column carries an unrecognized type label instead
    /// of accepting them unchecked. Off by default: an unknown type is
    /// structurally valid and semantically inert.
    pub strict_types: bool,
}

impl Schema {
    /// Decodes `payload` as CSV and validates every field against this
    /// schema, returning the records in file order.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::Decode`] when the payload is not structurally valid
    ///   CSV (distinct from field validation)
    /// - [`SchemaError::Validation`] carrying the aggregated failure report
    pub fn validate_records(&self, payload: &[u8]) -> SchemaResult<Vec<Vec<String>>> {
        self.validate_records_with(payload, ValidateOptions::default())
    }

    /// Same as [`Schema::validate_records`] with explicit options.
    pub fn validate_records_with(
        &self,
        payload: &[u8],
        options: ValidateOptions,
    ) -> SchemaResult<Vec<Vec<String>>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter_byte())
            .from_reader(payload);

        let mut records: Vec<Vec<String>> = Vec::new();
        for result in reader.records() {
            let record = result?;
            records.push(record.iter().map(str::to_string).collect());
        }

        let mut report = ValidationReport::new();

        for (index, record) in records.iter().enumerate() {
            let line = index + 1;

            if record.len() != self.columns.len() {
                let column = record.len().min(self.columns.len());
                report.push(
                    line,
                    column,
                    format!(
                        "does not line up with the schema (record has {} fields, schema defines {} columns)",
                        record.len(),
                        self.columns.len()
                    ),
                );
            } else {
                for (column_index, value) in record.iter().enumerate() {
                    if let Err(reason) =
                        validate_field(value, &self.columns[column_index], options)
                    {
                        report.push(line, column_index, reason);
                    }
                }
            }

            // All-or-nothing: one failing record rejects the payload, so
            // later records are not worth scanning.
            if !report.is_empty() {
                break;
            }
        }

        if report.is_empty() {
            Ok(records)
        } else {
            Err(SchemaError::Validation(report))
        }
    }
}

/// Validates a single textual field value against its column definition.
///
/// Returns the failure reason on rejection. Pure function, no shared state.
pub fn validate_field(
    value: &str,
    column: &ColumnSpec,
    options: ValidateOptions,
) -> Result<(), String> {
    match &column.column_type {
        ColumnType::String => {
            if value.chars().count() > column.length {
                return Err(format!(
                    "exceeds specified column length of {}",
                    column.length
                ));
            }
            Ok(())
        }
        ColumnType::Int => value
            .parse::<i64>()
            .map(|_| ())
            .map_err(|e| format!("could not be converted to integer: {}", e)),
        ColumnType::Bool => {
            if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
                Ok(())
            } else {
                Err("could not be converted to boolean".to_string())
            }
        }
        ColumnType::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|_| ())
            .map_err(|e| format!("could not be converted to date: {}", e)),
        ColumnType::Datetime => DateTime::parse_from_rfc3339(value)
            .map(|_| ())
            .map_err(|e| format!("could not be converted to datetime: {}", e)),
        ColumnType::Decimal => validate_decimal(value, column),
        ColumnType::Other(label) => {
            if options.strict_types {
                Err(format!("has unrecognized type '{}'", label))
            } else {
                // Unrecognized types validate nothing.
                Ok(())
            }
        }
    }
}

/// Decimal check with precision/scale normalization.
///
/// A whole number gets `scale` synthesized zero digits and its length is
/// bounded by `precision - scale`. A value with a decimal point has its
/// fraction truncated or zero-padded to exactly `scale` digits (truncation is
/// lossy but not an error), the fraction must parse as an integer, and the
/// whole part is bounded by `precision`. The reconstructed value must still
/// parse as a number.
fn validate_decimal(value: &str, column: &ColumnSpec) -> Result<(), String> {
    let precision = i64::from(column.precision);
    let scale = column.scale as usize;

    let normalized = match value.find('.') {
        None => {
            if value.chars().count() as i64 > precision - scale as i64 {
                return Err("is not a valid decimal scale as specified by the schema".to_string());
            }
            format!("{}.{}", value, "0".repeat(scale))
        }
        Some(pos) => {
            let whole = &value[..pos];
            let raw_fraction = &value[pos + 1..];

            let mut fraction: String = raw_fraction.chars().take(scale).collect();
            while fraction.chars().count() < scale {
                fraction.push('0');
            }

            if fraction.parse::<i64>().is_err() {
                return Err(
                    "contains an invalid decimal scale as specified by the schema".to_string()
                );
            }

            if whole.chars().count() as i64 > precision {
                return Err(
                    "exceeds the whole number length as specified by the schema".to_string()
                );
            }

            format!("{}.{}", whole, fraction)
        }
    };

    normalized
        .parse::<f64>()
        .map(|_| ())
        .map_err(|e| format!("could not be converted to decimal: {}", e))
}
