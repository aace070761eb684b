//! Schema data model.
//!
//! A [`Schema`] describes the shape of a CSV payload: a version tag, a
//! header-presence flag, the field delimiter, and an ordered list of
//! [`ColumnSpec`] definitions. Column order is semantically significant: the
//! field at position `i` of every record is checked against `columns[i]`.
//!
//! Supported column types:
//! - string: bounded by `length` characters
//! - int: 64-bit signed integer
//! - bool: `true`/`false`, case-insensitive
//! - date: calendar date `YYYY-MM-DD`
//! - datetime: RFC 3339 timestamp
//! - decimal: fixed-point number bounded by `precision`, normalized to
//!   exactly `scale` fractional digits
//!
//! Any other type label is kept verbatim as [`ColumnType::Other`]: it is
//! structurally valid but validates nothing (see `validator.rs` for the
//! strict-mode opt-out).

use serde::{Deserialize, Serialize};

/// Default maximum length for a column declared by name only.
pub const DEFAULT_STRING_LENGTH: usize = 4000;

/// Declared type of a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Int,
    Bool,
    Date,
    Datetime,
    Decimal,
    /// Unrecognized type label, kept as parsed (lower-cased). Accepted
    /// syntactically; performs no validation unless strict mode is on.
    Other(String),
}

impl ColumnType {
    /// Maps a lower-cased type label to a `ColumnType`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "string" => ColumnType::String,
            "int" => ColumnType::Int,
            "bool" => ColumnType::Bool,
            "date" => ColumnType::Date,
            "datetime" => ColumnType::Datetime,
            "decimal" => ColumnType::Decimal,
            other => ColumnType::Other(other.to_string()),
        }
    }

    /// Returns the textual label used by the description grammar.
    pub fn label(&self) -> &str {
        match self {
            ColumnType::String => "string",
            ColumnType::Int => "int",
            ColumnType::Bool => "bool",
            ColumnType::Date => "date",
            ColumnType::Datetime => "datetime",
            ColumnType::Decimal => "decimal",
            ColumnType::Other(label) => label,
        }
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Other(String::new())
    }
}

/// One positionally-ordered column definition.
///
/// `length` is meaningful only for string columns, `precision`/`scale` only
/// for decimal columns; the unused parameters stay zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name; may be empty for a positional column with no name.
    pub name: String,
    /// Declared type.
    pub column_type: ColumnType,
    /// Maximum character count (string columns).
    pub length: usize,
    /// Maximum whole-number digit count (decimal columns).
    pub precision: u32,
    /// Exact fractional digit count values are normalized to (decimal columns).
    pub scale: u32,
}

impl ColumnSpec {
    /// String column with an explicit maximum length.
    pub fn string(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::String,
            length,
            ..Default::default()
        }
    }

    /// Column declared by name only: string with the default length.
    pub fn name_only(name: impl Into<String>) -> Self {
        Self::string(name, DEFAULT_STRING_LENGTH)
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Int,
            ..Default::default()
        }
    }

    pub fn bool(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Bool,
            ..Default::default()
        }
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Date,
            ..Default::default()
        }
    }

    pub fn datetime(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Datetime,
            ..Default::default()
        }
    }

    /// Decimal column bounded by `precision` with exactly `scale` fractional
    /// digits.
    pub fn decimal(name: impl Into<String>, precision: u32, scale: u32) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Decimal,
            precision,
            scale,
            ..Default::default()
        }
    }
}

/// Complete schema for a CSV payload.
///
/// Constructed once (by the parser or programmatically) and immutable
/// thereafter; safe to share read-only across threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Opaque version tag, compared case-insensitively.
    pub version: String,
    /// Whether the payload's first row is a header row. Informational: the
    /// validator neither skips nor checks a header.
    pub with_header: bool,
    /// Field separator; an empty value is normalized to `","`.
    pub delimiter: String,
    /// Ordered column definitions.
    pub columns: Vec<ColumnSpec>,
}

impl Schema {
    /// Create a schema. An empty delimiter is normalized to `","`.
    pub fn new(
        version: impl Into<String>,
        with_header: bool,
        delimiter: impl Into<String>,
        columns: Vec<ColumnSpec>,
    ) -> Self {
        let delimiter = delimiter.into();
        Self {
            version: version.into(),
            with_header,
            delimiter: if delimiter.is_empty() {
                ",".to_string()
            } else {
                delimiter
            },
            columns,
        }
    }

    /// The delimiter as a single byte for the CSV reader/writer. Only the
    /// first byte of the delimiter string is significant.
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.bytes().next().unwrap_or(b',')
    }

    /// Finds a column position by name, case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }
}
