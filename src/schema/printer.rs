//! Schema printer: serializes a [`Schema`] back into description text.
//!
//! Inverse of the parser: `parse_schema(schema.print())` yields a schema that
//! is `is_valid`-equivalent to the original.

use std::fmt::Write;

use super::types::{ColumnType, Schema};

impl Schema {
    /// Renders the schema in the description grammar:
    /// `ver:<v>,hdr:<bool>,del:<d>; <col1>,<col2>,...`
    ///
    /// A column renders as `name:type` (just `type` when the name is empty),
    /// with `(length)` appended for string columns and `(precision,scale)`
    /// for decimal columns.
    pub fn print(&self) -> String {
        let mut out = format!(
            "ver:{},hdr:{},del:{}; ",
            self.version, self.with_header, self.delimiter
        );

        let mut separator = "";
        for column in &self.columns {
            out.push_str(separator);

            if !column.name.is_empty() {
                out.push_str(&column.name);
                out.push(':');
            }
            out.push_str(column.column_type.label());

            match column.column_type {
                ColumnType::String => {
                    let _ = write!(out, "({})", column.length);
                }
                ColumnType::Decimal => {
                    let _ = write!(out, "({},{})", column.precision, column.scale);
                }
                _ => {}
            }

            separator = ",";
        }

        out
    }
}
