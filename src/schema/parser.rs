//! Schema description parser.
//!
//! Grammar: `properties ';' columns`
//! - `properties`: comma-separated `key:value` pairs; recognized keys are
//!   `ver` (version), `hdr` (header flag) and `del` (delimiter). Unknown keys
//!   are ignored.
//! - `columns`: comma-separated `name:type(param)` entries. A comma inside a
//!   `(...)` parameter list (precision/scale of a decimal) is NOT a column
//!   separator.
//!
//! The parenthesized comma is handled by a masking pre-pass: a single scan
//! tracks the most recent `(`, `)` and `,` positions and rewrites a comma
//! lying strictly between an open paren and the next close paren to a `;`
//! sentinel. The sentinel is safe because the section split already consumed
//! every structural `;`. The flat comma-split that follows then segments
//! columns correctly, and the parameter tail is split back on the sentinel to
//! recover precision and scale. The most-recent tracking is deliberate:
//! nested parameter lists are not a supported case.
//!
//! Parameter integers that fail to parse become 0 rather than an error.
//! Tolerant by contract: bad parameters only affect constraint strictness,
//! never which columns exist.

use super::errors::{SchemaError, SchemaResult};
use super::types::{ColumnSpec, ColumnType, Schema};

/// Sentinel standing in for a masked parenthesis-interior comma.
const MASK: char = ';';

/// Parses a schema description string.
///
/// Fails with [`SchemaError::NoColumns`] when the description has no columns
/// section or the section defines no recognizable column.
pub fn parse_schema(raw: &str) -> SchemaResult<Schema> {
    let (properties, columns_section) = raw.split_once(';').ok_or(SchemaError::NoColumns)?;

    let mut version = String::new();
    let mut with_header = false;
    let mut delimiter = String::new();

    for prop in properties.split(',') {
        let kv: Vec<&str> = prop.split(':').collect();
        if kv.len() < 2 {
            continue;
        }
        match kv[0].trim() {
            "ver" => version = kv[1].to_string(),
            "hdr" => with_header = parse_bool_lenient(kv[1]),
            "del" => delimiter = kv[1].to_string(),
            _ => {}
        }
    }

    if columns_section.trim().is_empty() {
        return Err(SchemaError::NoColumns);
    }

    let masked = mask_parenthesized_commas(columns_section);

    let mut columns = Vec::new();
    let mut loaded = false;

    for entry in masked.split(',') {
        let parts: Vec<&str> = entry.split(':').collect();
        let name = parts[0].trim();

        match parts.len() {
            // Name-only column: string with the default length.
            1 => {
                columns.push(ColumnSpec::name_only(name));
                loaded = true;
            }
            2 => {
                columns.push(parse_typed_column(name, parts[1]));
                loaded = true;
            }
            // Entries with extra colons occupy a position but define nothing.
            _ => columns.push(ColumnSpec::default()),
        }
    }

    if !loaded {
        return Err(SchemaError::NoColumns);
    }

    Ok(Schema::new(version, with_header, delimiter, columns))
}

/// Parses the `type(param)` half of a `name:type(param)` entry.
fn parse_typed_column(name: &str, type_part: &str) -> ColumnSpec {
    let label = type_part.trim().to_lowercase();

    let mut column = ColumnSpec {
        name: name.to_string(),
        column_type: ColumnType::from_label(&label),
        ..Default::default()
    };

    // Flatten parentheses into a space-separated parameter tail:
    // "decimal(13;3)" -> "decimal 13;3" (the `;` is the masked comma).
    let flattened = label.replace('(', " ").replace(')', "");

    if let Some(pos) = flattened.find(' ') {
        column.column_type = ColumnType::from_label(&flattened[..pos]);
        let params = &flattened[pos + 1..];

        match params.split_once(MASK) {
            // Two parameters: precision and scale.
            Some((precision, scale)) => {
                column.precision = precision.parse().unwrap_or(0);
                column.scale = scale.parse().unwrap_or(0);
            }
            // One parameter: length.
            None => column.length = params.parse().unwrap_or(0),
        }
    }

    column
}

/// Rewrites commas that sit inside a `(...)` pair to the `;` sentinel.
///
/// Tracks the most recent open paren, close paren and comma; when all three
/// have been seen with the comma strictly between the open and close, the
/// comma is masked and the trackers reset.
fn mask_parenthesized_commas(section: &str) -> String {
    let mut chars: Vec<char> = section.chars().collect();
    let mut open: Option<usize> = None;
    let mut close: Option<usize> = None;
    let mut comma: Option<usize> = None;

    for i in 0..chars.len() {
        match chars[i] {
            '(' => open = Some(i),
            ')' => close = Some(i),
            ',' => comma = Some(i),
            _ => {}
        }

        if let (Some(o), Some(cl), Some(cm)) = (open, close, comma) {
            if o < cl && o < cm && cm < cl {
                chars[cm] = MASK;
                open = None;
                close = None;
                comma = None;
            }
        }
    }

    chars.into_iter().collect()
}

/// Boolean property parsing in the tolerant style of the rest of the
/// properties section: anything unrecognized is false.
fn parse_bool_lenient(value: &str) -> bool {
    matches!(value, "1" | "t" | "T" | "TRUE" | "true" | "True")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::DEFAULT_STRING_LENGTH;

    #[test]
    fn test_parse_reference_description() {
        let schema =
            parse_schema("ver:1.0,hdr:false,del:,; LastName:string(50),Age:int,Height:decimal(13,3)")
                .unwrap();

        assert_eq!(schema.version, "1.0");
        assert!(!schema.with_header);
        assert_eq!(schema.delimiter, ",");
        assert_eq!(schema.columns.len(), 3);

        assert_eq!(schema.columns[0], ColumnSpec::string("LastName", 50));
        assert_eq!(schema.columns[1], ColumnSpec::int("Age"));
        assert_eq!(schema.columns[2], ColumnSpec::decimal("Height", 13, 3));
    }

    #[test]
    fn test_masked_comma_not_a_column_separator() {
        let schema = parse_schema("ver:1,hdr:false,del:,; A:decimal(1,2),B:string(5)").unwrap();

        assert_eq!(schema.columns.len(), 2);
        assert_eq!(schema.columns[0], ColumnSpec::decimal("A", 1, 2));
        assert_eq!(schema.columns[1], ColumnSpec::string("B", 5));
    }

    #[test]
    fn test_multiple_decimal_columns_masked_independently() {
        let schema =
            parse_schema("ver:1,hdr:false,del:,; A:decimal(10,2),B:decimal(5,1),C:int").unwrap();

        assert_eq!(schema.columns.len(), 3);
        assert_eq!(schema.columns[0], ColumnSpec::decimal("A", 10, 2));
        assert_eq!(schema.columns[1], ColumnSpec::decimal("B", 5, 1));
        assert_eq!(schema.columns[2], ColumnSpec::int("C"));
    }

    #[test]
    fn test_empty_columns_section_is_error() {
        let err = parse_schema("ver:1.0,hdr:false,del:,;").unwrap_err();
        assert!(matches!(err, SchemaError::NoColumns));
    }

    #[test]
    fn test_missing_section_separator_is_error() {
        let err = parse_schema("ver:1.0,hdr:false").unwrap_err();
        assert!(matches!(err, SchemaError::NoColumns));
    }

    #[test]
    fn test_name_only_column_gets_string_default() {
        let schema = parse_schema("ver:1,hdr:false,del:,; Comment").unwrap();
        assert_eq!(schema.columns.len(), 1);
        assert_eq!(
            schema.columns[0],
            ColumnSpec::string("Comment", DEFAULT_STRING_LENGTH)
        );
    }

    #[test]
    fn test_typed_column_without_params_has_zero_length() {
        // Only a name-only declaration gets the 4000 default.
        let schema = parse_schema("ver:1,hdr:false,del:,; A:string").unwrap();
        assert_eq!(schema.columns[0], ColumnSpec::string("A", 0));
    }

    #[test]
    fn test_bad_parameter_integers_become_zero() {
        let schema = parse_schema("ver:1,hdr:false,del:,; A:string(abc),B:decimal(x,y)").unwrap();
        assert_eq!(schema.columns[0], ColumnSpec::string("A", 0));
        assert_eq!(schema.columns[1], ColumnSpec::decimal("B", 0, 0));
    }

    #[test]
    fn test_unknown_property_keys_ignored() {
        let schema = parse_schema("ver:2.1,hdr:true,mode:fast,del:|; A:int").unwrap();
        assert_eq!(schema.version, "2.1");
        assert!(schema.with_header);
        assert_eq!(schema.delimiter, "|");
    }

    #[test]
    fn test_empty_delimiter_property_defaults_to_comma() {
        let schema = parse_schema("ver:1,hdr:false,del:; A:int").unwrap();
        assert_eq!(schema.delimiter, ",");
    }

    #[test]
    fn test_header_flag_accepts_go_style_booleans() {
        assert!(parse_schema("hdr:true; A:int").unwrap().with_header);
        assert!(parse_schema("hdr:1; A:int").unwrap().with_header);
        assert!(parse_schema("hdr:T; A:int").unwrap().with_header);
        assert!(!parse_schema("hdr:false; A:int").unwrap().with_header);
        assert!(!parse_schema("hdr:yes; A:int").unwrap().with_header);
    }

    #[test]
    fn test_unknown_type_label_kept() {
        let schema = parse_schema("ver:1,hdr:false,del:,; Id:uuid").unwrap();
        assert_eq!(
            schema.columns[0].column_type,
            ColumnType::Other("uuid".to_string())
        );
    }

    #[test]
    fn test_type_label_lowercased() {
        let schema = parse_schema("ver:1,hdr:false,del:,; A:STRING(10),B:Decimal(4,2)").unwrap();
        assert_eq!(schema.columns[0], ColumnSpec::string("A", 10));
        assert_eq!(schema.columns[1], ColumnSpec::decimal("B", 4, 2));
    }

    #[test]
    fn test_entry_with_extra_colons_is_inert() {
        let schema = parse_schema("ver:1,hdr:false,del:,; A:int,b:ad:colons,C:int").unwrap();
        assert_eq!(schema.columns.len(), 3);
        assert_eq!(schema.columns[1], ColumnSpec::default());
        assert_eq!(schema.columns[2], ColumnSpec::int("C"));
    }

    #[test]
    fn test_column_names_trimmed() {
        let schema = parse_schema("ver:1,hdr:false,del:,;  A :int, B:string(5)").unwrap();
        assert_eq!(schema.columns[0].name, "A");
        assert_eq!(schema.columns[1].name, "B");
    }
}
