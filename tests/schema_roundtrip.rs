//! Schema description round-trip tests
//!
//! For any loaded schema, printing and re-parsing must produce a schema that
//! is structurally equivalent under `is_valid`.

use webcsv::schema::{parse_schema, ColumnSpec, Schema, SchemaError};

fn descriptions() -> Vec<&'static str> {
    vec![
        "ver:1.0,hdr:false,del:,; LastName:string(50),Age:int,Height:decimal(13,3)",
        "ver:2.1,hdr:true,del:|; a:int,b:bool,c:date,d:datetime",
        "ver:x,hdr:false,del:,; A:decimal(1,2),B:string(5)",
        "ver:1.0,hdr:false,del:,; OnlyName",
    ]
}

#[test]
fn test_parse_print_parse_round_trip() {
    for description in descriptions() {
        let schema = parse_schema(description).unwrap();
        let reparsed = parse_schema(&schema.print()).unwrap();

        assert!(
            schema.is_valid(&reparsed),
            "round trip changed schema for {:?}: printed {:?}",
            description,
            schema.print()
        );
        assert!(reparsed.is_valid(&schema));
    }
}

#[test]
fn test_round_trip_of_programmatic_schema() {
    let schema = Schema::new(
        "1.0",
        false,
        ",",
        vec![
            ColumnSpec::string("LastName", 50),
            ColumnSpec::string("FirstName", 50),
            ColumnSpec::string("MiddleName", 50),
            ColumnSpec::int("Age"),
            ColumnSpec::decimal("Height", 13, 3),
            ColumnSpec::decimal("Weight", 13, 3),
            ColumnSpec::bool("Alive"),
            ColumnSpec::date("DateBorn"),
            ColumnSpec::datetime("LastUpdated"),
        ],
    );

    let reparsed = parse_schema(&schema.print()).unwrap();
    assert!(schema.is_valid(&reparsed));
}

#[test]
fn test_round_trip_stable_after_one_pass() {
    // print(parse(print(s))) == print(s): the printed form is a fixed point.
    for description in descriptions() {
        let printed = parse_schema(description).unwrap().print();
        let again = parse_schema(&printed).unwrap().print();
        assert_eq!(printed, again);
    }
}

#[test]
fn test_schemas_differing_only_in_version_case_are_equivalent() {
    let lower = parse_schema("ver:v1.0,hdr:false,del:,; A:int").unwrap();
    let upper = parse_schema("ver:V1.0,hdr:false,del:,; A:int").unwrap();
    assert!(lower.is_valid(&upper));
    assert!(upper.is_valid(&lower));
}

#[test]
fn test_empty_columns_section_is_syntax_error() {
    assert!(matches!(
        parse_schema("ver:1.0,hdr:false,del:,;"),
        Err(SchemaError::NoColumns)
    ));
}
