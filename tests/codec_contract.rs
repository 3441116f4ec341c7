use chrono::{TimeZone, Utc};
use csvcodectool::{
    export_table, export_table_bytes, import_table, import_table_bytes, CsvCodecError,
    CsvErrorType, Delimiter, FieldValue, ImportOptions, Table, TableImporter,
};

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn round_trip_preserves_cells() {
    let table = Table::new(
        names(&["name", "score", "active", "note"]),
        vec![
            vec![
                FieldValue::from("Ann"),
                FieldValue::Number(12.5),
                FieldValue::Boolean(true),
                FieldValue::Null,
            ],
            vec![
                FieldValue::from("Bob, Jr."),
                FieldValue::Number(-3.0),
                FieldValue::Boolean(false),
                FieldValue::from("line1\nline2"),
            ],
            vec![
                FieldValue::from(r#"The "big" dog"#),
                FieldValue::Number(0.0),
                FieldValue::Null,
                FieldValue::from("tab\there"),
            ],
        ],
    );

    for delimiter in [Delimiter::Comma, Delimiter::Tab] {
        let text = export_table(&table, true, delimiter).unwrap();
        let back = import_table(&text, true).unwrap();
        assert_eq!(back, table, "delimiter {}", delimiter);
    }
}

#[test]
fn round_trip_bytes() {
    let table = Table::new(
        names(&["città", "größe"]),
        vec![vec![FieldValue::from("Köln"), FieldValue::Number(1e6)]],
    );
    let bytes = export_table_bytes(&table, true, Delimiter::Comma).unwrap();
    assert!(!bytes.starts_with(&[0xEF, 0xBB, 0xBF]));
    assert_eq!(import_table_bytes(&bytes, true).unwrap(), table);
}

#[test]
fn round_trip_timestamp() {
    let ts = Utc.with_ymd_and_hms(2023, 6, 30, 23, 59, 58).unwrap();
    let table = Table::new(names(&["when", "id"]), vec![vec![ts.into(), 7.0.into()]]);
    let text = export_table(&table, true, Delimiter::Comma).unwrap();
    assert_eq!(text, "when,id\r\n2023-06-30T23:59:58.000Z,7\r\n");
    assert_eq!(import_table(&text, true).unwrap(), table);
}

#[test]
fn quoted_cell_renders_and_reparses() {
    let table = Table::new(names(&["q"]), vec![vec![r#"The "big" dog"#.into()]]);
    let text = export_table(&table, false, Delimiter::Comma).unwrap();
    assert_eq!(text, "\"The \"\"big\"\" dog\"\r\n");

    let back = import_table(&text, false).unwrap();
    assert_eq!(back.rows[0][0], FieldValue::from(r#"The "big" dog"#));
}

#[test]
fn embedded_newline_is_one_field() {
    let table = import_table("a,b\r\n\"line1\nline2\",x\r\n", true).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows[0][0], FieldValue::from("line1\nline2"));
}

#[test]
fn render_scenario() {
    let table = Table::new(
        names(&["one", "two"]),
        vec![vec!["a".into(), "b".into()], vec!["c".into(), "d".into()]],
    );
    assert_eq!(
        export_table(&table, true, Delimiter::Comma).unwrap(),
        "one,two\r\na,b\r\nc,d\r\n"
    );
}

#[test]
fn parse_scenarios() {
    let table = import_table("field1,field2\nvalue1,value2", true).unwrap();
    assert_eq!(table.field_names, names(&["field1", "field2"]));
    assert_eq!(table.rows, vec![vec!["value1".into(), "value2".into()]]);

    let table = import_table("value1,value2", false).unwrap();
    assert_eq!(table.field_names, names(&["A", "B"]));
    assert_eq!(table.rows, vec![vec!["value1".into(), "value2".into()]]);
}

#[test]
fn coercion_examples() {
    let text = "a,b,c,d,e,f,g\ntrue,TRUE,123,123.45,\"123\",2020-01-15T10:30:00Z,453x";
    let table = import_table(text, true).unwrap();
    assert_eq!(
        table.rows[0],
        vec![
            FieldValue::Boolean(true),
            FieldValue::Boolean(true),
            FieldValue::Number(123.0),
            FieldValue::Number(123.45),
            FieldValue::from("123"),
            FieldValue::Timestamp(Utc.with_ymd_and_hms(2020, 1, 15, 10, 30, 0).unwrap()),
            FieldValue::from("453x"),
        ]
    );
}

#[test]
fn short_row_past_sample_is_field_count_mismatch() {
    let mut text = String::from("x\ty\n");
    for i in 0..15 {
        text.push_str(&format!("{}\t{}\n", i, i));
    }
    text.push_str("only-one\n");

    let err = import_table(&text, true).unwrap_err();
    assert_eq!(err.error_type(), CsvErrorType::FieldCountMismatch);
    assert_eq!(err.row(), Some(17));
}

#[test]
fn error_kinds() {
    assert_eq!(
        import_table("   ", true).unwrap_err().error_type(),
        CsvErrorType::NoData
    );
    assert_eq!(
        import_table("a,b\tc\nd", true).unwrap_err().error_type(),
        CsvErrorType::UnstructuredData
    );

    let long = "h".repeat(256);
    assert!(matches!(
        import_table(&format!("{},b\n1,2", long), true),
        Err(CsvCodecError::UnstructuredData(_))
    ));
}

#[test]
fn detection_respects_options() {
    let importer = TableImporter::new(ImportOptions::new(true).with_confidence_rows(2));
    let outcome = importer
        .import_text_detailed("a,b,c\n1,2,3\n4,5,6\n7,8,9")
        .unwrap();
    assert_eq!(outcome.delimiter, Delimiter::Comma);
    assert_eq!(outcome.table.column_count(), 3);
    assert_eq!(outcome.table.len(), 3);
}
