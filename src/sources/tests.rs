use super::{SourceKind, TransactionSource};
use super::delimited::{parse_delimited, CsvFileSource};
use super::errors::SourceError;
use super::json_file::{parse_document, JsonFileSource};
use super::spreadsheet::{parse_range, XlsxFileSource};

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use calamine::{Data, Range};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

use crate::models::{normalize_all, RawKey};

fn create_temporary_file(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{contents}")?;
    Ok(file)
}

#[test]
fn test_json_source_reads_an_array_of_records() -> Result<()> {
    let file = create_temporary_file(r#"[
        {"id": 441945886, "state": "EXECUTED", "date": "2019-08-26T10:50:58.294041",
         "operationAmount": {"amount": "31957.58", "currency": {"name": "руб.", "code": "RUB"}},
         "description": "Перевод организации"},
        {"id": 41428829, "state": "EXECUTED", "date": "2019-07-03T18:35:29.512364"}
    ]"#)?;

    let records = JsonFileSource::new(file.path()).read()?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].fields[0], (RawKey::Text("id".to_string()), json!(441945886)));

    let normalized = normalize_all(records);
    assert_eq!(normalized.skipped, 0);
    assert_eq!(normalized.records[0].currency_code()?, "RUB");

    Ok(())
}

#[test]
fn test_json_source_drops_elements_that_are_not_records() -> Result<()> {
    let records = parse_document(json!([{"state": "EXECUTED"}, 42, "text", null, {"state": "PENDING"}]))?;

    assert_eq!(records.len(), 2);

    Ok(())
}

#[test]
fn test_json_source_rejects_documents_that_are_not_arrays() -> Result<()> {
    let file = create_temporary_file(r#"{"state": "EXECUTED"}"#)?;
    let source = JsonFileSource::new(file.path());

    assert!(matches!(source.read(), Err(SourceError::TypeMismatch { found: "an object", .. })));
    assert!(source.load().is_empty());

    Ok(())
}

#[test]
fn test_json_source_degrades_to_empty_on_unreadable_input() -> Result<()> {
    let broken = create_temporary_file("[{\"state\": ")?;
    let broken_source = JsonFileSource::new(broken.path());
    let missing_source = JsonFileSource::new("does/not/exist.json");

    assert!(matches!(broken_source.read(), Err(SourceError::Json(_))));
    assert!(matches!(missing_source.read(), Err(SourceError::Io { .. })));
    assert!(broken_source.load().is_empty());
    assert!(missing_source.load().is_empty());

    Ok(())
}

#[test]
fn test_csv_source_reads_semicolon_delimited_rows() -> Result<()> {
    let file = create_temporary_file(concat!(
        "id;state;date;amount;currency_name;currency_code;from;to;description\n",
        "650703;EXECUTED;2023-09-05T11:30:32Z;16210;Sol;PEN;Счет 58803664561298323391;Счет 39745660563456619397;Перевод организации\n",
        "3598919;EXECUTED;2020-12-06T23:00:58Z;29740;Peso;COP;;Discover 7269000803370165;Перевод с карты на карту\n"
    ))?;

    let records = CsvFileSource::new(file.path()).read()?;
    let normalized = normalize_all(records);

    assert_eq!(normalized.records.len(), 2);
    assert_eq!(normalized.records[0].currency_code()?, "PEN");
    assert_eq!(normalized.records[0].amount()?, "16210");
    assert_eq!(normalized.records[1].get("from"), Some(&Value::Null));
    assert_eq!(normalized.records[1].to_account(), Some("Discover 7269000803370165"));

    Ok(())
}

#[test]
fn test_csv_source_honors_a_custom_delimiter() -> Result<()> {
    let file = create_temporary_file("state,date\nPENDING,2024-01-01\n")?;

    let records = CsvFileSource::new(file.path()).with_delimiter(b',').read()?;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].fields[0], (RawKey::from("state"), json!("PENDING")));

    Ok(())
}

#[test]
fn test_csv_source_fills_short_rows_with_nulls() -> Result<()> {
    let records = parse_delimited("state;date;description\nEXECUTED;2024-01-01\n".as_bytes(), b';')?;

    assert_eq!(records[0].fields.len(), 3);
    assert_eq!(records[0].fields[2], (RawKey::from("description"), Value::Null));

    Ok(())
}

#[test]
fn test_csv_source_missing_file_loads_nothing() {
    let source = CsvFileSource::new("does/not/exist.csv");

    assert!(matches!(source.read(), Err(SourceError::Io { .. })));
    assert!(source.load().is_empty());
}

#[test]
fn test_spreadsheet_rows_keep_header_cell_types() {
    let mut range: Range<Data> = Range::new((0, 0), (2, 3));
    range.set_value((0, 0), Data::String("state".to_string()));
    range.set_value((0, 1), Data::Int(7));
    range.set_value((0, 2), Data::Float(2.5));
    range.set_value((1, 0), Data::String("EXECUTED".to_string()));
    range.set_value((1, 1), Data::Float(16210.5));
    range.set_value((1, 2), Data::Bool(true));

    let records = parse_range(&range);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].fields, vec![
        (RawKey::from("state"), json!("EXECUTED")),
        (RawKey::Integer(7), json!(16210.5)),
        (RawKey::Float(2.5), json!(true)),
        (RawKey::Empty, Value::Null),
    ]);

    let normalized = normalize_all(records);
    assert_eq!(normalized.skipped, 1);
}

#[test]
fn test_spreadsheet_whole_numbers_read_as_integers() -> Result<()> {
    let mut range: Range<Data> = Range::new((0, 0), (1, 3));
    range.set_value((0, 0), Data::String("id".to_string()));
    range.set_value((0, 1), Data::String("amount".to_string()));
    range.set_value((0, 2), Data::String("currency_code".to_string()));
    range.set_value((0, 3), Data::String("rate".to_string()));
    range.set_value((1, 0), Data::Float(650703.0));
    range.set_value((1, 1), Data::Float(16210.0));
    range.set_value((1, 2), Data::String("PEN".to_string()));
    range.set_value((1, 3), Data::Float(-0.25));

    let normalized = normalize_all(parse_range(&range));
    let transaction = &normalized.records[0];

    assert_eq!(transaction.get("id"), Some(&json!(650703)));
    assert_eq!(transaction.get("rate"), Some(&json!(-0.25)));
    assert_eq!(transaction.amount()?, "16210");
    assert_eq!(transaction.currency_code()?, "PEN");

    Ok(())
}

#[test]
fn test_spreadsheet_source_missing_file_loads_nothing() {
    let source = XlsxFileSource::new("does/not/exist.xlsx");

    assert!(source.read().is_err());
    assert!(source.load().is_empty());
}

#[test]
fn test_source_kind_is_inferred_from_extension() {
    assert_eq!(SourceKind::from_path(Path::new("data/operations.json")), Some(SourceKind::Json));
    assert_eq!(SourceKind::from_path(Path::new("export.CSV")), Some(SourceKind::Csv));
    assert_eq!(SourceKind::from_path(Path::new("book.xlsx")), Some(SourceKind::Xlsx));
    assert_eq!(SourceKind::from_path(Path::new("notes.txt")), None);
    assert_eq!(SourceKind::from_path(Path::new("no_extension")), None);
}

#[test]
fn test_source_kind_opens_the_matching_adapter() {
    assert!(SourceKind::Json.open("x.json", None).describe().starts_with("JSON file"));
    assert!(SourceKind::Csv.open("x.csv", Some(b',')).describe().starts_with("CSV file"));
    assert!(SourceKind::Xlsx.open("x.xlsx", None).describe().starts_with("spreadsheet"));
    assert_eq!(SourceKind::Csv.default_path(), Path::new("data/transactions.csv"));
}
