use std::fs;
use std::path::PathBuf;

use transfer_window::dataset::{
    Coded, LoadError, TransferStatus, TransferType, load_dataset, parse_dataset_json,
};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("fixture file should be readable")
}

#[test]
fn parses_transfers_fixture() {
    let raw = read_fixture("transfers.json");
    let dataset = parse_dataset_json(&raw).expect("fixture should parse");
    assert_eq!(dataset.leagues.len(), 3);
    assert_eq!(dataset.leagues[0].id, "epl");
    assert_eq!(dataset.leagues[0].short_name, "EPL");
    assert_eq!(dataset.transfer_count(), 7);

    let epl = dataset.records("epl");
    assert_eq!(epl.len(), 3);
    assert_eq!(epl[0].player_name, "Marcus Hale");
    assert_eq!(epl[0].from_team, "Brighton");
    assert_eq!(epl[0].age, Some(24));
    assert_eq!(epl[0].status, Coded::Known(TransferStatus::Completed));
    assert_eq!(epl[2].kind, Coded::Known(TransferType::Loan));
}

#[test]
fn missing_optional_fields_load_as_blank() {
    let raw = read_fixture("transfers.json");
    let dataset = parse_dataset_json(&raw).expect("fixture should parse");
    let mensah = &dataset.records("laliga")[1];
    assert_eq!(mensah.player_name, "Koffi Mensah");
    assert_eq!(mensah.age, None);

    let bare = parse_dataset_json(
        r#"{"leagues":[{"id":"x"}],"transfers":{"x":[{"status":"pending","type":"loan"}]}}"#,
    )
    .expect("minimal document should parse");
    assert_eq!(bare.leagues[0].name, "");
    assert_eq!(bare.records("x")[0].player_name, "");
}

#[test]
fn league_without_transfers_entry_has_no_records() {
    let dataset = parse_dataset_json(&read_fixture("transfers.json")).expect("fixture should parse");
    assert!(dataset.league("seriea").is_some());
    assert!(dataset.records("seriea").is_empty());
    // Transfers may exist for ids that are not listed as leagues.
    assert!(dataset.league("mls").is_none());
    assert_eq!(dataset.records("mls").len(), 1);
}

#[test]
fn unknown_status_and_type_keep_raw_text() {
    let dataset =
        parse_dataset_json(&read_fixture("unknown_codes.json")).expect("fixture should parse");
    assert_eq!(dataset.transfer_count(), 3);

    let salazar = &dataset.records("laliga")[0];
    assert_eq!(salazar.status, Coded::Other("confirmed".to_string()));
    assert_eq!(salazar.kind, Coded::Other("free agent".to_string()));
    assert_eq!(salazar.status.known(), None);

    let ferri = &dataset.records("laliga")[1];
    assert_eq!(ferri.status.known(), Some(TransferStatus::Pending));
    assert_eq!(ferri.kind.known(), Some(TransferType::Loan));
}

#[test]
fn non_string_status_is_a_parse_error() {
    let err = parse_dataset_json(
        r#"{"leagues":[],"transfers":{"x":[{"status":3,"type":"loan"}]}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = parse_dataset_json("{\"leagues\": [").unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)));
}

#[test]
fn null_document_is_empty() {
    let dataset = parse_dataset_json("null").expect("null should parse");
    assert!(dataset.leagues.is_empty());
    assert_eq!(dataset.transfer_count(), 0);
}

#[test]
fn loads_fixture_from_disk() {
    let path = fixture_path("transfers.json");
    let dataset = load_dataset(path.to_str().expect("utf-8 path"), 5).expect("fixture should load");
    assert_eq!(dataset.leagues.len(), 3);
}

#[test]
fn bundled_dataset_parses() {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("assets/json/transfers.json");
    let raw = fs::read_to_string(path).expect("bundled dataset should be readable");
    let dataset = parse_dataset_json(&raw).expect("bundled dataset should parse");
    assert!(dataset.league("epl").is_some());
    assert!(!dataset.records("epl").is_empty());
}
