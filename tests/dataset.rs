use std::io::Write;
use std::path::PathBuf;

use cr7_terminal::aggregate::{Dtype, column_info, describe_categorical, unique_counts};
use cr7_terminal::dataset::{Column, Field, GoalRecord, GoalTable, NA_TOKENS, is_missing};
use cr7_terminal::sections::{self, Section};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

#[test]
fn loads_fixture_with_extra_columns() {
    let table = GoalTable::load(&fixture_path("goals_sample.csv")).expect("fixture should load");
    assert_eq!(table.len(), 12);
    assert_eq!(table.columns().len(), 13);
    assert_eq!(table.headers()[0], "Season");
    assert!(table.column_by_name("Matchday").is_some());
    for field in Field::ALL {
        assert!(table.column(field).is_ok(), "{} should exist", field.header());
    }
}

#[test]
fn empty_cells_are_missing() {
    let table = GoalTable::load(&fixture_path("goals_sample.csv")).expect("fixture should load");
    let assists = table.column(Field::GoalAssist).expect("assist column");
    assert_eq!(assists.missing_count(), 5);
    assert_eq!(assists.get(0), None);
    assert_eq!(assists.get(1), Some("Rui Jorge"));

    let minutes = table.column(Field::Minute).expect("minute column");
    assert_eq!(minutes.missing_count(), 1);
    assert_eq!(minutes.get(5), None);
}

#[test]
fn head_shows_missing_as_nan() {
    let table = GoalTable::load(&fixture_path("goals_sample.csv")).expect("fixture should load");
    let head = table.head(5);
    assert_eq!(head.len(), 5);
    assert_eq!(head[0].len(), 13);
    assert_eq!(head[0].last().map(String::as_str), Some("NaN"));
    assert_eq!(head[1][9], "90+2");
    assert_eq!(table.head(100).len(), 12);
}

#[test]
fn missing_file_is_an_error() {
    let err = GoalTable::load(&fixture_path("does_not_exist.csv")).unwrap_err();
    assert!(format!("{err:#}").contains("open goals csv"));
}

#[test]
fn ragged_rows_are_rejected() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "Season,Club,Opponent").unwrap();
    writeln!(file, "11/12,Real Madrid,Sevilla FC").unwrap();
    writeln!(file, "11/12,Real Madrid").unwrap();
    file.flush().unwrap();

    let err = GoalTable::load(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("parse goals csv"));
}

#[test]
fn duplicate_headers_are_rejected() {
    let raw = "Club,Club\nReal Madrid,Real Madrid\n";
    assert!(GoalTable::from_reader(raw.as_bytes()).is_err());
}

#[test]
fn header_only_file_is_an_empty_table() {
    let raw = "Season,Competition,Club\n";
    let table = GoalTable::from_reader(raw.as_bytes()).expect("header only should load");
    assert!(table.is_empty());
    assert_eq!(table.headers(), vec!["Season", "Competition", "Club"]);
}

#[test]
fn unknown_column_names_the_header() {
    let raw = "Season,Club\n11/12,Real Madrid\n";
    let table = GoalTable::from_reader(raw.as_bytes()).expect("should load");
    let err = table.column(Field::Opponent).unwrap_err();
    assert!(err.to_string().contains("Opponent"));
}

#[test]
fn from_records_uses_canonical_headers() {
    let records = vec![GoalRecord {
        season: "11/12".to_string(),
        club: "Real Madrid".to_string(),
        minute: "45+1".to_string(),
        ..GoalRecord::default()
    }];
    let table = GoalTable::from_records(&records);
    assert_eq!(table.len(), 1);
    assert_eq!(table.headers()[9], "Goal_assist");
    assert_eq!(table.column(Field::Club).unwrap().get(0), Some("Real Madrid"));
    assert_eq!(table.column(Field::Opponent).unwrap().get(0), None);
}

#[test]
fn from_columns_checks_lengths() {
    let ok = GoalTable::from_columns(vec![
        Column::new("Club", vec![Some("A".to_string()), None]),
        Column::new("Venue", vec![Some("H".to_string()), Some("A".to_string())]),
    ]);
    assert_eq!(ok.expect("equal lengths").len(), 2);

    let bad = GoalTable::from_columns(vec![
        Column::new("Club", vec![Some("A".to_string())]),
        Column::new("Venue", vec![]),
    ]);
    assert!(bad.is_err());
}

#[test]
fn column_info_infers_dtypes() {
    let table = GoalTable::load(&fixture_path("goals_sample.csv")).expect("fixture should load");
    let info = column_info(&table);
    assert_eq!(info.len(), 13);

    let matchday = info.iter().find(|c| c.name == "Matchday").unwrap();
    assert_eq!(matchday.dtype, Dtype::Int64);
    assert_eq!(matchday.non_null, 12);

    let assist = info.iter().find(|c| c.name == "Goal_assist").unwrap();
    assert_eq!(assist.dtype, Dtype::Object);
    assert_eq!(assist.non_null, 7);

    let gappy = GoalTable::from_columns(vec![Column::new(
        "Matchday",
        vec![Some("3".to_string()), None],
    )])
    .unwrap();
    assert_eq!(column_info(&gappy)[0].dtype, Dtype::Float64);
}

#[test]
fn unique_counts_include_missing_once() {
    let table = GoalTable::load(&fixture_path("goals_sample.csv")).expect("fixture should load");
    let uniques = unique_counts(&table);
    let get = |name: &str| uniques.iter().find(|(n, _)| n == name).map(|(_, n)| *n);
    assert_eq!(get("Club"), Some(5));
    assert_eq!(get("Goal_assist"), Some(6));
    assert_eq!(get("Venue"), Some(2));
}

#[test]
fn describe_covers_text_columns_only() {
    let table = GoalTable::load(&fixture_path("goals_sample.csv")).expect("fixture should load");
    let summary = describe_categorical(&table);
    assert!(summary.iter().all(|s| s.column != "Matchday"));

    let club = summary.iter().find(|s| s.column == "Club").unwrap();
    assert_eq!(club.count, 12);
    assert_eq!(club.unique, 5);
    assert_eq!(club.top.as_deref(), Some("Real Madrid"));
    assert_eq!(club.freq, 5);

    let assist = summary.iter().find(|s| s.column == "Goal_assist").unwrap();
    assert_eq!(assist.count, 7);
    assert_eq!(assist.unique, 5);
    assert_eq!(assist.top.as_deref(), Some("Mesut Ozil"));
}

#[test]
fn invalid_utf8_fails_the_load() {
    let raw: &[u8] = b"Club,Opponent\nReal Madrid,\xff\xfe\n";
    let err = GoalTable::from_reader(raw).unwrap_err();
    assert!(format!("{err:#}").contains("read csv record 1"));
}

#[test]
fn na_tokens_are_missing() {
    for token in NA_TOKENS {
        assert!(is_missing(token), "{token:?} should be missing");
    }
    assert!(is_missing("  NA "));
    assert!(!is_missing("Nani"));
    assert!(!is_missing("na"));

    let raw = "Opponent,Goal_assist,Matchday\nA,NA,3\nA,NA,NaN\nB,Ozil,5\n";
    let table = GoalTable::from_reader(raw.as_bytes()).expect("should load");
    let assists = table.column(Field::GoalAssist).unwrap();
    assert_eq!(assists.missing_count(), 2);

    let view = sections::render(Section::Assists, &table).unwrap();
    let pairs: Vec<(&str, u64)> = view.bar_charts()[0]
        .bars
        .iter()
        .map(|b| (b.value.as_str(), b.count))
        .collect();
    assert_eq!(pairs, vec![("Ozil", 1)]);

    let uniques = unique_counts(&table);
    assert_eq!(uniques[1], ("Goal_assist".to_string(), 2));
    assert_eq!(column_info(&table)[2].dtype, Dtype::Float64);
}
