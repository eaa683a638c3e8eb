use std::io::Write;

use flagscope::data::dataset::{ColumnValues, Dataset};
use flagscope::error::LoadError;

const CSV: &str = "\
time,Door,Temp,Load %,F-Pump,Note
2024-01-01 00:00:00,false,20.5,10,0,a
2024-01-01 00:00:01,true,21.0,,1,b
2024-01-01 00:00:02,true,21.5,30,1,c
";

#[test]
fn reads_csv_with_time_column_and_inferred_types() {
    let ds = Dataset::from_reader(CSV.as_bytes()).unwrap();
    assert_eq!(ds.time_name(), "time");
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.times()[1] - ds.times()[0], 1.0);
    assert_eq!(ds.times()[0], 1_704_067_200.0);

    assert_eq!(
        ds.column("Door").unwrap().values,
        ColumnValues::Bool(vec![false, true, true])
    );
    match &ds.column("Load %").unwrap().values {
        ColumnValues::Numeric(v) => {
            assert_eq!(v[0], 10.0);
            assert!(v[1].is_nan());
        }
        other => panic!("expected numeric, got {other:?}"),
    }
    assert!(ds.column("F-Pump").unwrap().is_numeric());
    assert!(matches!(
        ds.column("Note").unwrap().values,
        ColumnValues::Text(_)
    ));
}

#[test]
fn header_only_csv_is_empty() {
    let err = Dataset::from_reader("time,a\n".as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::EmptyDataset));
}

#[test]
fn unparseable_time_is_reported_with_its_row() {
    let err = Dataset::from_reader("time,a\n2024-01-01,1\nyesterday,2\n".as_bytes()).unwrap_err();
    match err {
        LoadError::InvalidTimeColumn { column, row, value } => {
            assert_eq!(column, "time");
            assert_eq!(row, 1);
            assert_eq!(value, "yesterday");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn ragged_rows_are_a_csv_error() {
    let err = Dataset::from_reader("time,a\n1,2\n3\n".as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::Csv(_)));
}

#[test]
fn loads_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CSV.as_bytes()).unwrap();
    let ds = Dataset::from_csv_path(file.path()).unwrap();
    assert_eq!(ds.columns().len(), 5);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Dataset::from_csv_path(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

fn write_workbook(path: &std::path::Path) {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in ["Timestamp", "FC", "Voltage", "F-CHARGE", "Health %"]
        .into_iter()
        .enumerate()
    {
        sheet.write_string(0, col as u16, name).unwrap();
    }
    let rows = [
        ("2024-01-01 00:00:00", true, 12.5, 1.0, 90.0),
        ("2024-01-01 00:00:10", false, 12.1, 1.0, 80.0),
        ("2024-01-01 00:00:20", false, 11.7, 0.0, 70.0),
    ];
    for (i, (time, fc, volts, charge, health)) in rows.into_iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, time).unwrap();
        sheet.write_boolean(row, 1, fc).unwrap();
        sheet.write_number(row, 2, volts).unwrap();
        sheet.write_number(row, 3, charge).unwrap();
        sheet.write_number(row, 4, health).unwrap();
    }
    workbook.save(path).unwrap();
}

#[test]
fn reads_the_first_worksheet_of_an_excel_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("battery.xlsx");
    write_workbook(&path);

    let ds = Dataset::from_path(&path).unwrap();
    assert_eq!(ds.time_name(), "Timestamp");
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.times()[0], 1_704_067_200.0);
    assert_eq!(ds.times()[2] - ds.times()[0], 20.0);
    assert_eq!(
        ds.column("FC").unwrap().values,
        ColumnValues::Bool(vec![true, false, false])
    );
    assert_eq!(
        ds.column("Voltage").unwrap().values,
        ColumnValues::Numeric(vec![12.5, 12.1, 11.7])
    );
    assert!(ds.column("F-CHARGE").unwrap().is_numeric());
}

#[test]
fn csv_extension_goes_through_the_csv_reader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");
    std::fs::write(&path, CSV).unwrap();
    assert_eq!(Dataset::from_path(&path).unwrap().len(), 3);
}

#[test]
fn missing_workbook_is_an_excel_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Dataset::from_path(dir.path().join("absent.xls")).unwrap_err();
    assert!(matches!(err, LoadError::Excel(_)));
}
