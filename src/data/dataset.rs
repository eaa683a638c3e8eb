//! Dataset: a fully materialized, timestamped table.
//!
//! Column 0 of the source table is the time axis; every other column is a
//! channel whose native type is inferred while loading. Tables come from CSV
//! text or from the first worksheet of an Excel workbook.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use calamine::{Data, Reader};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::LoadError;

/// Native values of a single channel column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Bool(Vec<bool>),
    /// Empty cells are stored as `NaN`.
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Bool(v) => v.len(),
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct values in the column (`NaN`s count as one value).
    pub fn distinct_count(&self) -> usize {
        match self {
            ColumnValues::Bool(v) => {
                let has_true = v.iter().any(|b| *b);
                let has_false = v.iter().any(|b| !*b);
                has_true as usize + has_false as usize
            }
            ColumnValues::Numeric(v) => v
                .iter()
                .map(|x| if x.is_nan() { u64::MAX } else { x.to_bits() })
                .collect::<HashSet<_>>()
                .len(),
            ColumnValues::Text(v) => v.iter().collect::<HashSet<_>>().len(),
        }
    }
}

/// A named channel column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.values, ColumnValues::Numeric(_))
    }
}

/// Timestamped rows: a time axis (seconds since the UNIX epoch) plus channels.
///
/// Times are expected to be monotonic but are not required to be strictly
/// increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    time_name: String,
    times: Vec<f64>,
    columns: Vec<Column>,
}

impl Dataset {
    /// Build a dataset from already parsed parts, checking row counts.
    pub fn from_parts(
        time_name: impl Into<String>,
        times: Vec<f64>,
        columns: Vec<Column>,
    ) -> Result<Self, LoadError> {
        let time_name = time_name.into();
        if times.is_empty() {
            return Err(LoadError::EmptyDataset);
        }
        if let Some((row, t)) = times.iter().enumerate().find(|(_, t)| !t.is_finite()) {
            return Err(LoadError::InvalidTimeColumn {
                column: time_name,
                row,
                value: t.to_string(),
            });
        }
        for col in &columns {
            if col.values.len() != times.len() {
                return Err(LoadError::ColumnLength {
                    column: col.name.clone(),
                    expected: times.len(),
                    found: col.values.len(),
                });
            }
        }
        Ok(Self {
            time_name,
            times,
            columns,
        })
    }

    /// Load a data file, picking the reader from the extension: Excel
    /// workbooks (`xls`, `xlsx`, `xlsm`, `xlsb`, `ods`) or CSV for anything else.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if is_workbook(path) {
            Self::from_excel_path(path)
        } else {
            Self::from_csv_path(path)
        }
    }

    /// Load a CSV file whose first column holds timestamps.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Parse CSV text with a header row. Column 0 is the time axis.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in rdr.records() {
            let record = record?;
            for (i, field) in record.iter().enumerate() {
                cells[i].push(field.to_string());
            }
        }
        log::debug!("read {} CSV rows", cells.first().map_or(0, Vec::len));
        Self::from_cells(headers, cells)
    }

    /// Load the first worksheet of an Excel workbook. Row 0 holds the headers.
    ///
    /// Native boolean cells become `true`/`false`, date cells become UNIX
    /// seconds, so both go through the same inference as CSV text.
    pub fn from_excel_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let mut workbook = calamine::open_workbook_auto(path.as_ref())?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoadError::MissingWorksheet)??;

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Err(LoadError::MissingTimeColumn);
        };
        let headers: Vec<String> = header.iter().map(cell_text).collect();
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for row in rows {
            for (i, column) in cells.iter_mut().enumerate() {
                column.push(row.get(i).map(cell_text).unwrap_or_default());
            }
        }
        log::debug!("read {} worksheet rows", cells.first().map_or(0, Vec::len));
        Self::from_cells(headers, cells)
    }

    /// Shared tail of every reader: parse column 0 as time, infer the rest.
    fn from_cells(headers: Vec<String>, cells: Vec<Vec<String>>) -> Result<Self, LoadError> {
        let Some(time_name) = headers.first().cloned() else {
            return Err(LoadError::MissingTimeColumn);
        };
        let Some(raw_times) = cells.first() else {
            return Err(LoadError::MissingTimeColumn);
        };
        if raw_times.is_empty() {
            return Err(LoadError::EmptyDataset);
        }

        let mut times = Vec::with_capacity(raw_times.len());
        for (row, raw) in raw_times.iter().enumerate() {
            match parse_time(raw) {
                Some(t) => times.push(t),
                None => {
                    return Err(LoadError::InvalidTimeColumn {
                        column: time_name,
                        row,
                        value: raw.clone(),
                    })
                }
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .skip(1)
            .map(|(name, raw)| Column::new(name, infer_values(raw)))
            .collect();
        Self::from_parts(time_name, times, columns)
    }

    pub fn time_name(&self) -> &str {
        &self.time_name
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

const TIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

/// Parse a timestamp cell into seconds since the UNIX epoch.
///
/// Accepts RFC 3339, a handful of naive date-time layouts (read as UTC),
/// a bare date, or a plain number of seconds.
pub fn parse_time(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(seconds_of(dt.naive_utc()));
    }
    for fmt in TIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(seconds_of(ndt));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(seconds_of(date.and_hms_opt(0, 0, 0)?));
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn seconds_of(ndt: NaiveDateTime) -> f64 {
    let utc = ndt.and_utc();
    utc.timestamp() as f64 + utc.timestamp_subsec_nanos() as f64 * 1e-9
}

/// Days between the Excel epoch (1899-12-30) and the UNIX epoch.
const EXCEL_UNIX_EPOCH_DAYS: f64 = 25_569.0;

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xls", "xlsx", "xlsm", "xlsb", "ods"];

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| WORKBOOK_EXTENSIONS.iter().any(|w| e.eq_ignore_ascii_case(w)))
}

/// Text form of a worksheet cell, in the vocabulary [`infer_values`] and
/// [`parse_time`] understand.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Bool(b) => b.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::DateTime(dt) => ((dt.as_f64() - EXCEL_UNIX_EPOCH_DAYS) * 86_400.0).to_string(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Error(e) => e.to_string(),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Infer the native column type from raw cells: boolean, numeric, or text.
fn infer_values(raw: Vec<String>) -> ColumnValues {
    let filled: Vec<&str> = raw
        .iter()
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    if filled.is_empty() {
        return ColumnValues::Text(raw);
    }
    if filled.len() == raw.len() && filled.iter().all(|s| parse_bool(s).is_some()) {
        return ColumnValues::Bool(raw.iter().map(|s| parse_bool(s) == Some(true)).collect());
    }
    if filled.iter().all(|s| s.parse::<f64>().is_ok()) {
        return ColumnValues::Numeric(
            raw.iter()
                .map(|s| s.parse::<f64>().unwrap_or(f64::NAN))
                .collect(),
        );
    }
    ColumnValues::Text(raw)
}
