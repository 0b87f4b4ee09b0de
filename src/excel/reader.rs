//! Spreadsheet reader - first worksheet → header-keyed rows

use crate::error::{RosterError, RosterResult};
use crate::types::{CellValue, SheetRow};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Header name given to blank header cells
const EMPTY_HEADER: &str = "__EMPTY";

/// Where the workbook bytes come from
enum WorkbookSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// Rows of the first worksheet, keyed by header text
#[derive(Debug, Clone, Default)]
pub struct SheetData {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
}

impl SheetData {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Reads the first worksheet of a workbook (.xlsx, .xlsm, .xlsb, .xls, .ods)
pub struct SpreadsheetReader {
    source: WorkbookSource,
}

impl SpreadsheetReader {
    /// Create a reader for a workbook on disk
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: WorkbookSource::Path(path.as_ref().to_path_buf()),
        }
    }

    /// Create a reader for an in-memory workbook (e.g. an uploaded file)
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            source: WorkbookSource::Bytes(bytes),
        }
    }

    /// Read the first sheet by declared order.
    ///
    /// Fails as a whole if the workbook cannot be opened or parsed; there is
    /// no partial output.
    pub fn read(&self) -> RosterResult<SheetData> {
        match &self.source {
            WorkbookSource::Path(path) => {
                let mut workbook = open_workbook_auto(path).map_err(|e| {
                    RosterError::Workbook(format!(
                        "Failed to open workbook {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                read_first_sheet(&mut workbook)
            }
            WorkbookSource::Bytes(bytes) => {
                let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.as_slice()))
                    .map_err(|e| {
                        RosterError::Workbook(format!("Failed to open uploaded workbook: {}", e))
                    })?;
                read_first_sheet(&mut workbook)
            }
        }
    }
}

fn read_first_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> RosterResult<SheetData> {
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| RosterError::Workbook("Workbook contains no sheets".to_string()))?;

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        RosterError::Workbook(format!("Failed to read sheet '{}': {}", sheet_name, e))
    })?;

    let sheet = sheet_from_range(&sheet_name, &range);
    debug!(
        sheet = %sheet.name,
        columns = sheet.headers.len(),
        rows = sheet.rows.len(),
        "read worksheet"
    );
    Ok(sheet)
}

/// Convert a worksheet range into header-keyed rows.
///
/// Row 0 of the used range is the header. Fully blank rows are skipped, every
/// other row carries all header keys.
pub(crate) fn sheet_from_range(sheet_name: &str, range: &Range<Data>) -> SheetData {
    let mut rows_iter = range.rows();

    let headers = match rows_iter.next() {
        Some(header_row) => header_names(header_row),
        None => {
            return SheetData {
                name: sheet_name.to_string(),
                ..SheetData::default()
            }
        }
    };

    let mut rows = Vec::new();
    for raw in rows_iter {
        let values: Vec<CellValue> = (0..headers.len())
            .map(|col| raw.get(col).map(convert_cell).unwrap_or(CellValue::Empty))
            .collect();

        if values.iter().all(CellValue::is_empty) {
            continue;
        }

        let row: SheetRow = headers.iter().cloned().zip(values).collect();
        rows.push(row);
    }

    SheetData {
        name: sheet_name.to_string(),
        headers,
        rows,
    }
}

/// Header keys for the first row: blanks become `__EMPTY`, repeats get `_N`.
///
/// A suffix never reuses a name already taken, literal or generated, so every
/// column keeps its own key.
fn header_names(header_row: &[Data]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();

    header_row
        .iter()
        .map(|cell| {
            let value = convert_cell(cell);
            let base = if value.is_empty() {
                EMPTY_HEADER.to_string()
            } else {
                value.to_text()
            };

            let name = if taken.contains(&base) {
                let suffix = next_suffix.entry(base.clone()).or_insert(1);
                loop {
                    let candidate = format!("{}_{}", base, suffix);
                    *suffix += 1;
                    if !taken.contains(&candidate) {
                        break candidate;
                    }
                }
            } else {
                base
            };

            taken.insert(name.clone());
            name
        })
        .collect()
}

/// Map a calamine cell onto the crate's cell model
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
