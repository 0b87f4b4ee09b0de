use serde::{Deserialize, Serialize};
use std::collections::HashMap;

//==============================================================================
// Spreadsheet Cells and Rows
//==============================================================================

/// A single typed cell value read from a worksheet
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Blank cell (or a cell holding an error value)
    Empty,
    /// Text cell
    Text(String),
    /// Numeric cell; date/time cells surface as their day serial
    Number(f64),
    /// Boolean cell
    Bool(bool),
}

impl CellValue {
    /// Check whether the cell carries no data
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Render the cell as text, the way a plain (non-date) field stores it
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(true) => "TRUE".to_string(),
            CellValue::Bool(false) => "FALSE".to_string(),
        }
    }
}

/// Format a numeric cell without a spurious fractional part.
///
/// Identity numbers (NIK, KTP, phone numbers) are frequently typed as numbers
/// in the source sheet, so integral values print as integers.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e17 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One data row of a sheet, keyed by header text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    cells: HashMap<String, CellValue>,
}

impl SheetRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, header: impl Into<String>, value: CellValue) {
        self.cells.insert(header.into(), value);
    }

    /// Raw cell lookup; `None` only when the sheet has no such column
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells.get(header)
    }

    /// Cell as text, `""` for missing columns and blank cells
    pub fn text(&self, header: &str) -> String {
        self.get(header).map(CellValue::to_text).unwrap_or_default()
    }

    pub fn contains(&self, header: &str) -> bool {
        self.cells.contains_key(header)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for SheetRow {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut row = SheetRow::new();
        for (header, value) in iter {
            row.insert(header, value);
        }
        row
    }
}

//==============================================================================
// Employee Records
//==============================================================================

/// Normalized employee record produced by the import.
///
/// Field declaration order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub username: String,
    pub nik: String,
    pub employee_name: String,
    pub joint_date: String,
    pub contract_end_date: String,
    pub date_of_birth: String,
    pub place_of_birth: String,
    pub ktp_number: String,
    pub kk_no: String,
    pub npwp_number: String,
    /// Lower-cased; absent when the sheet has no Gender column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub bpjs_kesehatan_no: String,
    pub bpjs_clinic: String,
    pub bpjs_tk_no: String,
    pub bpjs_jp_no: String,
    pub no_hp: String,
    pub email: String,
    pub ktp_address: String,
    pub password: String,
    #[serde(rename = "educationHistory")]
    pub education_history: Vec<EducationEntry>,
    #[serde(rename = "trainingHistory", default)]
    pub training_history: Vec<TrainingEntry>,
    #[serde(rename = "attendanceRecords", default)]
    pub attendance_records: Vec<AttendanceEntry>,
    #[serde(rename = "leaveRecords", default)]
    pub leave_records: Vec<LeaveEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub major: String,
    pub graduation_year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingEntry {
    pub title: String,
    pub provider: String,
    pub completed_on: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub date: String,
    pub check_in: String,
    pub check_out: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveEntry {
    pub start_date: String,
    pub end_date: String,
    pub leave_type: String,
    pub status: String,
}
