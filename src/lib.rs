//! Roster - employee spreadsheet import
//!
//! Reads the first worksheet of a workbook, maps each row to a normalized
//! [`EmployeeRecord`], and writes the records as pretty JSON or submits them
//! to an ingestion endpoint.
//!
//! # Features
//!
//! - Workbook reading (.xlsx, .xls, .xlsb, .ods) keyed by header text
//! - Date normalization for ISO strings and spreadsheet day serials
//! - JSON file output or HTTP submission, multipart upload client
//! - Blank import template generation
//! - Ingestion API server
//!
//! # Example
//!
//! ```no_run
//! use royalbit_roster::core::{import_employees, ImportConfig};
//! use royalbit_roster::writer::OutputTarget;
//!
//! let config = ImportConfig::new(
//!     "staff.xlsx",
//!     OutputTarget::File("data/employees.json".into()),
//! );
//! let summary = import_employees(&config)?;
//! println!("Imported {} employees", summary.written);
//! # Ok::<(), royalbit_roster::error::RosterError>(())
//! ```

pub mod api;
pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{RosterError, RosterResult};
pub use types::{CellValue, EducationEntry, EmployeeRecord, SheetRow};
