//! Import core: column names, date normalization, row mapping, pipeline

pub mod columns;
pub mod dates;
pub mod mapper;
pub mod pipeline;

pub use dates::{normalize_date, serial_to_date, DateInput};
pub use mapper::{map_row, map_rows};
pub use pipeline::{import_employees, read_records, ImportConfig, ImportSummary, ImportedSheet};
