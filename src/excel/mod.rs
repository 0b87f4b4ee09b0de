//! Spreadsheet module
//!
//! - Reader: workbook (.xlsx/.xls/.ods) → header-keyed rows of the first sheet
//! - Template: blank .xlsx with the recognised import columns

mod reader;
mod template;

pub use reader::{SheetData, SpreadsheetReader};
pub use template::{TemplateExporter, TEMPLATE_SHEET_NAME};
