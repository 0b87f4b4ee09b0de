//! Blank import template (.xlsx) generator

use crate::core::columns::IMPORT_COLUMNS;
use crate::error::{RosterError, RosterResult};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use tracing::info;

/// Name of the template's only worksheet
pub const TEMPLATE_SHEET_NAME: &str = "Employees";

/// Writes a workbook whose header row lists every recognised import column
pub struct TemplateExporter;

impl TemplateExporter {
    pub fn new() -> Self {
        Self
    }

    /// Save the template workbook to `output_path`
    pub fn export(&self, output_path: &Path) -> RosterResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(TEMPLATE_SHEET_NAME)
            .map_err(|e| RosterError::Workbook(format!("Failed to set worksheet name: {}", e)))?;

        let header_format = Format::new().set_bold();

        for (col, header) in IMPORT_COLUMNS.iter().enumerate() {
            let col = col as u16;
            worksheet
                .write_string_with_format(0, col, *header, &header_format)
                .map_err(|e| RosterError::Workbook(format!("Failed to write header: {}", e)))?;
            // Room for the header text plus a little padding
            worksheet.set_column_width(col, (header.len() + 4) as f64).ok();
        }

        workbook
            .save(output_path)
            .map_err(|e| RosterError::Workbook(format!("Failed to save template: {}", e)))?;

        info!(path = %output_path.display(), "wrote import template");
        Ok(())
    }
}

impl Default for TemplateExporter {
    fn default() -> Self {
        Self::new()
    }
}
