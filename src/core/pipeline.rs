//! Employee import operation: read → map → write/submit

use super::mapper::map_rows;
use crate::error::RosterResult;
use crate::excel::SpreadsheetReader;
use crate::types::EmployeeRecord;
use crate::writer::upload::DEFAULT_TIMEOUT_SECS;
use crate::writer::{write_json_file, OutputTarget, UploadClient, UploadConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Import run configuration. Paths and targets are always explicit.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub input: PathBuf,
    pub output: OutputTarget,
    /// Bearer token, used only for endpoint targets
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ImportConfig {
    pub fn new(input: impl Into<PathBuf>, output: OutputTarget) -> Self {
        Self {
            input: input.into(),
            output,
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Records mapped from one worksheet
#[derive(Debug, Clone)]
pub struct ImportedSheet {
    pub sheet_name: String,
    pub records: Vec<EmployeeRecord>,
}

/// Outcome of a completed import
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub sheet_name: String,
    /// Records produced from the sheet
    pub rows: usize,
    /// Records written to the file, or accepted by the endpoint
    pub written: usize,
    pub target: OutputTarget,
}

/// Read the first sheet and map every data row
pub fn read_records(reader: &SpreadsheetReader) -> RosterResult<ImportedSheet> {
    let sheet = reader.read()?;
    let records = map_rows(&sheet.rows);

    Ok(ImportedSheet {
        sheet_name: sheet.name,
        records,
    })
}

/// Run a full import. Any failure aborts the run with nothing written.
pub fn import_employees(config: &ImportConfig) -> RosterResult<ImportSummary> {
    let imported = read_records(&SpreadsheetReader::new(&config.input))?;
    let rows = imported.records.len();

    let written = match &config.output {
        OutputTarget::File(path) => write_json_file(path, &imported.records)?,
        OutputTarget::Endpoint(url) => {
            let upload = UploadConfig::new(url.clone())
                .with_token(config.token.clone())
                .with_timeout(config.timeout);
            UploadClient::new(upload)?.submit_records(&imported.records)?
        }
    };

    info!(
        input = %config.input.display(),
        output = %config.output,
        rows,
        written,
        "employee import complete"
    );

    Ok(ImportSummary {
        sheet_name: imported.sheet_name,
        rows,
        written,
        target: config.output.clone(),
    })
}
