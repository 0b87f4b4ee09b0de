//! Record sinks: pretty JSON file, or an ingestion endpoint over HTTP

pub mod upload;

use crate::error::{RosterError, RosterResult};
use crate::types::EmployeeRecord;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

pub use upload::{validate_extension, UploadClient, UploadConfig};

/// Where imported records go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// JSON file on disk
    File(PathBuf),
    /// Ingestion endpoint URL (records are POSTed as a JSON array)
    Endpoint(String),
}

impl FromStr for OutputTarget {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(RosterError::Validation(
                "Output target must not be empty".to_string(),
            ));
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(OutputTarget::Endpoint(trimmed.to_string()))
        } else {
            Ok(OutputTarget::File(PathBuf::from(trimmed)))
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::File(path) => write!(f, "{}", path.display()),
            OutputTarget::Endpoint(url) => write!(f, "{}", url),
        }
    }
}

/// Serialize records as a JSON array with 2-space indentation
pub fn to_pretty_json(records: &[EmployeeRecord]) -> RosterResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write the full record list to `path` in one call, creating parent
/// directories as needed. Returns the number of records written.
pub fn write_json_file(path: &Path, records: &[EmployeeRecord]) -> RosterResult<usize> {
    let json = to_pretty_json(records)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, json)?;

    info!(path = %path.display(), count = records.len(), "wrote employee records");
    Ok(records.len())
}
