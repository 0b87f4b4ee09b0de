use thiserror::Error;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}
