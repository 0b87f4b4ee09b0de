//! Blocking HTTP client for the backend import endpoints
//!
//! - `upload_workbook`: multipart upload of a spreadsheet (field `file`)
//! - `submit_records`: JSON array of already-mapped records
//!
//! Single request/response, no retry.

use crate::error::{RosterError, RosterResult};
use crate::types::EmployeeRecord;
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Multipart field carrying the spreadsheet
pub const UPLOAD_FIELD: &str = "file";

/// Extensions accepted by the upload endpoint
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upload/submission client configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub endpoint: String,
    /// Bearer token attached as `Authorization: Bearer <token>`
    pub token: Option<String>,
    pub timeout: Duration,
}

impl UploadConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Reject files the endpoint will not accept, before any network traffic
pub fn validate_extension(path: &Path) -> RosterResult<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext {
        Some(ref e) if ACCEPTED_EXTENSIONS.contains(&e.as_str()) => Ok(()),
        _ => Err(RosterError::UnsupportedFile(format!(
            "{} (expected .xlsx or .xls)",
            path.display()
        ))),
    }
}

pub struct UploadClient {
    client: Client,
    config: UploadConfig,
}

impl UploadClient {
    pub fn new(config: UploadConfig) -> RosterResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Upload a spreadsheet file; returns the `count` reported by the server
    pub fn upload_workbook(&self, path: &Path) -> RosterResult<usize> {
        validate_extension(path)?;

        let form = multipart::Form::new()
            .file(UPLOAD_FIELD, path)
            .map_err(|e| RosterError::Upload(format!("Cannot read {}: {}", path.display(), e)))?;

        debug!(endpoint = %self.config.endpoint, file = %path.display(), "uploading workbook");
        let request = self.authorized(self.client.post(&self.config.endpoint).multipart(form));
        let response = request.send()?;

        let count = read_reply(response)?.ok_or_else(|| {
            RosterError::Upload("Server reply did not include a record count".to_string())
        })?;

        info!(count, "workbook upload accepted");
        Ok(count)
    }

    /// Submit mapped records as a JSON array; returns the accepted count
    pub fn submit_records(&self, records: &[EmployeeRecord]) -> RosterResult<usize> {
        debug!(endpoint = %self.config.endpoint, records = records.len(), "submitting records");
        let request = self.authorized(self.client.post(&self.config.endpoint).json(records));
        let response = request.send()?;

        let count = read_reply(response)?.unwrap_or(records.len());
        info!(count, "record submission accepted");
        Ok(count)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Turn a reply into the reported count, or the server's error message
fn read_reply(response: Response) -> RosterResult<Option<usize>> {
    let status = response.status();
    let body = response.text()?;
    let json: Option<Value> = serde_json::from_str(&body).ok();

    if !status.is_success() {
        let message = json
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| status.to_string());
        return Err(RosterError::Upload(message));
    }

    Ok(json.as_ref().and_then(reply_count))
}

fn reply_count(json: &Value) -> Option<usize> {
    json.get("count")
        .or_else(|| json.get("data").and_then(|d| d.get("count")))
        .and_then(Value::as_u64)
        .map(|c| c as usize)
}

fn error_message(json: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| json.get(key).and_then(Value::as_str))
        .map(str::to_string)
}
