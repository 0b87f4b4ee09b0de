//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::path::Path;
use std::sync::Arc;

use axum::body::{to_bytes, Bytes};
use axum::extract::{Multipart, Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::core::read_records;
use crate::error::RosterError;
use crate::excel::SpreadsheetReader;
use crate::types::EmployeeRecord;
use crate::writer::upload::UPLOAD_FIELD;
use crate::writer::validate_extension;

use super::error::ApiError;
use super::server::{AppState, MAX_UPLOAD_BYTES};

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(path: &str, method: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Roster API Server".to_string(),
        version: state.version.clone(),
        description: "Employee master-data import API".to_string(),
        endpoints: vec![
            EndpointInfo::new("/health", "GET", "Health check endpoint"),
            EndpointInfo::new("/version", "GET", "Get server version"),
            EndpointInfo::new("/api/v1/employees", "GET", "List imported employees"),
            EndpointInfo::new(
                "/api/v1/employees",
                "POST",
                "Ingest a JSON array of employee records",
            ),
            EndpointInfo::new(
                "/api/v1/employees/upload",
                "POST",
                "Import employees from a spreadsheet (multipart field 'file')",
            ),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub employees: usize,
}

/// GET /health - Health check
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        employees: state.store.len(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec![
            "upload".to_string(),
            "ingest".to_string(),
            "list".to_string(),
        ],
    }))
}

/// Import response (upload and ingest)
#[derive(Serialize, Debug)]
pub struct ImportResponse {
    pub count: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
    pub message: String,
}

/// POST /api/v1/employees/upload - Import a spreadsheet sent as multipart `file`
pub async fn upload_employees(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, ApiError> {
    // Read every part before rejecting anything so the client always gets the reply
    let mut upload: Option<(Option<String>, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) || upload.is_some() {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
        upload = Some((file_name, bytes));
    }

    let (file_name, bytes) = upload.ok_or_else(|| {
        ApiError::BadRequest(format!("Missing multipart field '{}'", UPLOAD_FIELD))
    })?;
    let file_name = file_name.ok_or_else(|| {
        ApiError::BadRequest(format!("Multipart field '{}' has no file name", UPLOAD_FIELD))
    })?;
    validate_extension(Path::new(&file_name))?;

    let import_state = state.clone();
    let (sheet, count, total) = tokio::task::spawn_blocking(move || {
        let imported = read_records(&SpreadsheetReader::from_bytes(bytes.to_vec()))?;
        let count = imported.records.len();
        let total = import_state.store.append(imported.records)?;
        Ok::<_, RosterError>((imported.sheet_name, count, total))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Import task failed: {}", e)))??;

    info!(count, total, sheet = %sheet, file = %file_name, "imported employees from upload");

    Ok(Json(ImportResponse {
        count,
        total,
        sheet: Some(sheet),
        message: format!("Imported {} employees", count),
    }))
}

/// POST /api/v1/employees - Ingest already-mapped records
pub async fn ingest_employees(
    State(state): State<Arc<AppState>>,
    Json(records): Json<Vec<EmployeeRecord>>,
) -> Result<Json<ImportResponse>, ApiError> {
    let count = records.len();
    let store_state = state.clone();
    let total = tokio::task::spawn_blocking(move || store_state.store.append(records))
        .await
        .map_err(|e| ApiError::Internal(format!("Store task failed: {}", e)))??;
    info!(count, total, "ingested employee records");

    Ok(Json(ImportResponse {
        count,
        total,
        sheet: None,
        message: format!("Imported {} employees", count),
    }))
}

/// GET /api/v1/employees - List stored records
pub async fn list_employees(State(state): State<Arc<AppState>>) -> Json<Vec<EmployeeRecord>> {
    Json(state.store.list())
}

/// Bearer-token gate for `/api/v1/*`; open when no token is configured
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(expected) = &state.api_token {
        let provided = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim);

        if provided != Some(expected.as_str()) {
            // Consume the body first; closing mid-upload loses the 401 on the client
            let _ = to_bytes(request.into_body(), MAX_UPLOAD_BYTES).await;
            return ApiError::Unauthorized("Missing or invalid bearer token".to_string())
                .into_response();
        }
    }

    next.run(request).await
}
