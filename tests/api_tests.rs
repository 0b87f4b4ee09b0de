//! API integration tests: router requests and the upload client against a
//! live server

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use royalbit_roster::api::{build_router, server, AppState, EmployeeStore};
use royalbit_roster::writer::{UploadClient, UploadConfig};
use royalbit_roster::{EmployeeRecord, RosterError};
use rust_xlsxwriter::Workbook;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "roster-test-boundary";

// ═══════════════════════════════════════════════════════════════════════════
// HELPERS
// ═══════════════════════════════════════════════════════════════════════════

fn workbook_bytes(usernames: &[&str]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "username_final").unwrap();
    sheet.write_string(0, 1, "Gender").unwrap();
    for (i, name) in usernames.iter().enumerate() {
        sheet.write_string(i as u32 + 1, 0, *name).unwrap();
        sheet.write_string(i as u32 + 1, 1, "Female").unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

fn multipart_body(field: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn app(token: Option<&str>) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        token.map(str::to_string),
        EmployeeStore::new(None),
    ));
    (build_router(state.clone()), state)
}

fn upload_request(field: &str, file_name: &str, content: &[u8], token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/v1/employees/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(multipart_body(field, file_name, content)))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// INFO ENDPOINTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_health_endpoint() {
    let (router, _) = app(None);
    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["status"], "healthy");
    assert_eq!(json["data"]["employees"], 0);
}

#[tokio::test]
async fn test_root_lists_upload_endpoint() {
    let (router, _) = app(None);
    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let json = json_body(response).await;
    let paths: Vec<&str> = json["data"]["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["path"].as_str())
        .collect();
    assert!(paths.contains(&"/api/v1/employees/upload"));
}

// ═══════════════════════════════════════════════════════════════════════════
// UPLOAD ENDPOINT
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_upload_imports_rows() {
    let (router, state) = app(None);
    let bytes = workbook_bytes(&["ani", "budi", "citra"]);

    let response = router
        .oneshot(upload_request("file", "staff.xlsx", &bytes, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["count"], 3);
    assert_eq!(json["total"], 3);
    assert_eq!(json["sheet"], "Sheet1");

    let stored = state.store.list();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0].gender.as_deref(), Some("female"));
}

#[tokio::test]
async fn test_upload_rejects_unsupported_extension() {
    let (router, state) = app(None);
    let response = router
        .oneshot(upload_request("file", "staff.csv", b"a,b\n1,2\n", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["error"].as_str().unwrap().contains("staff.csv"));
    assert!(state.store.is_empty());
}

#[tokio::test]
async fn test_upload_missing_file_field() {
    let (router, _) = app(None);
    let bytes = workbook_bytes(&["ani"]);
    let response = router
        .oneshot(upload_request("attachment", "staff.xlsx", &bytes, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Missing multipart field 'file'");
}

#[tokio::test]
async fn test_upload_requires_file_name() {
    let (router, state) = app(None);
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"file\"\r\n\r\n");
    body.extend_from_slice(&workbook_bytes(&["ani"]));
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/employees/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Multipart field 'file' has no file name");
    assert!(state.store.is_empty());
}

#[tokio::test]
async fn test_upload_corrupt_workbook() {
    let (router, _) = app(None);
    let response = router
        .oneshot(upload_request("file", "staff.xlsx", b"definitely not xlsx", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ═══════════════════════════════════════════════════════════════════════════
// AUTH
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_token_required_when_configured() {
    let (router, _) = app(Some("s3cret"));
    let bytes = workbook_bytes(&["ani"]);

    let response = router
        .clone()
        .oneshot(upload_request("file", "staff.xlsx", &bytes, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = router
        .clone()
        .oneshot(upload_request("file", "staff.xlsx", &bytes, Some("wrong")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = router
        .oneshot(upload_request("file", "staff.xlsx", &bytes, Some("s3cret")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_open_with_token_configured() {
    let (router, _) = app(Some("s3cret"));
    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ═══════════════════════════════════════════════════════════════════════════
// INGEST / LIST
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_ingest_then_list() {
    let (router, _) = app(None);
    let records = serde_json::json!([{
        "username": "dewi", "nik": "4", "employee_name": "Dewi",
        "joint_date": "2022-02-01", "contract_end_date": "", "date_of_birth": "",
        "place_of_birth": "", "ktp_number": "", "kk_no": "", "npwp_number": "",
        "bpjs_kesehatan_no": "", "bpjs_clinic": "", "bpjs_tk_no": "", "bpjs_jp_no": "",
        "no_hp": "", "email": "", "ktp_address": "", "password": "",
        "educationHistory": [{"degree": "", "institution": "", "major": "", "graduation_year": ""}],
        "trainingHistory": [], "attendanceRecords": [], "leaveRecords": []
    }]);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/employees")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(records.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["count"], 1);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/employees")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let listed: Vec<EmployeeRecord> =
        serde_json::from_value(json_body(response).await).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].username, "dewi");
}

#[tokio::test]
async fn test_upload_writes_store_mirror() {
    let temp_dir = TempDir::new().unwrap();
    let mirror = temp_dir.path().join("data").join("employees.json");
    let state = Arc::new(AppState::new(None, EmployeeStore::new(Some(mirror.clone()))));
    let router = build_router(state.clone());

    let bytes = workbook_bytes(&["ani", "budi"]);
    let response = router
        .oneshot(upload_request("file", "staff.xlsx", &bytes, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mirrored: Vec<EmployeeRecord> =
        serde_json::from_str(&std::fs::read_to_string(&mirror).unwrap()).unwrap();
    assert_eq!(mirrored.len(), 2);
    assert_eq!(mirrored[1].username, "budi");
    assert_eq!(state.store.len(), 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// CLIENT ↔ LIVE SERVER
// ═══════════════════════════════════════════════════════════════════════════

/// Start a server on an ephemeral port in a background runtime
fn spawn_server(token: Option<&str>) -> (SocketAddr, Arc<AppState>) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    let state = Arc::new(AppState::new(
        token.map(str::to_string),
        EmployeeStore::new(None),
    ));
    let server_state = state.clone();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            server::serve(listener, server_state, std::future::pending())
                .await
                .unwrap();
        });
    });

    (addr, state)
}

fn write_workbook(path: &Path, usernames: &[&str]) {
    std::fs::write(path, workbook_bytes(usernames)).unwrap();
}

#[test]
fn test_client_upload_reports_count() {
    let (addr, state) = spawn_server(Some("s3cret"));
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("staff.xlsx");
    write_workbook(&file, &["ani", "budi"]);

    let config = UploadConfig::new(format!("http://{}/api/v1/employees/upload", addr))
        .with_token(Some("s3cret".to_string()));
    let count = UploadClient::new(config).unwrap().upload_workbook(&file).unwrap();

    assert_eq!(count, 2);
    assert_eq!(state.store.len(), 2);
}

#[test]
fn test_client_upload_surfaces_server_error() {
    let (addr, _) = spawn_server(Some("s3cret"));
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("staff.xlsx");
    write_workbook(&file, &["ani"]);

    let config = UploadConfig::new(format!("http://{}/api/v1/employees/upload", addr));
    let result = UploadClient::new(config).unwrap().upload_workbook(&file);

    match result {
        Err(RosterError::Upload(msg)) => assert_eq!(msg, "Missing or invalid bearer token"),
        other => panic!("Expected upload error, got {:?}", other),
    }
}

#[test]
fn test_client_large_upload_without_token_gets_server_message() {
    let (addr, state) = spawn_server(Some("s3cret"));
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("staff.xlsx");
    let names: Vec<String> = (0..20_000).map(|i| format!("employee{:05}", i)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    write_workbook(&file, &refs);

    let config = UploadConfig::new(format!("http://{}/api/v1/employees/upload", addr));
    let result = UploadClient::new(config).unwrap().upload_workbook(&file);

    match result {
        Err(RosterError::Upload(msg)) => assert_eq!(msg, "Missing or invalid bearer token"),
        other => panic!("Expected upload error, got {:?}", other),
    }
    assert!(state.store.is_empty());
}

/// URL on a local port with nothing listening
fn closed_endpoint(path: &str) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, path)
}

#[test]
fn test_client_connection_refused_is_http_error() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("staff.xlsx");
    write_workbook(&file, &["ani"]);

    let client =
        UploadClient::new(UploadConfig::new(closed_endpoint("/api/v1/employees/upload"))).unwrap();
    let err = client.upload_workbook(&file).unwrap_err();
    assert!(matches!(err, RosterError::Http(_)), "got {:?}", err);
    assert!(err.to_string().starts_with("HTTP error:"));

    let client = UploadClient::new(UploadConfig::new(closed_endpoint("/api/v1/employees"))).unwrap();
    let err = client.submit_records(&[]).unwrap_err();
    assert!(matches!(err, RosterError::Http(_)), "got {:?}", err);
}

#[test]
fn test_client_submit_records() {
    let (addr, state) = spawn_server(None);
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("staff.xlsx");
    write_workbook(&file, &["ani", "budi", "citra"]);

    let imported = royalbit_roster::core::read_records(
        &royalbit_roster::excel::SpreadsheetReader::new(&file),
    )
    .unwrap();

    let config = UploadConfig::new(format!("http://{}/api/v1/employees", addr));
    let count = UploadClient::new(config)
        .unwrap()
        .submit_records(&imported.records)
        .unwrap();

    assert_eq!(count, 3);
    assert_eq!(state.store.list()[2].username, "citra");
}
