//! CLI binary tests for `roster`

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn roster() -> Command {
    let mut cmd = Command::cargo_bin("roster").unwrap();
    cmd.env_remove("ROSTER_TOKEN").env_remove("ROSTER_UPLOAD_URL");
    cmd
}

fn write_staff_sheet(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "username_final").unwrap();
    sheet.write_string(0, 1, "Joint Date").unwrap();
    sheet.write_string(1, 0, "ani").unwrap();
    sheet.write_number(1, 1, 45000.0).unwrap();
    sheet.write_string(2, 0, "budi").unwrap();
    sheet.write_string(2, 1, "2023-05-01T00:00:00.000Z").unwrap();
    workbook.save(path).unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_import_writes_json() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("staff.xlsx");
    let output = temp_dir.path().join("employees.json");
    write_staff_sheet(&input);

    roster()
        .arg("import")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Import Complete"))
        .stdout(predicate::str::contains("2 records written"));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("\"joint_date\": \"2023-03-15\""));
    assert!(content.contains("\"joint_date\": \"2023-05-01\""));
}

#[test]
fn test_import_verbose_shows_sheet() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("staff.xlsx");
    let output = temp_dir.path().join("employees.json");
    write_staff_sheet(&input);

    roster()
        .args(["import", "--verbose"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sheet1"))
        .stdout(predicate::str::contains("2 rows mapped"));
}

#[test]
fn test_import_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("employees.json");

    roster()
        .arg("import")
        .arg(temp_dir.path().join("missing.xlsx"))
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Workbook"));

    assert!(!output.exists());
}

// ═══════════════════════════════════════════════════════════════════════════
// UPLOAD
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_upload_rejects_unsupported_extension() {
    roster()
        .args([
            "upload",
            "staff.csv",
            "--endpoint",
            "http://127.0.0.1:9/api/v1/employees/upload",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Upload failed"))
        .stderr(predicate::str::contains("expected .xlsx or .xls"));
}

#[test]
fn test_upload_unreachable_endpoint_reports_error() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("staff.xlsx");
    write_staff_sheet(&input);

    // Bind then release a port so nothing is listening on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    roster()
        .arg("upload")
        .arg(&input)
        .arg("--endpoint")
        .arg(format!("http://{}/api/v1/employees/upload", addr))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Upload failed"))
        .stderr(predicate::str::contains("HTTP error"));
}

#[test]
fn test_upload_requires_endpoint() {
    roster().args(["upload", "staff.xlsx"]).assert().failure();
}

// ═══════════════════════════════════════════════════════════════════════════
// TEMPLATE / HELP
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_template_creates_workbook() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("template.xlsx");

    roster()
        .arg("template")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Template written"));

    assert!(output.exists());
}

#[test]
fn test_help_lists_commands() {
    roster()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("upload"))
        .stdout(predicate::str::contains("template"));
}
