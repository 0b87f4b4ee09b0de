//! Field mapper - one sheet row → one EmployeeRecord

use super::columns;
use super::dates::{normalize_date, DateInput};
use crate::types::{EducationEntry, EmployeeRecord, SheetRow};

/// Map a row onto a normalized employee record.
///
/// Pure and total: absent columns become `""`, except `Gender`, which is left
/// out entirely when the sheet has no such column. The record always carries
/// exactly one education entry seeded from the row.
pub fn map_row(row: &SheetRow) -> EmployeeRecord {
    EmployeeRecord {
        username: row.text(columns::USERNAME),
        nik: row.text(columns::NIK),
        employee_name: row.text(columns::EMPLOYEE_NAME),
        joint_date: date_field(row, columns::JOINT_DATE),
        contract_end_date: date_field(row, columns::CONTRACT_END_DATE),
        date_of_birth: date_field(row, columns::DATE_OF_BIRTH),
        place_of_birth: row.text(columns::PLACE_OF_BIRTH),
        ktp_number: row.text(columns::KTP_NUMBER),
        kk_no: row.text(columns::KK_NO),
        npwp_number: row.text(columns::NPWP_NUMBER),
        gender: row
            .get(columns::GENDER)
            .map(|cell| cell.to_text().to_lowercase()),
        bpjs_kesehatan_no: row.text(columns::BPJS_KESEHATAN_NO),
        bpjs_clinic: row.text(columns::BPJS_CLINIC),
        bpjs_tk_no: row.text(columns::BPJS_TK_NO),
        bpjs_jp_no: row.text(columns::BPJS_JP_NO),
        no_hp: row.text(columns::NO_HP),
        email: row.text(columns::EMAIL),
        ktp_address: row.text(columns::KTP_ADDRESS),
        password: row.text(columns::PASSWORD),
        education_history: vec![education_entry(row)],
        training_history: Vec::new(),
        attendance_records: Vec::new(),
        leave_records: Vec::new(),
    }
}

/// Map every row, preserving sheet order
pub fn map_rows(rows: &[SheetRow]) -> Vec<EmployeeRecord> {
    rows.iter().map(map_row).collect()
}

fn date_field(row: &SheetRow, header: &str) -> String {
    normalize_date(&DateInput::from(row.get(header)))
}

fn education_entry(row: &SheetRow) -> EducationEntry {
    EducationEntry {
        degree: row.text(columns::LAST_EDUCATION),
        institution: row.text(columns::SCHOOL_UNIVERSITY),
        major: row.text(columns::MAJORITY),
        graduation_year: row.text(columns::YEAR_OF_GRADUATION),
    }
}
