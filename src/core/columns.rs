//! Source column headers recognised by the employee import

pub const USERNAME: &str = "username_final";
pub const NIK: &str = "NIK";
pub const EMPLOYEE_NAME: &str = "Employee Name";
pub const JOINT_DATE: &str = "Joint Date";
pub const CONTRACT_END_DATE: &str = "Contract End date";
pub const DATE_OF_BIRTH: &str = "Date of Birth";
pub const PLACE_OF_BIRTH: &str = "Place of Birth";
pub const KTP_NUMBER: &str = "KTP Number";
pub const KK_NO: &str = "KK No";
pub const NPWP_NUMBER: &str = "NPWP Number";
pub const GENDER: &str = "Gender";
pub const BPJS_KESEHATAN_NO: &str = "BPJS Kesehatan No";
pub const BPJS_CLINIC: &str = "BPJS Clinic";
pub const BPJS_TK_NO: &str = "BPJS TK No";
pub const BPJS_JP_NO: &str = "BPJS JP No";
pub const NO_HP: &str = "No HP";
pub const EMAIL: &str = "Email";
pub const KTP_ADDRESS: &str = "KTP Address";
pub const PASSWORD: &str = "Password";
pub const LAST_EDUCATION: &str = "Last Education";
pub const SCHOOL_UNIVERSITY: &str = "School / University";
pub const MAJORITY: &str = "Majority";
pub const YEAR_OF_GRADUATION: &str = "Year of Graduation";

/// All import columns, in template order
pub const IMPORT_COLUMNS: [&str; 23] = [
    USERNAME,
    NIK,
    EMPLOYEE_NAME,
    JOINT_DATE,
    CONTRACT_END_DATE,
    DATE_OF_BIRTH,
    PLACE_OF_BIRTH,
    KTP_NUMBER,
    KK_NO,
    NPWP_NUMBER,
    GENDER,
    BPJS_KESEHATAN_NO,
    BPJS_CLINIC,
    BPJS_TK_NO,
    BPJS_JP_NO,
    NO_HP,
    EMAIL,
    KTP_ADDRESS,
    PASSWORD,
    LAST_EDUCATION,
    SCHOOL_UNIVERSITY,
    MAJORITY,
    YEAR_OF_GRADUATION,
];
