use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Query string of `GET /api/report/student-vaccination-report`.
///
/// Every field is optional; empty strings are treated as absent by the server.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReportQuery {
    pub student_name: Option<String>,
    pub vaccine_name: Option<String>,
    pub classname: Option<String>,
    pub drive_date: Option<String>,
    /// Column name of [`ReportRow`] to sort by.
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`.
    pub order: Option<String>,
}

/// One row of the student/drive left join. Drive columns are `None` for students that were
/// never vaccinated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub student_name: String,
    pub vaccination_status: Option<String>,
    pub student_class: String,
    pub date_of_birth: NaiveDate,
    pub vaccination_drive_title: Option<String>,
    pub vaccination_date: Option<NaiveDate>,
    pub vaccine_name: Option<String>,
    pub vaccine_quantity: Option<i32>,
    pub drive_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDriveRow {
    pub drive_title: Option<String>,
    pub vaccination_date: NaiveDate,
    pub vaccine_name: Option<String>,
    pub vaccine_quantity: Option<i32>,
    pub drive_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStudentRow {
    pub student_name: String,
    pub vaccination_status: Option<String>,
    pub student_class: String,
    pub date_of_birth: NaiveDate,
}
