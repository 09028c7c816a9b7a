use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Validated student fields, used for both insert and full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentCreate {
    pub name: String,
    pub classname: String,
    pub dob: NaiveDate,
}

/// Validated drive fields, used for both insert and full overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveCreate {
    pub title: Option<String>,
    pub vaccine_name: Option<String>,
    pub drive_date: NaiveDate,
    pub no_of_vaccine: Option<i32>,
    pub classname: Option<String>,
}

/// Optional report predicates. `None` means "no predicate".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Case-insensitive substring of the student name.
    pub student_name: Option<String>,
    /// Case-insensitive substring of the drive's vaccine name.
    pub vaccine_name: Option<String>,
    /// Case-insensitive substring of the student's class.
    pub classname: Option<String>,
    /// Exact drive date.
    pub drive_date: Option<NaiveDate>,
}
