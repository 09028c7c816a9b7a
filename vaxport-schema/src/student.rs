use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::lax::{deserialize_i32_lax, deserialize_string_lax};

/// Request body for student create/update and one element of a bulk import.
///
/// All fields are optional at the wire level; the server decides what is required so that a
/// malformed row in a bulk import is skipped instead of failing the whole request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StudentPayload {
    #[serde(default, deserialize_with = "deserialize_string_lax")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_lax")]
    pub classname: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_lax")]
    pub dob: Option<String>,
}

/// A vaccination received by a student, as nested under `vaccinations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationRecord {
    pub drive_id: i32,
    pub title: Option<String>,
    pub vaccine_name: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentWithVaccinations {
    pub id: i32,
    pub name: String,
    pub classname: String,
    pub dob: NaiveDate,
    pub vaccination_status: Option<String>,
    pub vaccinations: Vec<VaccinationRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkImportSummary {
    pub added: u32,
    pub skipped: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinatePayload {
    #[serde(default, deserialize_with = "deserialize_i32_lax")]
    pub vaccination_drive_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationStatusPayload {
    #[serde(default, deserialize_with = "deserialize_string_lax")]
    pub vaccination_status: Option<String>,
}
