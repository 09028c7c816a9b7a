use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::lax::{deserialize_i32_lax, deserialize_string_lax};

/// A vaccination drive as stored and returned by `/api/vaccination-drives`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccinationDrive {
    pub id: i32,
    pub title: Option<String>,
    pub vaccine_name: Option<String>,
    pub drive_date: NaiveDate,
    pub no_of_vaccine: Option<i32>,
    /// Target class.
    pub classname: Option<String>,
}

/// Request body for creating or overwriting a drive.
///
/// Field names follow the table columns. The camelCase aliases match the field names used by
/// the management form, so either spelling is accepted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DrivePayload {
    #[serde(default, alias = "driveTitle", deserialize_with = "deserialize_string_lax")]
    pub title: Option<String>,

    #[serde(default, alias = "vaccineName", deserialize_with = "deserialize_string_lax")]
    pub vaccine_name: Option<String>,

    /// Raw `YYYY-MM-DD` string; validated by the server, not by serde.
    #[serde(default, alias = "driveDate", deserialize_with = "deserialize_string_lax")]
    pub drive_date: Option<String>,

    #[serde(default, alias = "vaccineCount", deserialize_with = "deserialize_i32_lax")]
    pub no_of_vaccine: Option<i32>,

    #[serde(default, alias = "applicableClass", deserialize_with = "deserialize_string_lax")]
    pub classname: Option<String>,
}

/// Dashboard entry for a drive scheduled in the next 30 days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingDrive {
    pub drive_id: i32,
    pub drive_title: Option<String>,
    pub drive_date: NaiveDate,
}

/// One entry of the vaccine catalog derived from drive history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccineEntry {
    pub drive_id: i32,
    pub drive_title: Option<String>,
    pub vaccine_type: Option<String>,
}
