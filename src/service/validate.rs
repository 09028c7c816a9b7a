//! Request validation: wire payloads in, validated store inputs out.

use vaxport_schema::{DrivePayload, ReportQuery, StudentPayload};

use crate::db::{DriveCreate, ReportFilter, StudentCreate};
use crate::service::dates::parse_strict_date;
use crate::service::report_sort::{ReportColumn, ReportSort, SortOrder};

pub const INVALID_DATE: &str = "Invalid date format. Use yyyy-mm-dd";
pub const NAME_AND_CLASS_REQUIRED: &str = "Name and class are required";
pub const DRIVE_DATE_REQUIRED: &str = "Drive date is required. Use yyyy-mm-dd";

/// The date is checked first; name and class only once the date is acceptable.
pub fn validate_student(payload: &StudentPayload) -> Result<StudentCreate, &'static str> {
    let dob = payload
        .dob
        .as_deref()
        .and_then(parse_strict_date)
        .ok_or(INVALID_DATE)?;

    match (&payload.name, &payload.classname) {
        (Some(name), Some(classname)) => Ok(StudentCreate {
            name: name.clone(),
            classname: classname.clone(),
            dob,
        }),
        _ => Err(NAME_AND_CLASS_REQUIRED),
    }
}

pub fn validate_drive(payload: &DrivePayload) -> Result<DriveCreate, &'static str> {
    let raw = payload.drive_date.as_deref().ok_or(DRIVE_DATE_REQUIRED)?;
    let drive_date = parse_strict_date(raw).ok_or(INVALID_DATE)?;

    Ok(DriveCreate {
        title: payload.title.clone(),
        vaccine_name: payload.vaccine_name.clone(),
        drive_date,
        no_of_vaccine: payload.no_of_vaccine,
        classname: payload.classname.clone(),
    })
}

/// Splits the report query string into SQL filters and an optional in-memory sort.
pub fn validate_report_query(
    query: &ReportQuery,
) -> Result<(ReportFilter, Option<ReportSort>), String> {
    let drive_date = match non_blank(query.drive_date.as_ref()) {
        Some(raw) => Some(parse_strict_date(&raw).ok_or_else(|| INVALID_DATE.to_string())?),
        None => None,
    };

    let filter = ReportFilter {
        student_name: non_blank(query.student_name.as_ref()),
        vaccine_name: non_blank(query.vaccine_name.as_ref()),
        classname: non_blank(query.classname.as_ref()),
        drive_date,
    };

    let sort = match non_blank(query.sort_by.as_ref()) {
        Some(column) => {
            let column: ReportColumn = column.parse()?;
            let order = match non_blank(query.order.as_ref()) {
                Some(order) => order.parse::<SortOrder>()?,
                None => SortOrder::Asc,
            };
            Some(ReportSort { column, order })
        }
        None => None,
    };

    Ok((filter, sort))
}

fn non_blank(v: Option<&String>) -> Option<String> {
    v.map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
