//! CSV in (bulk student import) and out (report export).

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::Deserialize;
use tracing::debug;
use vaxport_schema::{ReportRow, StudentPayload};

use crate::error::VaxportError;
use crate::service::report_sort::ReportColumn;

const REQUIRED_STUDENT_COLUMNS: [&str; 3] = ["name", "classname", "dob"];
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Plain strings: the CSV deserializer would otherwise infer numbers and booleans.
#[derive(Debug, Deserialize)]
struct CsvStudentRow {
    name: Option<String>,
    classname: Option<String>,
    dob: Option<String>,
}

impl From<CsvStudentRow> for StudentPayload {
    fn from(r: CsvStudentRow) -> Self {
        Self {
            name: r.name,
            classname: r.classname,
            dob: r.dob,
        }
    }
}

/// Parses a student CSV with a header row.
///
/// Columns are matched by header name; extra columns are ignored. A record that cannot be
/// decoded becomes an empty payload so the import counts it as skipped.
pub fn parse_students_csv(bytes: &[u8]) -> Result<Vec<StudentPayload>, VaxportError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers = rdr.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_STUDENT_COLUMNS
        .into_iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(VaxportError::CsvMissingColumns(missing.join(", ")));
    }

    let rows = rdr
        .deserialize::<CsvStudentRow>()
        .enumerate()
        .map(|(index, record)| match record {
            Ok(row) => row.into(),
            Err(e) => {
                debug!(row = index, error = %e, "Undecodable CSV record");
                StudentPayload::default()
            }
        })
        .collect();

    Ok(rows)
}

/// Renders report rows as CSV. The header row is written even when there are no rows.
pub fn render_report_csv(rows: &[ReportRow]) -> Result<Vec<u8>, VaxportError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(ReportColumn::ALL.map(ReportColumn::as_str))?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.into_inner()
        .map_err(|e| VaxportError::IoError(e.into_error()))
}
