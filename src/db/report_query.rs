//! Dynamic SQL for the filtered vaccination report.

use sqlx::{Postgres, QueryBuilder};

use crate::db::create::ReportFilter;

const REPORT_SELECT: &str = r#"
SELECT
    s.name AS student_name,
    s.vaccination_status AS vaccination_status,
    s.classname AS student_class,
    s.dob AS date_of_birth,
    v.title AS vaccination_drive_title,
    v.drive_date AS vaccination_date,
    v.vaccine_name AS vaccine_name,
    v.no_of_vaccine AS vaccine_quantity,
    v.classname AS drive_class
FROM students s
LEFT JOIN student_vaccine_link svl
    ON s.id = svl.student_id
LEFT JOIN vaccination_drives v
    ON v.id = svl.vaccination_drive_id
WHERE 1=1"#;

/// Builds the report query. Each present filter contributes exactly one `AND` predicate and
/// one positional bind; absent filters contribute nothing.
pub fn build_report_query(filter: &ReportFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(REPORT_SELECT);

    if let Some(name) = &filter.student_name {
        qb.push(" AND s.name ILIKE ")
            .push_bind(contains_pattern(name));
    }
    if let Some(vaccine) = &filter.vaccine_name {
        qb.push(" AND v.vaccine_name ILIKE ")
            .push_bind(contains_pattern(vaccine));
    }
    if let Some(classname) = &filter.classname {
        qb.push(" AND s.classname ILIKE ")
            .push_bind(contains_pattern(classname));
    }
    if let Some(date) = filter.drive_date {
        qb.push(" AND v.drive_date = ").push_bind(date);
    }

    qb.push(" ORDER BY s.name ASC, s.id ASC, v.drive_date ASC");
    qb
}

/// `%needle%` with LIKE metacharacters in `needle` matched literally.
///
/// PostgreSQL's default LIKE escape character is the backslash.
pub fn contains_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}
