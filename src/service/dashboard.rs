use chrono::{Days, NaiveDate};
use vaxport_schema::DashboardSummary;

use crate::db::SchoolStore;
use crate::error::VaxportError;

/// How far ahead the dashboard looks for drives, inclusive of both ends.
pub const UPCOMING_WINDOW_DAYS: u64 = 30;

/// `round(vaccinated / total * 100)`, rounding halves up; `0` for an empty school.
pub fn vaccination_rate(vaccinated: i64, total: i64) -> i64 {
    if total <= 0 || vaccinated <= 0 {
        return 0;
    }
    // floor(100v/t + 1/2) in integers
    (200 * vaccinated + total) / (2 * total)
}

/// `[today, today + 30 days]`.
pub fn upcoming_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let end = today
        .checked_add_days(Days::new(UPCOMING_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX);
    (today, end)
}

/// Runs the three dashboard queries concurrently. Any failure fails the whole summary.
pub async fn summarize(
    store: &dyn SchoolStore,
    today: NaiveDate,
) -> Result<DashboardSummary, VaxportError> {
    let (from, to) = upcoming_window(today);
    let (total_students, vaccinated_students, upcoming_drives) = tokio::try_join!(
        store.count_students(),
        store.count_vaccinated(),
        store.drives_between(from, to),
    )?;

    Ok(DashboardSummary {
        total_students,
        vaccinated_students,
        vaccination_rate: vaccination_rate(vaccinated_students, total_students),
        upcoming_drives,
    })
}
