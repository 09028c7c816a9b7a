use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// ASCII digits only; `\d` would also accept other Unicode digits.
static STRICT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

/// Parses a `YYYY-MM-DD` calendar date.
///
/// The shape is checked first, so `2015-3-2` or `2015-03-02T00:00:00Z` are rejected even
/// though chrono alone would accept some of them. Well-shaped but impossible dates
/// (`2015-02-30`) are rejected too.
pub fn parse_strict_date(raw: &str) -> Option<NaiveDate> {
    if !STRICT_DATE.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
