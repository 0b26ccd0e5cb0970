//! Date parsing for extracted issue dates.

use chrono::NaiveDate;

const FORMATS: [&str; 4] = ["%d/%m/%Y", "%d.%m.%Y", "%d-%m-%Y", "%Y-%m-%d"];

/// Parse an issue date in any of the layouts the extraction rules accept.
///
/// Only the first whitespace-separated token is considered, so a trailing
/// time (`15/01/2024 10:32:11`) is ignored.
pub fn parse_issue_date(s: &str) -> Option<NaiveDate> {
    let token = s.split_whitespace().next()?;
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
}
