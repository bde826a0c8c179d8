//! Time related utils.

use chrono::Utc;

/// DateTime in UTC, the only form time takes inside this crate family.
pub type DateTime = chrono::DateTime<Utc>;

/// Return the current time in UTC.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a time into an HTTP date like `Mon, 20 Jan 2014 06:38:31 GMT`.
pub fn format_http_date(t: DateTime) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
