use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static RE_PAREN_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d{1,2})/(\d{1,2})/(\d{4})\)").expect("valid date regex"));

static RE_PAREN_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").expect("valid paren regex"));

/// First `(M/D/YYYY)` in `text` as a calendar date.
///
/// Absence is a normal outcome: opponent strings for games without a
/// recorded date simply yield `None`, as do impossible dates like `(2/30/2024)`.
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    let caps = RE_PAREN_DATE.captures(text)?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Drop every parenthesized group (and the whitespace before it) for display.
pub fn strip_dates(text: &str) -> String {
    RE_PAREN_GROUP.replace_all(text, "").trim().to_string()
}
