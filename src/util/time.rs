use anyhow::{bail, Result};
use chrono::{Duration, Local, NaiveDate};

// Parse a target date: "today", "YYYY-MM-DD", or "2d" (two days ago).
// Returns Some(date) on success; None if unparseable.
pub fn parse_date_str(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("today") {
        return Some(today);
    }
    // "2d" -> today - 2 days
    if let Some(stripped) = s.strip_suffix('d') {
        if let Ok(days) = stripped.parse::<i64>() {
            if days >= 0 {
                return Duration::try_days(days).and_then(|d| today.checked_sub_signed(d));
            }
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

// Helper for Option<String> inputs used by CLI flags like --date
pub fn parse_target_opt(date: &Option<String>) -> Result<NaiveDate> {
    let today = Local::now().date_naive();
    let Some(s) = date.as_ref() else { return Ok(today) };
    match parse_date_str(s, today) {
        Some(d) => Ok(d),
        None => bail!("invalid --date '{s}' (expected YYYY-MM-DD, 'today', or e.g. '1d')"),
    }
}
