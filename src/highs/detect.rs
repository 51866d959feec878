use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::classify::is_announceable;
use super::date::extract_date;
use super::table::{SeasonHighRow, StatValue};
use crate::sports::SportProfile;

/// A season high set or tied by one player on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub statistic: String,
    pub value: StatValue,
    pub player: String,
    pub opponent_raw: String,
    pub date: NaiveDate,
}

/// Every holder whose record date is the day before `target_date`.
///
/// Rows for excluded statistics are skipped whole; holders without a
/// recognizable date are skipped individually. Output keeps row order.
pub fn achievements_for(profile: &SportProfile, rows: &[SeasonHighRow], target_date: NaiveDate) -> Vec<Achievement> {
    let prev_date = target_date - Duration::days(1);
    let mut out = Vec::new();
    for row in rows {
        if !is_announceable(profile, &row.statistic) { continue; }
        for holder in &row.holders {
            let Some(date) = extract_date(&holder.opponent_text) else { continue };
            if date != prev_date { continue; }
            out.push(Achievement {
                statistic: row.statistic.clone(),
                value: row.high_value.clone(),
                player: holder.player.clone(),
                opponent_raw: holder.opponent_text.clone(),
                date,
            });
        }
    }
    out
}
