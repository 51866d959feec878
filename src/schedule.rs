// src/schedule.rs
use std::collections::BTreeSet;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Duration, NaiveDate};
use clap::Args;
use serde::Serialize;

use crate::telemetry::{self};
use crate::telemetry::ops::schedule::Phase as SchedulePhase;

const START_DATE_COL: &str = "Start Date";

/// `highs schedule <CSV>`: cron lines that run the check the day after each game
#[derive(Args)]
pub struct ScheduleCmd {
    /// Exported game schedule with a "Start Date" column (M/D/YYYY)
    pub csv: PathBuf,
    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(0..24))]
    pub hour: u32,
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..60))]
    pub minute: u32,
}

#[derive(Serialize)]
struct ScheduleEntry {
    game_date: NaiveDate,
    check_date: NaiveDate,
    cron: String,
}

pub async fn run(args: ScheduleCmd) -> Result<()> {
    let log = telemetry::schedule();
    let _g = log.root_span_kv([
        ("csv", args.csv.display().to_string()),
        ("hour", args.hour.to_string()),
        ("minute", args.minute.to_string()),
    ]).entered();

    let dates = {
        let _s = log.span(&SchedulePhase::ReadCsv).entered();
        let file = std::fs::File::open(&args.csv).with_context(|| format!("open {}", args.csv.display()))?;
        game_dates(file)?
    };
    log.info(format!("📅 {} game date(s) in {}", dates.len(), args.csv.display()));

    let _s = log.span(&SchedulePhase::Cron).entered();
    let entries: Vec<ScheduleEntry> = dates
        .iter()
        .map(|&game_date| {
            let check_date = game_date + Duration::days(1);
            ScheduleEntry { game_date, check_date, cron: cron_for(check_date, args.hour, args.minute) }
        })
        .collect();

    if telemetry::config::json_mode() {
        log.result(&entries)?;
    } else {
        for e in &entries { println!("{}", e.cron); }
    }
    Ok(())
}

/// Unique game dates, sorted. Rows whose date does not parse are skipped.
pub fn game_dates<R: Read>(input: R) -> Result<BTreeSet<NaiveDate>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).trim(csv::Trim::All).from_reader(input);
    let Some(col) = rdr.headers()?.iter().position(|h| h == START_DATE_COL) else {
        bail!("schedule has no '{START_DATE_COL}' column");
    };
    let mut dates = BTreeSet::new();
    for record in rdr.records() {
        let record = record?;
        let Some(raw) = record.get(col) else { continue };
        if let Ok(d) = NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
            dates.insert(d);
        }
    }
    Ok(dates)
}

// minute hour day month day-of-week
pub fn cron_for(date: NaiveDate, hour: u32, minute: u32) -> String {
    format!("{} {} {} {} *", minute, hour, date.day(), date.month())
}
