use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::Args;
use rand::Rng;
use serde::Serialize;

use crate::highs::date::strip_dates;
use crate::highs::{achievements_for, group_by_player, render, Achievement, SeasonHighRow, SeasonHighTable, TableSource};
use crate::post::{Poster, XClient, XClientConfig};
use crate::scrape::{FileTableSource, HttpTableSource, SiteConfig};
use crate::sports::{profile_for, SportProfile};
use crate::telemetry::{self};
use crate::telemetry::ctx::LogCtx;
use crate::telemetry::ops::check::{Check as CheckOp, Phase as CheckPhase};
use crate::util::time::parse_target_opt;

mod deliver;

pub use deliver::{deliver, RetryPolicy};

/// `highs check --sport softball`: announce season highs set the day before --date
#[derive(Args)]
pub struct CheckCmd {
    /// baseball | softball | soccer
    #[arg(long)] pub sport: String,
    /// Target date (YYYY-MM-DD, "today", or "Nd"); highs from the day before are reported
    #[arg(long)] pub date: Option<String>,
    /// Season year; defaults to the target date's year
    #[arg(long)] pub year: Option<i32>,
    /// Read a saved stats page instead of fetching it
    #[arg(long)] pub html: Option<PathBuf>,
    /// Post to X; without it the announcements are only printed
    #[arg(long, default_value_t = false)] pub apply: bool,
    #[arg(long, default_value_t = 3)] pub max_attempts: u32,
    #[arg(long, default_value_t = 5000)] pub backoff_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Announcement {
    pub player: String,
    pub achievements: Vec<Achievement>,
    pub text: String,
}

#[derive(Serialize)]
struct CheckPlan<'a> {
    sport: &'a str,
    year: i32,
    target_date: NaiveDate,
    url: &'a str,
    announcements: &'a [Announcement],
}

#[derive(Serialize)]
struct Delivery<'a> {
    player: &'a str,
    text: &'a str,
    post_id: Option<String>,
    error: Option<String>,
}

#[derive(Serialize)]
struct CheckApply<'a> {
    sport: &'a str,
    target_date: NaiveDate,
    posted: usize,
    failed: usize,
    deliveries: Vec<Delivery<'a>>,
}

pub async fn run(args: CheckCmd) -> Result<()> {
    let target = parse_target_opt(&args.date)?;
    let year = args.year.unwrap_or_else(|| target.year());
    let profile = profile_for(&args.sport, year)?;
    let site = SiteConfig::from_env()?;

    let log = telemetry::check();
    let _g = log.root_span_kv([
        ("sport", profile.key.to_string()),
        ("year", year.to_string()),
        ("target_date", target.to_string()),
        ("html", format!("{:?}", args.html)),
        ("apply", args.apply.to_string()),
    ]).entered();

    let rows = match &args.html {
        Some(path) => {
            let table = SeasonHighTable::new(profile.clone(), &site.base_url, FileTableSource::new(path));
            load_rows(&log, &table).await?
        }
        None => {
            let table = SeasonHighTable::new(profile.clone(), &site.base_url, HttpTableSource::new(&site)?);
            load_rows(&log, &table).await?
        }
    };

    let announcements = {
        let _s = log.span(&CheckPhase::Detect).entered();
        let mut rng = rand::thread_rng();
        announce(&profile, &rows, target, &mut rng)?
    };
    let achievement_count: usize = announcements.iter().map(|a| a.achievements.len()).sum();
    for a in announcements.iter().flat_map(|a| &a.achievements) {
        log.achievement(&a.player, &a.statistic, &a.value.to_string(), &strip_dates(&a.opponent_raw));
    }
    if announcements.is_empty() {
        log.info(format!("ℹ️  No season highs set on {}", target.pred_opt().unwrap_or(target)));
    }

    if !args.apply {
        if telemetry::config::json_mode() {
            let url = profile.stats_url(&site.base_url);
            log.plan(&CheckPlan { sport: profile.key.as_str(), year, target_date: target, url: &url, announcements: &announcements })?;
        } else {
            for a in &announcements { println!("{}\n", a.text); }
            if !announcements.is_empty() { log.info("   Use --apply to post."); }
        }
        log.totals(achievement_count, announcements.len(), 0, 0);
        return Ok(());
    }

    let x_cfg = XClientConfig::from_env();
    if x_cfg.bearer_token.is_none() && !announcements.is_empty() {
        bail!("--apply needs X_BEARER_TOKEN in the environment or .env");
    }
    let client = XClient::new(x_cfg).context("build X client")?;
    let policy = RetryPolicy { max_attempts: args.max_attempts, backoff: Duration::from_millis(args.backoff_ms) };

    let deliveries = {
        let _s = log.span(&CheckPhase::Deliver).entered();
        post_all(&log, &client, &announcements, &policy).await
    };
    let posted = deliveries.iter().filter(|d| d.post_id.is_some()).count();
    let failed = deliveries.len() - posted;
    log.totals(achievement_count, announcements.len(), posted, failed);

    if telemetry::config::json_mode() {
        log.result(&CheckApply { sport: profile.key.as_str(), target_date: target, posted, failed, deliveries })?;
    }
    if failed > 0 {
        bail!("{failed} of {} announcement(s) failed to post", announcements.len());
    }
    Ok(())
}

async fn load_rows<S: TableSource>(log: &LogCtx<CheckOp>, table: &SeasonHighTable<S>) -> Result<Vec<SeasonHighRow>> {
    let _s = log.span_kv(&CheckPhase::LoadTables, [("url", table.url().to_string())]).entered();
    let rows = table
        .rows()
        .await
        .with_context(|| format!("load {} season highs from {}", table.profile().key, table.url()))?;
    log.debug(format!("{} season-high row(s)", rows.len()));
    Ok(rows.to_vec())
}

/// Detect, group by player, render one announcement per player.
pub fn announce<R: Rng + ?Sized>(profile: &SportProfile, rows: &[SeasonHighRow], target: NaiveDate, rng: &mut R) -> Result<Vec<Announcement>> {
    let found = achievements_for(profile, rows, target);
    let mut out = Vec::new();
    for group in group_by_player(found) {
        let text = render(profile, &group.achievements, rng)?;
        out.push(Announcement { player: group.player, achievements: group.achievements, text });
    }
    Ok(out)
}

async fn post_all<'a, P: Poster + ?Sized>(
    log: &LogCtx<CheckOp>,
    poster: &P,
    announcements: &'a [Announcement],
    policy: &RetryPolicy,
) -> Vec<Delivery<'a>> {
    let mut out = Vec::with_capacity(announcements.len());
    for a in announcements {
        match deliver(poster, &a.text, policy).await {
            Ok(receipt) => {
                log.info_kv("✅ posted", [("player", a.player.clone()), ("post_id", receipt.id.clone())]);
                out.push(Delivery { player: &a.player, text: &a.text, post_id: Some(receipt.id), error: None });
            }
            Err(err) => {
                log.error_kv("❌ post failed", [("player", a.player.clone()), ("error", err.to_string())]);
                out.push(Delivery { player: &a.player, text: &a.text, post_id: None, error: Some(err.to_string()) });
            }
        }
    }
    out
}
