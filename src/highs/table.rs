use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::OnceCell;

use crate::sports::SportProfile;

pub const COL_STATISTIC: &str = "Statistic";
pub const COL_HIGH: &str = "High";
pub const COL_PLAYER: &str = "Player";
pub const COL_OPPONENT: &str = "Opponent";

const HOLDER_SEP: &str = "; ";

/// One table from a stats page: header names plus string cells per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl StatTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
    }
}

/// Record value exactly as published ("3", "7.1", "1,204").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatValue(pub String);

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holder {
    pub player: String,
    pub opponent_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonHighRow {
    pub statistic: String,
    pub high_value: StatValue,
    pub holders: Vec<Holder>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Player and opponent fields split into a different number of holders.
    MalformedRow { table: usize, statistic: String, players: usize, opponents: usize },
    MissingColumn { table: usize, column: &'static str },
    MissingTable { table: usize, available: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::MalformedRow { table, statistic, players, opponents } => write!(
                f,
                "malformed season-high row '{statistic}' in table {table}: {players} player(s) but {opponents} opponent(s)"
            ),
            TableError::MissingColumn { table, column } => {
                write!(f, "table {table} has no '{column}' column")
            }
            TableError::MissingTable { table, available } => {
                write!(f, "season-high table {table} not found (page has {available} tables)")
            }
        }
    }
}

impl std::error::Error for TableError {}

struct Columns {
    statistic: usize,
    high: usize,
    player: usize,
    opponent: usize,
}

impl Columns {
    fn locate(idx: usize, table: &StatTable) -> Result<Self, TableError> {
        let find = |column: &'static str| {
            table.column(column).ok_or(TableError::MissingColumn { table: idx, column })
        };
        Ok(Columns {
            statistic: find(COL_STATISTIC)?,
            high: find(COL_HIGH)?,
            player: find(COL_PLAYER)?,
            opponent: find(COL_OPPONENT)?,
        })
    }
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.trim()).unwrap_or("")
}

fn parse_row(table: usize, cols: &Columns, row: &[String]) -> Result<SeasonHighRow, TableError> {
    let statistic = cell(row, cols.statistic).to_string();
    let players: Vec<&str> = cell(row, cols.player).split(HOLDER_SEP).collect();
    let opponents: Vec<&str> = cell(row, cols.opponent).split(HOLDER_SEP).collect();
    if players.len() != opponents.len() {
        return Err(TableError::MalformedRow {
            table,
            statistic,
            players: players.len(),
            opponents: opponents.len(),
        });
    }
    let holders = players
        .into_iter()
        .zip(opponents)
        .map(|(p, o)| Holder { player: p.trim().to_string(), opponent_text: o.trim().to_string() })
        .collect();
    Ok(SeasonHighRow {
        statistic,
        high_value: StatValue(cell(row, cols.high).to_string()),
        holders,
    })
}

/// Season-high rows from the tables `profile.table_selector` points at,
/// concatenated in page order.
pub fn load(profile: &SportProfile, tables: &[StatTable]) -> Result<Vec<SeasonHighRow>, TableError> {
    if let Some(&missing) = profile.table_selector.iter().find(|&&i| i >= tables.len()) {
        return Err(TableError::MissingTable { table: missing, available: tables.len() });
    }
    let mut out = Vec::new();
    for (idx, table) in tables.iter().enumerate() {
        if !profile.table_selector.contains(&idx) { continue; }
        let cols = Columns::locate(idx, table)?;
        for row in &table.rows {
            if row.iter().all(|c| c.trim().is_empty()) { continue; }
            out.push(parse_row(idx, &cols, row)?);
        }
    }
    Ok(out)
}

/// Supplies the tables of a stats page (HTTP, local file, fixtures).
#[async_trait]
pub trait TableSource: Send + Sync {
    async fn fetch_tables(&self, url: &str) -> Result<Vec<StatTable>>;
}

/// Season-high leaderboard for one sport-year, fetched on first access
/// and cached for the lifetime of the instance.
pub struct SeasonHighTable<S: TableSource> {
    profile: SportProfile,
    url: String,
    source: S,
    rows: OnceCell<Vec<SeasonHighRow>>,
}

impl<S: TableSource> SeasonHighTable<S> {
    pub fn new(profile: SportProfile, base_url: &str, source: S) -> Self {
        let url = profile.stats_url(base_url);
        Self { profile, url, source, rows: OnceCell::new() }
    }

    pub fn profile(&self) -> &SportProfile { &self.profile }

    pub fn url(&self) -> &str { &self.url }

    pub fn source(&self) -> &S { &self.source }

    pub async fn rows(&self) -> Result<&[SeasonHighRow]> {
        let rows = self
            .rows
            .get_or_try_init(|| async {
                let tables = self.source.fetch_tables(&self.url).await?;
                let rows = load(&self.profile, &tables)?;
                Ok::<_, anyhow::Error>(rows)
            })
            .await?;
        Ok(rows.as_slice())
    }
}
