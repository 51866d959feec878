use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::highs::{StatTable, TableSource};

mod fetch;
pub mod parse;

pub const DEFAULT_BASE_URL: &str = "https://gvsulakers.com";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Where stats pages live. Read once at startup, passed down explicitly.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        if let Ok(base) = std::env::var("HIGHS_BASE_URL") {
            url::Url::parse(&base).with_context(|| format!("HIGHS_BASE_URL is not a valid URL: {base}"))?;
            cfg.base_url = base;
        }
        if let Ok(timeout) = std::env::var("HIGHS_TIMEOUT_SECS") {
            if let Ok(parsed) = timeout.parse::<u64>() {
                cfg.timeout = Duration::from_secs(parsed);
            }
        }
        Ok(cfg)
    }
}

pub struct HttpTableSource {
    client: Client,
}

impl HttpTableSource {
    pub fn new(cfg: &SiteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(cfg.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TableSource for HttpTableSource {
    async fn fetch_tables(&self, url: &str) -> Result<Vec<StatTable>> {
        let html = fetch::fetch_page(&self.client, url).await?;
        Ok(parse::parse_tables(&html))
    }
}

/// A saved copy of a stats page; the URL is ignored.
pub struct FileTableSource {
    path: PathBuf,
}

impl FileTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TableSource for FileTableSource {
    async fn fetch_tables(&self, _url: &str) -> Result<Vec<StatTable>> {
        let html = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("read {}", self.path.display()))?;
        Ok(parse::parse_tables(&html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_source_parses_saved_page() {
        let path = std::env::temp_dir().join(format!("highs-file-source-{}.html", std::process::id()));
        tokio::fs::write(&path, "<table><tr><th>Statistic</th></tr><tr><td>Hits</td></tr></table>")
            .await
            .unwrap();
        let tables = FileTableSource::new(&path).fetch_tables("ignored").await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows, vec![vec!["Hits".to_string()]]);
    }

    #[tokio::test]
    async fn file_source_missing_file_errors() {
        let err = FileTableSource::new("/definitely/not/here.html").fetch_tables("x").await.unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.html"));
    }
}
