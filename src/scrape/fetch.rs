use anyhow::{Context, Result};
use reqwest::Client;

pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let resp = client.get(url).send().await.with_context(|| format!("GET {url}"))?;
    let resp = resp.error_for_status().with_context(|| format!("GET {url}"))?;
    let text = resp.text().await?;
    Ok(text)
}
