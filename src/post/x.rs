use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use super::{PostError, PostReceipt, Poster};

const DEFAULT_BASE_URL: &str = "https://api.twitter.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Credentials and endpoint for the X API, built once at the CLI boundary.
#[derive(Clone, Debug)]
pub struct XClientConfig {
    /// OAuth 2.0 user-context access token with `tweet.write` scope.
    pub bearer_token: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for XClientConfig {
    fn default() -> Self {
        Self {
            bearer_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl XClientConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.bearer_token = std::env::var("X_BEARER_TOKEN").ok().filter(|t| !t.trim().is_empty());
        if let Ok(base) = std::env::var("X_API_BASE_URL") {
            cfg.base_url = base;
        }
        if let Ok(timeout) = std::env::var("X_TIMEOUT_SECS") {
            if let Ok(parsed) = timeout.parse::<u64>() {
                cfg.timeout = Duration::from_secs(parsed);
            }
        }
        cfg
    }
}

#[derive(Clone)]
pub struct XClient {
    http: HttpClient,
    cfg: XClientConfig,
}

impl XClient {
    pub fn new(cfg: XClientConfig) -> Result<Self, PostError> {
        let http = HttpClient::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(PostError::from_reqwest)?;
        Ok(Self { http, cfg })
    }

    fn endpoint(&self) -> String {
        format!("{}/2/tweets", self.cfg.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Poster for XClient {
    async fn post(&self, text: &str) -> Result<PostReceipt, PostError> {
        if text.trim().is_empty() {
            return Err(PostError::EmptyText);
        }
        let token = self.cfg.bearer_token.as_deref().ok_or(PostError::MissingToken)?;

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(token)
            .json(&ApiCreateTweet { text })
            .send()
            .await
            .map_err(PostError::from_reqwest)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(PostError::from_reqwest)?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ApiProblem>(&bytes)
                .ok()
                .and_then(ApiProblem::into_detail)
                .unwrap_or_else(|| String::from_utf8_lossy(&bytes).trim().to_string());
            return Err(PostError::Api { status, detail });
        }

        let parsed: ApiCreateTweetResponse = serde_json::from_slice(&bytes).map_err(PostError::Decode)?;
        Ok(PostReceipt { id: parsed.data.id })
    }
}

#[derive(Debug, Serialize)]
struct ApiCreateTweet<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiCreateTweetResponse {
    data: ApiTweet,
}

#[derive(Debug, Deserialize)]
struct ApiTweet {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiProblem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    errors: Vec<ApiProblemItem>,
}

#[derive(Debug, Deserialize)]
struct ApiProblemItem {
    #[serde(default)]
    message: Option<String>,
}

impl ApiProblem {
    fn into_detail(self) -> Option<String> {
        self.detail
            .or_else(|| self.errors.into_iter().find_map(|e| e.message))
            .or(self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(token: Option<&str>) -> XClient {
        XClient::new(XClientConfig {
            bearer_token: token.map(str::to_string),
            base_url: "http://127.0.0.1:9/".into(),
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        assert_eq!(client(None).endpoint(), "http://127.0.0.1:9/2/tweets");
    }

    #[tokio::test]
    async fn missing_token_fails_before_any_request() {
        let err = client(None).post("hello").await.unwrap_err();
        assert!(matches!(err, PostError::MissingToken));
    }

    #[tokio::test]
    async fn empty_text_is_rejected() {
        let err = client(Some("t")).post("   ").await.unwrap_err();
        assert!(matches!(err, PostError::EmptyText));
    }

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(ApiCreateTweet { text: "hi" }).unwrap();
        assert_eq!(body, serde_json::json!({ "text": "hi" }));
    }

    #[test]
    fn problem_detail_preference() {
        let p: ApiProblem = serde_json::from_str(r#"{"title":"Forbidden","detail":"You are not allowed to create a Tweet with duplicate content."}"#).unwrap();
        assert_eq!(p.into_detail().unwrap(), "You are not allowed to create a Tweet with duplicate content.");
        let p: ApiProblem = serde_json::from_str(r#"{"errors":[{"message":"Too Many Requests"}]}"#).unwrap();
        assert_eq!(p.into_detail().unwrap(), "Too Many Requests");
    }

    #[test]
    fn create_response_decodes_id() {
        let r: ApiCreateTweetResponse = serde_json::from_str(r#"{"data":{"id":"1445880548472328192","text":"hi"}}"#).unwrap();
        assert_eq!(r.data.id, "1445880548472328192");
    }
}
