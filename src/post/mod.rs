use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

pub mod x;

pub use x::{XClient, XClientConfig};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostReceipt {
    pub id: String,
}

#[async_trait]
pub trait Poster: Send + Sync {
    async fn post(&self, text: &str) -> Result<PostReceipt, PostError>;
}

#[derive(Debug)]
pub enum PostError {
    MissingToken,
    EmptyText,
    Http(reqwest::Error),
    Timeout,
    Api { status: StatusCode, detail: String },
    Decode(serde_json::Error),
    MockQueueEmpty,
}

impl PostError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() { PostError::Timeout } else { PostError::Http(err) }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            PostError::Timeout => true,
            PostError::Http(_) => true,
            PostError::Api { status, .. } => status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS,
            PostError::MissingToken
            | PostError::EmptyText
            | PostError::Decode(_)
            | PostError::MockQueueEmpty => false,
        }
    }
}

impl std::fmt::Display for PostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostError::MissingToken => write!(f, "X_BEARER_TOKEN is not set"),
            PostError::EmptyText => write!(f, "refusing to post empty text"),
            PostError::Http(err) => write!(f, "http error: {err}"),
            PostError::Timeout => write!(f, "request timed out"),
            PostError::Api { status, detail } => write!(f, "api error {status}: {detail}"),
            PostError::Decode(err) => write!(f, "decode error: {err}"),
            PostError::MockQueueEmpty => write!(f, "mock poster response queue is empty"),
        }
    }
}

impl std::error::Error for PostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PostError::Http(err) => Some(err),
            PostError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

/// Records every post and replays queued outcomes in order.
#[derive(Debug, Default)]
pub struct MockPoster {
    responses: Mutex<VecDeque<Result<PostReceipt, PostError>>>,
    calls: Mutex<Vec<String>>,
}

impl MockPoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, resp: Result<PostReceipt, PostError>) {
        self.responses.lock().unwrap().push_back(resp);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Poster for MockPoster {
    async fn post(&self, text: &str) -> Result<PostReceipt, PostError> {
        self.calls.lock().unwrap().push(text.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(PostError::MockQueueEmpty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_enqueued_responses_in_order() {
        let mock = MockPoster::new();
        mock.push_response(Ok(PostReceipt { id: "1".into() }));
        mock.push_response(Err(PostError::Timeout));

        assert_eq!(mock.post("first").await.unwrap().id, "1");
        assert!(matches!(mock.post("second").await, Err(PostError::Timeout)));
        assert!(matches!(mock.post("third").await, Err(PostError::MockQueueEmpty)));
        assert_eq!(mock.calls(), vec!["first", "second", "third"]);
    }

    #[test]
    fn retryable_classification() {
        assert!(PostError::Timeout.is_retryable());
        assert!(PostError::Api { status: StatusCode::SERVICE_UNAVAILABLE, detail: "down".into() }.is_retryable());
        assert!(PostError::Api { status: StatusCode::TOO_MANY_REQUESTS, detail: "slow down".into() }.is_retryable());
        assert!(!PostError::Api { status: StatusCode::FORBIDDEN, detail: "duplicate".into() }.is_retryable());
        assert!(!PostError::MissingToken.is_retryable());
    }

    #[test]
    fn api_error_display_includes_status() {
        let err = PostError::Api { status: StatusCode::FORBIDDEN, detail: "duplicate content".into() };
        assert_eq!(format!("{err}"), "api error 403 Forbidden: duplicate content");
    }
}
