//! Remote collection adapter.
//!
//! The remote side is a JSONPlaceholder-style `/posts` collection. Items are
//! mapped to quotes by title; the body is ignored.

use crate::model::quote::{Quote, QuoteOrigin};
use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Category assigned to quotes contributed by the remote collection.
pub const REMOTE_CATEGORY: &str = "remote";

const DEFAULT_USER_ID: u64 = 1;

pub type RemoteResult<T> = Result<T, RemoteError>;

#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport failure, including timeouts.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// Body could not be decoded into the expected shape.
    #[error("malformed remote payload: {0}")]
    Decode(String),
}

/// Item as listed by the remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
}

/// Body sent when publishing a local quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

impl PostPayload {
    pub fn from_quote(quote: &Quote) -> Self {
        Self {
            title: quote.text.clone(),
            body: quote.category.clone(),
            user_id: DEFAULT_USER_ID,
        }
    }
}

/// Acknowledgement returned after a post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostReceipt {
    #[serde(default)]
    pub id: Option<u64>,
}

/// Remote collection contract.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch_list(&self, limit: u32) -> RemoteResult<Vec<RemoteItem>>;
    async fn post_item(&self, payload: &PostPayload) -> RemoteResult<PostReceipt>;
}

/// Converts fetched items to remote quotes, skipping blank titles.
pub fn items_to_quotes(items: Vec<RemoteItem>) -> Vec<Quote> {
    let now = chrono::Utc::now().timestamp_millis();
    items
        .into_iter()
        .filter_map(|item| {
            match Quote::unstamped(&item.title, REMOTE_CATEGORY, QuoteOrigin::Remote) {
                Ok(mut quote) => {
                    quote.created_at = Some(now);
                    Some(quote)
                }
                Err(err) => {
                    warn!(
                        "event=remote_item_skip module=sync status=skipped item_id={} reason={}",
                        item.id, err
                    );
                    None
                }
            }
        })
        .collect()
}

/// HTTP implementation of [`RemoteSource`].
#[derive(Debug, Clone)]
pub struct HttpRemoteSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRemoteSource {
    /// Builds a client for `endpoint` (for example
    /// `https://jsonplaceholder.typicode.com/posts`).
    pub fn new(endpoint: &str, timeout: Duration) -> RemoteResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn read_body<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> RemoteResult<T> {
        let status = response.status();
        let body = response.text().await?;
        debug!("event=remote_response module=sync status={} bytes={}", status, body.len());

        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|err| RemoteError::Decode(err.to_string()))
    }
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    async fn fetch_list(&self, limit: u32) -> RemoteResult<Vec<RemoteItem>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("_limit", limit)])
            .send()
            .await?;
        Self::read_body(response).await
    }

    async fn post_item(&self, payload: &PostPayload) -> RemoteResult<PostReceipt> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await?;
        Self::read_body(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::{items_to_quotes, PostPayload, RemoteItem, REMOTE_CATEGORY};
    use crate::model::quote::{Quote, QuoteOrigin};

    #[test]
    fn items_map_to_remote_quotes_and_blank_titles_are_skipped() {
        let items = vec![
            RemoteItem {
                id: 1,
                title: " sunt aut facere ".to_string(),
                body: Some("quia et suscipit".to_string()),
            },
            RemoteItem {
                id: 2,
                title: "   ".to_string(),
                body: None,
            },
        ];

        let quotes = items_to_quotes(items);
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].text, "sunt aut facere");
        assert_eq!(quotes[0].category, REMOTE_CATEGORY);
        assert_eq!(quotes[0].origin, QuoteOrigin::Remote);
        assert!(quotes[0].created_at.is_some());
    }

    #[test]
    fn remote_item_body_is_optional() {
        let item: RemoteItem = serde_json::from_str(r#"{"id":3,"title":"qui est esse"}"#).unwrap();
        assert_eq!(item.body, None);
    }

    #[test]
    fn post_payload_uses_camel_case_user_id() {
        let quote = Quote::unstamped("Be bold", "courage", QuoteOrigin::Local).unwrap();
        let value = serde_json::to_value(PostPayload::from_quote(&quote)).unwrap();
        assert_eq!(value["title"], "Be bold");
        assert_eq!(value["body"], "courage");
        assert_eq!(value["userId"], 1);
    }
}
