//! HTTP gateway against the journal backend.

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{
    CanvasPayload, Envelope, ItemsPayload, PersistenceGateway, GET_CANVAS_PATH, GET_GOALS_PATH,
    GET_TODOS_PATH, SAVE_CANVAS_PATH, SAVE_ENTRY_PATH, SAVE_GOALS_PATH, SAVE_TODOS_PATH,
};
use crate::config::{normalize_base_url, ClientConfig};
use crate::error::{Error, Result};
use crate::models::{EntrySubmission, Goal, TodoItem};
use crate::util::compact_text;

/// JSON-over-HTTP gateway. No timeouts or retries are applied.
#[derive(Clone)]
pub struct HttpGateway {
    base_url: String,
    access_token: Option<String>,
    client: Client,
}

impl fmt::Debug for HttpGateway {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("HttpGateway")
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish_non_exhaustive()
    }
}

impl HttpGateway {
    /// Builds a gateway for an explicit backend URL.
    pub fn new(base_url: impl AsRef<str>, access_token: Option<String>) -> Result<Self> {
        let base_url = normalize_base_url(base_url.as_ref())?;
        let client = Client::builder().build().map_err(|error| {
            Error::NetworkFailure(format!("Failed to construct HTTP client: {error}"))
        })?;
        Ok(Self {
            base_url,
            access_token,
            client,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.require_api_base_url()?, config.access_token.clone())
    }

    /// Returns the base URL this gateway was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(reqwest::header::ACCEPT, "application/json");
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let request = self.authorize(self.client.get(format!("{}{path}", self.base_url)));
        let response = request
            .send()
            .await
            .map_err(|error| Error::NetworkFailure(format!("GET {path} failed: {error}")))?;
        let envelope = read_envelope::<T>(response, path).await?;
        if !envelope.success {
            tracing::warn!(
                path,
                error = envelope.error.as_deref().unwrap_or("unspecified"),
                "Backend declined load"
            );
        }
        Ok(envelope.into_data())
    }

    async fn submit<B: Serialize + Sync + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.authorize(self.client.post(format!("{}{path}", self.base_url)));
        let response = request
            .json(body)
            .send()
            .await
            .map_err(|error| Error::NetworkFailure(format!("POST {path} failed: {error}")))?;
        let envelope = read_envelope::<Value>(response, path).await?;
        if envelope.success {
            Ok(())
        } else {
            Err(Error::NetworkFailure(format!(
                "{path} rejected the request: {}",
                envelope.error.as_deref().unwrap_or("success=false")
            )))
        }
    }
}

async fn read_envelope<T: DeserializeOwned>(response: Response, path: &str) -> Result<Envelope<T>> {
    let status = response.status();
    let body = response.text().await.map_err(|error| {
        Error::NetworkFailure(format!("Failed to read {path} response body: {error}"))
    })?;

    serde_json::from_str::<Envelope<T>>(&body).map_err(|error| {
        if status.is_success() {
            Error::NetworkFailure(format!("Failed to parse {path} response: {error}"))
        } else {
            Error::NetworkFailure(format!(
                "{path} returned HTTP {}: {}",
                status.as_u16(),
                compact_text(&body)
            ))
        }
    })
}

#[async_trait]
impl PersistenceGateway for HttpGateway {
    async fn save_entry(&self, entry: &EntrySubmission) -> Result<()> {
        self.submit(SAVE_ENTRY_PATH, entry).await?;
        tracing::info!(date = %entry.date, blocks = entry.blocks.len(), "Entry saved");
        Ok(())
    }

    async fn get_todos(&self) -> Result<Option<Vec<TodoItem>>> {
        Ok(self
            .fetch::<ItemsPayload<TodoItem>>(GET_TODOS_PATH)
            .await?
            .map(|payload| payload.items))
    }

    async fn save_todos(&self, items: &[TodoItem]) -> Result<()> {
        self.submit(SAVE_TODOS_PATH, &serde_json::json!({ "items": items }))
            .await
    }

    async fn get_goals(&self) -> Result<Option<Vec<Goal>>> {
        Ok(self
            .fetch::<ItemsPayload<Goal>>(GET_GOALS_PATH)
            .await?
            .map(|payload| payload.items))
    }

    async fn save_goals(&self, items: &[Goal]) -> Result<()> {
        self.submit(SAVE_GOALS_PATH, &serde_json::json!({ "items": items }))
            .await
    }

    async fn get_canvas(&self) -> Result<Option<Vec<Value>>> {
        Ok(self
            .fetch::<CanvasPayload>(GET_CANVAS_PATH)
            .await?
            .and_then(|payload| payload.elements))
    }

    async fn save_canvas(&self, elements: &[Value]) -> Result<()> {
        self.submit(SAVE_CANVAS_PATH, &serde_json::json!({ "elements": elements }))
            .await
    }
}
