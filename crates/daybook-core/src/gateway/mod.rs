//! Persistence gateway.
//!
//! The backend speaks JSON envelopes `{success, data?}` over seven routes.
//! [`PersistenceGateway`] abstracts them so the dashboard session can run
//! against [`HttpGateway`] in production and [`MemoryGateway`] in tests.

mod http;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{EntrySubmission, Goal, TodoItem};
use crate::Result;

pub use http::HttpGateway;
pub use memory::MemoryGateway;

pub const SAVE_ENTRY_PATH: &str = "/api/save-entry";
pub const GET_TODOS_PATH: &str = "/api/get-todos";
pub const SAVE_TODOS_PATH: &str = "/api/save-todos";
pub const GET_GOALS_PATH: &str = "/api/get-goals";
pub const SAVE_GOALS_PATH: &str = "/api/save-goals";
pub const GET_CANVAS_PATH: &str = "/api/get-canvas";
pub const SAVE_CANVAS_PATH: &str = "/api/save-canvas";

/// Response wrapper shared by every route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Backend error text, when it sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Payload of a successful response; `None` when the backend declined.
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

/// `{items: [...]}` body used by the to-do and goal routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsPayload<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// `{elements: [...]}` body used by the canvas routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasPayload {
    #[serde(default)]
    pub elements: Option<Vec<Value>>,
}

/// Load/save operations against the journal backend.
///
/// Loads return `Ok(None)` when the backend answers without usable data; the
/// caller keeps what it already shows. Saves fail with `NetworkFailure` when
/// the request fails or the backend reports `success: false`.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Persist one journal entry. Entries are write-only.
    async fn save_entry(&self, entry: &EntrySubmission) -> Result<()>;

    async fn get_todos(&self) -> Result<Option<Vec<TodoItem>>>;

    async fn save_todos(&self, items: &[TodoItem]) -> Result<()>;

    async fn get_goals(&self) -> Result<Option<Vec<Goal>>>;

    async fn save_goals(&self, items: &[Goal]) -> Result<()>;

    async fn get_canvas(&self) -> Result<Option<Vec<Value>>>;

    async fn save_canvas(&self, elements: &[Value]) -> Result<()>;
}
