use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::PersistenceGateway;
use crate::error::{Error, Result};
use crate::models::{EntrySubmission, Goal, TodoItem};

#[derive(Debug, Default)]
struct State {
    entries: Vec<EntrySubmission>,
    todos: Vec<TodoItem>,
    goals: Vec<Goal>,
    canvas: Vec<Value>,
    offline: bool,
}

/// In-process gateway that keeps everything in memory.
///
/// Clones share the same store, so a test can hand one clone to a session
/// and inspect what was saved through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    state: Arc<Mutex<State>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_todos(self, todos: Vec<TodoItem>) -> Self {
        self.state.lock().await.todos = todos;
        self
    }

    pub async fn with_goals(self, goals: Vec<Goal>) -> Self {
        self.state.lock().await.goals = goals;
        self
    }

    pub async fn with_canvas(self, elements: Vec<Value>) -> Self {
        self.state.lock().await.canvas = elements;
        self
    }

    /// While offline every call fails with `NetworkFailure`.
    pub async fn set_offline(&self, offline: bool) {
        self.state.lock().await.offline = offline;
    }

    pub async fn entries(&self) -> Vec<EntrySubmission> {
        self.state.lock().await.entries.clone()
    }

    pub async fn todos(&self) -> Vec<TodoItem> {
        self.state.lock().await.todos.clone()
    }

    pub async fn goals(&self) -> Vec<Goal> {
        self.state.lock().await.goals.clone()
    }

    pub async fn canvas(&self) -> Vec<Value> {
        self.state.lock().await.canvas.clone()
    }
}

fn ensure_online(state: &State, operation: &str) -> Result<()> {
    if state.offline {
        return Err(Error::NetworkFailure(format!(
            "{operation} failed: backend unreachable"
        )));
    }
    Ok(())
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn save_entry(&self, entry: &EntrySubmission) -> Result<()> {
        let mut state = self.state.lock().await;
        ensure_online(&state, "save_entry")?;
        state.entries.push(entry.clone());
        Ok(())
    }

    async fn get_todos(&self) -> Result<Option<Vec<TodoItem>>> {
        let state = self.state.lock().await;
        ensure_online(&state, "get_todos")?;
        Ok(Some(state.todos.clone()))
    }

    async fn save_todos(&self, items: &[TodoItem]) -> Result<()> {
        let mut state = self.state.lock().await;
        ensure_online(&state, "save_todos")?;
        state.todos = items.to_vec();
        Ok(())
    }

    async fn get_goals(&self) -> Result<Option<Vec<Goal>>> {
        let state = self.state.lock().await;
        ensure_online(&state, "get_goals")?;
        Ok(Some(state.goals.clone()))
    }

    async fn save_goals(&self, items: &[Goal]) -> Result<()> {
        let mut state = self.state.lock().await;
        ensure_online(&state, "save_goals")?;
        state.goals = items.to_vec();
        Ok(())
    }

    async fn get_canvas(&self) -> Result<Option<Vec<Value>>> {
        let state = self.state.lock().await;
        ensure_online(&state, "get_canvas")?;
        Ok(Some(state.canvas.clone()))
    }

    async fn save_canvas(&self, elements: &[Value]) -> Result<()> {
        let mut state = self.state.lock().await;
        ensure_online(&state, "save_canvas")?;
        state.canvas = elements.to_vec();
        Ok(())
    }
}
