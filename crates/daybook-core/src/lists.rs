//! To-do, goal, and canvas editors.
//!
//! Each editor holds the in-memory list shown on its dashboard tab. Loads
//! replace the list wholesale; `collect` produces the payload for a save.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{Goal, TodoItem};

/// Ordered to-do list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an open item. Blank input is ignored and yields `None`.
    pub fn add(&mut self, text: &str) -> Option<usize> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.items.push(TodoItem::new(text));
        Some(self.items.len() - 1)
    }

    pub fn toggle(&mut self, index: usize, completed: bool) -> Result<()> {
        let item = self
            .items
            .get_mut(index)
            .ok_or_else(|| Error::NotFound(format!("to-do #{index}")))?;
        item.completed = completed;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<TodoItem> {
        if index >= self.items.len() {
            return Err(Error::NotFound(format!("to-do #{index}")));
        }
        Ok(self.items.remove(index))
    }

    pub fn replace(&mut self, items: Vec<TodoItem>) {
        self.items = items;
    }

    pub fn collect(&self) -> Vec<TodoItem> {
        self.items.clone()
    }
}

/// Ordered goal list. Untitled goals are kept while editing but never saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalList {
    items: Vec<Goal>,
}

impl GoalList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Goal] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an empty goal and return its index.
    pub fn add(&mut self) -> usize {
        self.items.push(Goal::default());
        self.items.len() - 1
    }

    pub fn update(
        &mut self,
        index: usize,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<()> {
        let goal = self
            .items
            .get_mut(index)
            .ok_or_else(|| Error::NotFound(format!("goal #{index}")))?;
        goal.title = title.into();
        goal.description = description.into();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Goal> {
        if index >= self.items.len() {
            return Err(Error::NotFound(format!("goal #{index}")));
        }
        Ok(self.items.remove(index))
    }

    pub fn replace(&mut self, items: Vec<Goal>) {
        self.items = items;
    }

    pub fn collect(&self) -> Vec<Goal> {
        self.items.iter().filter(|goal| goal.has_title()).cloned().collect()
    }
}

/// Canvas elements as stored by the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasBoard {
    elements: Vec<Value>,
}

impl CanvasBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    pub fn replace(&mut self, elements: Vec<Value>) {
        self.elements = elements;
    }

    /// Elements to send on save.
    // TODO: collect drawn elements once a drawing surface feeds the board.
    #[allow(clippy::unused_self)]
    pub fn collect(&self) -> Vec<Value> {
        Vec::new()
    }
}
