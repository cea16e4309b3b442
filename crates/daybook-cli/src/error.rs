use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] daybook_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid block '{spec}': {reason}")]
    InvalidBlock { spec: String, reason: String },
    #[error("No to-do text provided")]
    EmptyTodo,
    #[error("Positions start at 1")]
    InvalidIndex,
    #[error("Backend returned no {0}; nothing was changed")]
    LoadDeclined(&'static str),
    #[error("Configuration error: {0}")]
    Config(String),
}
