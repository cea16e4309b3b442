//! daybook-core - Core library for Daybook
//!
//! This crate contains the block editor, the to-do/goal list editors, media and
//! voice intake, and the persistence gateway used by every Daybook front end.

pub mod config;
pub mod editor;
pub mod error;
pub mod gateway;
pub mod lists;
pub mod media;
pub mod models;
pub mod notify;
pub mod session;
pub mod util;
pub mod voice;

pub use editor::EditorSession;
pub use error::{Error, Result};
pub use models::{BlockId, BlockKind, ContentBlock};
pub use session::{Command, DashboardSession, Outcome, Tab};
