//! Data models for Daybook

mod block;
mod entry;
mod list_item;

pub use block::{BlockContent, BlockId, BlockKind, ContentBlock, DocumentContent, MediaContent};
pub use entry::{EntrySubmission, SerializedBlock};
pub use list_item::{Goal, TodoItem};
