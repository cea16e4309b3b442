//! Block editor for journal entries.
//!
//! [`EditorSession`] owns the ordered block collection of the entry being
//! written. It is never empty: removing the last block synthesizes a fresh
//! text block. Block ids come from a counter that only moves forward until
//! [`EditorSession::reset`] starts a new entry.

use std::fmt;

use crate::error::{Error, Result};
use crate::media::MediaPayload;
use crate::models::{BlockContent, BlockId, BlockKind, ContentBlock, SerializedBlock};
use crate::util::count_words;

/// Read-only view handed to the render hook after every mutation.
#[derive(Debug, Clone, Copy)]
pub struct EditorView<'a> {
    pub title: &'a str,
    pub blocks: &'a [ContentBlock],
    pub word_count: usize,
}

/// Presentation callback invoked after each mutation.
pub type RenderHook = Box<dyn FnMut(EditorView<'_>) + Send>;

/// An id reserved for a block whose content is still being produced
/// (file read, audio capture). The block is appended on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a reserved block is only appended by `complete_block`"]
pub struct PendingBlock {
    id: BlockId,
    kind: BlockKind,
}

impl PendingBlock {
    pub const fn id(&self) -> BlockId {
        self.id
    }

    pub const fn kind(&self) -> BlockKind {
        self.kind
    }
}

/// The entry currently being edited.
pub struct EditorSession {
    title: String,
    blocks: Vec<ContentBlock>,
    next_id: u64,
    render_hook: Option<RenderHook>,
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("title", &self.title)
            .field("blocks", &self.blocks)
            .field("next_id", &self.next_id)
            .field("render_hook", &self.render_hook.is_some())
            .finish()
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Start a session holding a single empty text block.
    pub fn new() -> Self {
        let mut session = Self {
            title: String::new(),
            blocks: Vec::new(),
            next_id: 0,
            render_hook: None,
        };
        session.push_block(BlockKind::Text, None);
        session
    }

    /// Register the presentation callback and render once immediately.
    pub fn set_render_hook(&mut self, hook: impl FnMut(EditorView<'_>) + Send + 'static) {
        self.render_hook = Some(Box::new(hook));
        self.render();
    }

    pub fn clear_render_hook(&mut self) {
        self.render_hook = None;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.render();
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&ContentBlock> {
        self.blocks.iter().find(|block| block.id == id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Never true: the editor always holds at least one block.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Words across the title and all text blocks.
    pub fn word_count(&self) -> usize {
        count_words(&self.title)
            + self
                .blocks
                .iter()
                .filter_map(ContentBlock::text)
                .map(count_words)
                .sum::<usize>()
    }

    /// True when there is no title and every block is an empty text block.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.blocks.iter().all(ContentBlock::is_blank)
    }

    /// Append a block of `kind` with default content and return its id.
    ///
    /// Media kinds take `initial_payload` as their attachment; text ignores it.
    pub fn add_block(&mut self, kind: BlockKind, initial_payload: Option<MediaPayload>) -> BlockId {
        let id = self.push_block(kind, initial_payload);
        tracing::debug!(block_id = %id, kind = %kind, "Added block");
        self.render();
        id
    }

    /// Append a text block pre-filled with `text`.
    pub fn add_text_block(&mut self, text: impl Into<String>) -> BlockId {
        let id = self.allocate_id();
        self.blocks.push(ContentBlock::new(
            id,
            BlockContent::Text { text: text.into() },
        ));
        self.render();
        id
    }

    /// Reserve an id for a block that will be appended once its content is ready.
    pub fn reserve_block(&mut self, kind: BlockKind) -> PendingBlock {
        PendingBlock {
            id: self.allocate_id(),
            kind,
        }
    }

    /// Append a previously reserved block.
    ///
    /// Blocks land in completion order, not reservation order.
    /// A reservation that predates a [`reset`](Self::reset) may get a new id
    /// if its old one is taken in the new session.
    pub fn complete_block(&mut self, pending: PendingBlock, payload: MediaPayload) -> BlockId {
        let id = if self.block(pending.id).is_some() {
            self.allocate_id()
        } else {
            self.next_id = self.next_id.max(pending.id.value() + 1);
            pending.id
        };
        self.blocks.push(ContentBlock::new(
            id,
            BlockContent::for_kind(pending.kind, Some(payload)),
        ));
        tracing::debug!(block_id = %id, kind = %pending.kind, "Completed pending block");
        self.render();
        id
    }

    /// Remove a block; an empty collection gets a fresh text block.
    pub fn remove_block(&mut self, id: BlockId) -> Result<()> {
        let index = self
            .blocks
            .iter()
            .position(|block| block.id == id)
            .ok_or_else(|| Error::NotFound(format!("block {id}")))?;
        self.blocks.remove(index);

        if self.blocks.is_empty() {
            self.push_block(BlockKind::Text, None);
        }
        self.render();
        Ok(())
    }

    /// Replace the text of a text block.
    pub fn update_text(&mut self, id: BlockId, text: impl Into<String>) -> Result<()> {
        let slot = self
            .blocks
            .iter_mut()
            .find(|block| block.id == id)
            .and_then(ContentBlock::text_mut)
            .ok_or_else(|| Error::NotFound(format!("text block {id}")))?;
        *slot = text.into();
        self.render();
        Ok(())
    }

    /// Replace the caption of a non-text block.
    pub fn update_caption(&mut self, id: BlockId, caption: impl Into<String>) -> Result<()> {
        let slot = self
            .blocks
            .iter_mut()
            .find(|block| block.id == id)
            .and_then(ContentBlock::caption_mut)
            .ok_or_else(|| Error::NotFound(format!("captioned block {id}")))?;
        *slot = caption.into();
        self.render();
        Ok(())
    }

    /// Submission projection: `{type, text, caption}` per block, in order.
    pub fn serialize(&self) -> Vec<SerializedBlock> {
        self.blocks
            .iter()
            .map(|block| serialize_block(block, false))
            .collect()
    }

    /// Like [`serialize`](Self::serialize) but also carries `url`,
    /// `fileName` and `fileSize` for attachment blocks.
    pub fn serialize_with_media(&self) -> Vec<SerializedBlock> {
        self.blocks
            .iter()
            .map(|block| serialize_block(block, true))
            .collect()
    }

    /// Drop the title and all blocks, restart ids, and add one empty text block.
    pub fn reset(&mut self) {
        self.title.clear();
        self.blocks.clear();
        self.next_id = 0;
        self.push_block(BlockKind::Text, None);
        tracing::debug!("Editor reset");
        self.render();
    }

    fn allocate_id(&mut self) -> BlockId {
        let id = BlockId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn push_block(&mut self, kind: BlockKind, payload: Option<MediaPayload>) -> BlockId {
        let id = self.allocate_id();
        self.blocks
            .push(ContentBlock::new(id, BlockContent::for_kind(kind, payload)));
        id
    }

    fn render(&mut self) {
        let word_count = self.word_count();
        if let Some(hook) = self.render_hook.as_mut() {
            hook(EditorView {
                title: &self.title,
                blocks: &self.blocks,
                word_count,
            });
        }
    }
}

fn serialize_block(block: &ContentBlock, include_media: bool) -> SerializedBlock {
    let mut serialized = SerializedBlock {
        kind: block.kind(),
        text: block.text().unwrap_or_default().to_string(),
        caption: block.caption().unwrap_or_default().to_string(),
        url: None,
        file_name: None,
        file_size: None,
    };
    if !include_media {
        return serialized;
    }

    match &block.content {
        BlockContent::Text { .. } => {}
        BlockContent::Image(media) | BlockContent::Video(media) | BlockContent::Voice(media) => {
            serialized.url = Some(
                media
                    .payload
                    .as_ref()
                    .map(|payload| payload.data_uri.clone())
                    .unwrap_or_default(),
            );
            serialized.file_name = media
                .payload
                .as_ref()
                .map(|payload| payload.file_name.clone());
        }
        BlockContent::Document(document) => {
            serialized.url = Some(
                document
                    .payload
                    .as_ref()
                    .map(|payload| payload.data_uri.clone())
                    .unwrap_or_default(),
            );
            serialized.file_name = Some(document.file_name.clone());
            serialized.file_size = Some(document.file_size.clone());
        }
    }
    serialized
}
