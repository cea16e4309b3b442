//! Content block model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::media::{format_file_size, MediaPayload};

/// Session-scoped block identifier, assigned monotonically by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(u64);

impl BlockId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BlockId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// The kind of content a block holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    #[default]
    Text,
    Image,
    Video,
    Voice,
    Document,
}

impl BlockKind {
    pub const ALL: [Self; 5] = [
        Self::Text,
        Self::Image,
        Self::Video,
        Self::Voice,
        Self::Document,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Voice => "voice",
            Self::Document => "document",
        }
    }

    /// Kinds whose payload is an inline data reference (image/video/voice).
    #[must_use]
    pub const fn carries_payload(self) -> bool {
        matches!(self, Self::Image | Self::Video | Self::Voice)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown block kind: {s}")))
    }
}

/// Image, video, or voice content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaContent {
    /// Inline data reference; `None` until a file has been attached.
    pub payload: Option<MediaPayload>,
    pub caption: String,
}

/// Document attachment metadata. The document bytes are kept only when attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentContent {
    pub file_name: String,
    /// Human-readable size such as `1.5 KB`.
    pub file_size: String,
    pub payload: Option<MediaPayload>,
    pub caption: String,
}

/// Kind-specific content of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    Text { text: String },
    Image(MediaContent),
    Video(MediaContent),
    Voice(MediaContent),
    Document(DocumentContent),
}

impl BlockContent {
    /// Default content for a kind, optionally seeded with a payload.
    ///
    /// Text blocks ignore the payload.
    #[must_use]
    pub fn for_kind(kind: BlockKind, payload: Option<MediaPayload>) -> Self {
        match kind {
            BlockKind::Text => Self::Text {
                text: String::new(),
            },
            BlockKind::Image => Self::Image(MediaContent {
                payload,
                caption: String::new(),
            }),
            BlockKind::Video => Self::Video(MediaContent {
                payload,
                caption: String::new(),
            }),
            BlockKind::Voice => Self::Voice(MediaContent {
                payload,
                caption: String::new(),
            }),
            BlockKind::Document => {
                let (file_name, file_size) = payload.as_ref().map_or_else(
                    || (String::new(), String::new()),
                    |payload| {
                        (
                            payload.file_name.clone(),
                            format_file_size(payload.size_bytes),
                        )
                    },
                );
                Self::Document(DocumentContent {
                    file_name,
                    file_size,
                    payload,
                    caption: String::new(),
                })
            }
        }
    }

    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        match self {
            Self::Text { .. } => BlockKind::Text,
            Self::Image(_) => BlockKind::Image,
            Self::Video(_) => BlockKind::Video,
            Self::Voice(_) => BlockKind::Voice,
            Self::Document(_) => BlockKind::Document,
        }
    }
}

/// A single block of a journal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub id: BlockId,
    pub content: BlockContent,
}

impl ContentBlock {
    #[must_use]
    pub const fn new(id: BlockId, content: BlockContent) -> Self {
        Self { id, content }
    }

    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        self.content.kind()
    }

    /// Text of a text block; `None` for every other kind.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            BlockContent::Text { text } => Some(text),
            _ => None,
        }
    }

    pub(crate) fn text_mut(&mut self) -> Option<&mut String> {
        match &mut self.content {
            BlockContent::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Caption of a non-text block; `None` for text blocks.
    #[must_use]
    pub fn caption(&self) -> Option<&str> {
        match &self.content {
            BlockContent::Text { .. } => None,
            BlockContent::Image(media) | BlockContent::Video(media) | BlockContent::Voice(media) => {
                Some(&media.caption)
            }
            BlockContent::Document(document) => Some(&document.caption),
        }
    }

    pub(crate) fn caption_mut(&mut self) -> Option<&mut String> {
        match &mut self.content {
            BlockContent::Text { .. } => None,
            BlockContent::Image(media) | BlockContent::Video(media) | BlockContent::Voice(media) => {
                Some(&mut media.caption)
            }
            BlockContent::Document(document) => Some(&mut document.caption),
        }
    }

    /// Attached payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&MediaPayload> {
        match &self.content {
            BlockContent::Text { .. } => None,
            BlockContent::Image(media) | BlockContent::Video(media) | BlockContent::Voice(media) => {
                media.payload.as_ref()
            }
            BlockContent::Document(document) => document.payload.as_ref(),
        }
    }

    /// An empty text block contributes nothing to an entry.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text().is_some_and(|text| text.trim().is_empty())
    }
}
