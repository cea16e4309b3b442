//! Media intake for attachment blocks.
//!
//! Files picked by the user are read once, encoded as base64 data URIs, and
//! handed to the editor as a [`MediaPayload`]. Nothing here uploads bytes.

use std::fmt;
use std::path::Path;

use base64::prelude::{Engine as _, BASE64_STANDARD};

use crate::error::{Error, Result};
use crate::models::BlockKind;

const FILE_SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Inline binary reference carried by image, video, voice, and document blocks.
#[derive(Clone, PartialEq, Eq)]
pub struct MediaPayload {
    /// `data:<mime>;base64,<bytes>` reference.
    pub data_uri: String,
    /// Original file name.
    pub file_name: String,
    /// Size of the decoded bytes.
    pub size_bytes: u64,
}

impl fmt::Debug for MediaPayload {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MediaPayload")
            .field("data_uri", &format_args!("<{} chars>", self.data_uri.len()))
            .field("file_name", &self.file_name)
            .field("size_bytes", &self.size_bytes)
            .finish()
    }
}

impl MediaPayload {
    /// Build a payload from raw bytes.
    pub fn from_bytes(file_name: impl Into<String>, mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            data_uri: encode_data_uri(mime_type, bytes),
            file_name: file_name.into(),
            size_bytes: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
        }
    }

    /// MIME type declared in the data URI, if well-formed.
    pub fn mime_type(&self) -> Option<&str> {
        self.data_uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .map(|(mime, _)| mime)
    }
}

/// A file read from disk, ready to become a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    /// Read a file and infer its MIME type from the extension.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::InvalidInput(format!("Path has no file name: {}", path.display()))
            })?;
        let bytes = tokio::fs::read(path).await?;
        let mime_type = infer_mime_type(None, &file_name);
        tracing::debug!(file_name = %file_name, mime_type = %mime_type, size = bytes.len(), "Read media file");

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    /// Block kind implied by the MIME type.
    pub fn kind(&self) -> BlockKind {
        kind_for_mime(&self.mime_type)
    }

    pub fn formatted_size(&self) -> String {
        format_file_size(u64::try_from(self.bytes.len()).unwrap_or(u64::MAX))
    }

    pub fn into_payload(self) -> MediaPayload {
        MediaPayload::from_bytes(self.file_name, &self.mime_type, &self.bytes)
    }
}

/// Encode bytes as a base64 data URI.
pub fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    let encoded = BASE64_STANDARD.encode(bytes);
    format!("data:{mime_type};base64,{encoded}")
}

/// Decode the bytes of a base64 data URI.
pub fn decode_data_uri(data_uri: &str) -> Result<Vec<u8>> {
    let (_, encoded) = data_uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .ok_or_else(|| Error::InvalidInput("Not a base64 data URI".to_string()))?;
    BASE64_STANDARD
        .decode(encoded)
        .map_err(|error| Error::InvalidInput(format!("Invalid base64 payload: {error}")))
}

/// Pick a MIME type from an explicit content type or the file extension.
///
/// `application/octet-stream` hints are ignored in favor of the extension.
pub fn infer_mime_type(content_type: Option<&str>, file_name: &str) -> String {
    if let Some(content_type) = content_type {
        let trimmed = content_type.trim();
        if !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("application/octet-stream") {
            return trimmed.to_string();
        }
    }

    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Map a MIME type to the block kind that renders it.
pub fn kind_for_mime(mime_type: &str) -> BlockKind {
    let mime_type = mime_type.trim().to_ascii_lowercase();
    if mime_type.starts_with("image/") {
        BlockKind::Image
    } else if mime_type.starts_with("video/") {
        BlockKind::Video
    } else if mime_type.starts_with("audio/") {
        BlockKind::Voice
    } else {
        BlockKind::Document
    }
}

/// Human-readable size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `2 MB`.
///
/// Values are rounded to two decimals and never go beyond GB.
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut divisor = 1_u64;
    while unit + 1 < FILE_SIZE_UNITS.len() && bytes >= divisor * 1024 {
        divisor *= 1024;
        unit += 1;
    }

    let value = bytes as f64 / divisor as f64;
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", FILE_SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn format_file_size_matches_dashboard_labels() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5 GB");
    }

    #[test]
    fn format_file_size_stays_in_gigabytes() {
        assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn data_uri_roundtrip_and_mime() {
        let payload = MediaPayload::from_bytes("dot.png", "image/png", &[1, 2, 3]);
        assert_eq!(payload.data_uri, "data:image/png;base64,AQID");
        assert_eq!(payload.mime_type(), Some("image/png"));
        assert_eq!(payload.size_bytes, 3);
        assert_eq!(decode_data_uri(&payload.data_uri).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn decode_data_uri_rejects_plain_urls() {
        assert!(matches!(
            decode_data_uri("https://example.com/a.png"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn infer_mime_type_prefers_explicit_content_type() {
        assert_eq!(infer_mime_type(Some("image/webp"), "photo.png"), "image/webp");
        assert_eq!(
            infer_mime_type(Some("application/octet-stream"), "photo.png"),
            "image/png"
        );
        assert_eq!(
            infer_mime_type(None, "unknown.zzzz"),
            "application/octet-stream"
        );
    }

    #[test]
    fn kind_for_mime_maps_media_families() {
        assert_eq!(kind_for_mime("image/jpeg"), BlockKind::Image);
        assert_eq!(kind_for_mime("video/mp4"), BlockKind::Video);
        assert_eq!(kind_for_mime("audio/webm"), BlockKind::Voice);
        assert_eq!(kind_for_mime("application/pdf"), BlockKind::Document);
    }

    #[test]
    fn payload_debug_hides_data() {
        let payload = MediaPayload::from_bytes("a.bin", "application/octet-stream", &[0; 64]);
        let rendered = format!("{payload:?}");
        assert!(!rendered.contains("base64"));
        assert!(rendered.contains("a.bin"));
    }

    #[tokio::test]
    async fn media_file_read_infers_kind_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, vec![0_u8; 2048]).unwrap();

        let file = MediaFile::read(&path).await.unwrap();
        assert_eq!(file.file_name, "clip.mp4");
        assert_eq!(file.kind(), BlockKind::Video);
        assert_eq!(file.formatted_size(), "2 KB");

        let payload = file.into_payload();
        assert!(payload.data_uri.starts_with("data:video/mp4;base64,"));
    }

    #[tokio::test]
    async fn media_file_read_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = MediaFile::read(dir.path().join("missing.png"))
            .await
            .unwrap_err();
        assert!(matches!(error, Error::Io(_)));
    }
}
