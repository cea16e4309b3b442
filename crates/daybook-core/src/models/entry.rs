//! Submission payloads for journal entries

use serde::{Deserialize, Serialize};

use super::BlockKind;

/// Submission-ready projection of one block.
///
/// `url`, `fileName` and `fileSize` are only emitted when media is included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        default,
        rename = "fileName",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_name: Option<String>,
    #[serde(
        default,
        rename = "fileSize",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_size: Option<String>,
}

/// Body of a `save-entry` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySubmission {
    /// UTC calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub title: String,
    pub blocks: Vec<SerializedBlock>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_block_omits_absent_media_fields() {
        let block = SerializedBlock {
            kind: BlockKind::Text,
            text: "hello".to_string(),
            caption: String::new(),
            url: None,
            file_name: None,
            file_size: None,
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "text", "text": "hello", "caption": ""})
        );
    }

    #[test]
    fn test_serialized_block_uses_camel_case_media_fields() {
        let block = SerializedBlock {
            kind: BlockKind::Document,
            text: String::new(),
            caption: "report".to_string(),
            url: Some(String::new()),
            file_name: Some("q3.pdf".to_string()),
            file_size: Some("2 MB".to_string()),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["fileName"], "q3.pdf");
        assert_eq!(json["fileSize"], "2 MB");
        assert_eq!(json["type"], "document");
    }
}
