//! Entity types for the blocknote domain.
//!
//! A `Notebook` is a named container; a `Block` is a typed content unit.
//! Neither carries a reference to the other: the storage layer relates them
//! through connector rows, and access to either is decided solely by the
//! existence of those rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identity::{BlockId, NotebookId};

/// A notebook: a named, user-owned container of blocks.
///
/// There is no owner field here. Ownership is a connector record in the
/// store; a notebook with no ownership rows is unreachable by every user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    /// Opaque unique id.
    pub id: NotebookId,
    /// Display name, free text. Never blank.
    pub name: String,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
}

/// A block: one typed content unit inside a notebook.
///
/// The type tag is an open registry ("text", "image", "code", ...); the core
/// does not interpret it. Metadata and settings are free-form JSON carried
/// for the client's benefit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Opaque unique id.
    pub id: BlockId,
    /// Free-form type tag. Never blank.
    #[serde(rename = "type")]
    pub kind: String,
    /// Main content, free text. May be empty.
    pub content: String,
    /// Free-form structured metadata.
    pub metadata: Option<Value>,
    /// Free-form per-block settings.
    pub settings: Option<Value>,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
}

/// Input for creating a block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockDraft {
    /// Free-form type tag. Required, must be non-blank; a missing tag is
    /// reported by validation, not by deserialization.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Main content. Defaults to empty.
    #[serde(default)]
    pub content: String,
    /// Free-form structured metadata.
    #[serde(default)]
    pub metadata: Option<Value>,
    /// Free-form per-block settings.
    #[serde(default)]
    pub settings: Option<Value>,
}

/// Partial update for a notebook. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotebookPatch {
    /// New display name; must be non-blank when present.
    pub name: Option<String>,
}

impl NotebookPatch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

/// Partial update for a block. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockPatch {
    /// New type tag; must be non-blank when present.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// New content.
    pub content: Option<String>,
    /// New metadata.
    pub metadata: Option<Value>,
    /// New settings.
    pub settings: Option<Value>,
}

impl BlockPatch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.content.is_none()
            && self.metadata.is_none()
            && self.settings.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_serializes_kind_as_type() {
        let block = Block {
            id: BlockId::new(),
            kind: "text".to_string(),
            content: "packing list".to_string(),
            metadata: None,
            settings: None,
            created: Utc::now(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "text");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_block_draft_defaults() {
        let draft: BlockDraft = serde_json::from_str(r#"{"type": "code"}"#).unwrap();
        assert_eq!(draft.kind, "code");
        assert_eq!(draft.content, "");
        assert!(draft.metadata.is_none());
        assert!(draft.settings.is_none());
    }

    #[test]
    fn test_block_draft_with_metadata() {
        let draft: BlockDraft = serde_json::from_value(json!({
            "type": "image",
            "content": "https://example.com/x.png",
            "metadata": {"alt": "a picture"},
            "settings": {"width": 640},
        }))
        .unwrap();
        assert_eq!(draft.metadata.unwrap()["alt"], "a picture");
        assert_eq!(draft.settings.unwrap()["width"], 640);
    }

    #[test]
    fn test_patch_emptiness() {
        assert!(NotebookPatch::default().is_empty());
        assert!(BlockPatch::default().is_empty());

        let patch: BlockPatch = serde_json::from_str(r#"{"content": "x"}"#).unwrap();
        assert!(!patch.is_empty());
        assert!(patch.kind.is_none());
    }

    #[test]
    fn test_notebook_roundtrip() {
        let notebook = Notebook {
            id: NotebookId::new(),
            name: "Trip".to_string(),
            created: Utc::now(),
        };
        let json = serde_json::to_string(&notebook).unwrap();
        let back: Notebook = serde_json::from_str(&json).unwrap();
        assert_eq!(notebook, back);
    }
}
