//! Database models for the storage layer.
//!
//! These types map directly to database rows and are used for sqlx queries.
//! They are separate from the domain types in blocknote-core so that the
//! storage representation (JSON columns as text, ids as blobs) can change
//! without touching the domain surface.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use blocknote_core::{Block, BlockDraft, BlockId, Notebook, NotebookId};

/// Database row for the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created: DateTime<Utc>,
}

/// Database row for the `notebooks` table.
///
/// Note the absence of an owner column: ownership is a connector row.
#[derive(Debug, Clone, FromRow)]
pub struct NotebookRow {
    pub id: Uuid,
    pub name: String,
    pub created: DateTime<Utc>,
}

impl From<NotebookRow> for Notebook {
    fn from(row: NotebookRow) -> Self {
        Self {
            id: NotebookId::from_uuid(row.id),
            name: row.name,
            created: row.created,
        }
    }
}

/// Database row for the `blocks` table.
///
/// Note the absence of a notebook column: membership is a connector row.
#[derive(Debug, Clone, FromRow)]
pub struct BlockRow {
    pub id: Uuid,
    pub kind: String,
    pub content: String,
    pub metadata: Option<Json<Value>>,
    pub settings: Option<Json<Value>>,
    pub created: DateTime<Utc>,
}

impl From<BlockRow> for Block {
    fn from(row: BlockRow) -> Self {
        Self {
            id: BlockId::from_uuid(row.id),
            kind: row.kind,
            content: row.content,
            metadata: row.metadata.map(|j| j.0),
            settings: row.settings.map(|j| j.0),
            created: row.created,
        }
    }
}

/// Database row for the `notebook_ownership` connector table.
#[derive(Debug, Clone, FromRow)]
pub struct NotebookOwnershipRow {
    pub user_id: Uuid,
    pub notebook_id: Uuid,
    pub granted: DateTime<Utc>,
}

/// Database row for the `block_membership` connector table.
#[derive(Debug, Clone, FromRow)]
pub struct BlockMembershipRow {
    pub block_id: Uuid,
    pub notebook_id: Uuid,
    pub linked: DateTime<Utc>,
}

/// Input for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
        }
    }
}

/// Input for creating a new notebook.
#[derive(Debug, Clone)]
pub struct NewNotebook {
    pub id: Uuid,
    pub name: String,
}

impl NewNotebook {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

/// Input for creating a new block.
#[derive(Debug, Clone)]
pub struct NewBlock {
    pub id: Uuid,
    pub kind: String,
    pub content: String,
    pub metadata: Option<Value>,
    pub settings: Option<Value>,
}

impl NewBlock {
    pub fn from_draft(draft: BlockDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: draft.kind,
            content: draft.content,
            metadata: draft.metadata,
            settings: draft.settings,
        }
    }
}

/// Partial column update for a block. `None` columns keep their stored
/// value.
#[derive(Debug, Clone, Default)]
pub struct BlockUpdate {
    pub kind: Option<String>,
    pub content: Option<String>,
    pub metadata: Option<Value>,
    pub settings: Option<Value>,
}
