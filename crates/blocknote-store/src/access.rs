//! Authorization gate: connector-based access resolution.
//!
//! Every notebook and block operation passes through one of the two
//! resolvers here before touching entity data. Access is decided purely by
//! connector existence:
//!
//! - a user reaches a notebook iff a `notebook_ownership` row relates them
//! - a block is visible in a notebook iff a `block_membership` row relates
//!   them, and only after the notebook itself resolved for the user
//!
//! A failed resolution is reported as not-found, never as permission-denied:
//! a caller must not be able to learn that a notebook or block exists from
//! the shape of the refusal. There is deliberately no user→block shortcut; a
//! block inside a notebook the user does not own is unreachable by
//! construction.

use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{BlockRow, NotebookRow};
use crate::store::Store;

impl Store {
    /// Resolve a user's access to a notebook.
    ///
    /// Succeeds iff an ownership row exists for (user, notebook), returning
    /// the notebook reached through that row. "No such notebook" and "not
    /// your notebook" are indistinguishable in the error.
    pub async fn resolve_notebook_access(
        &self,
        user_id: Uuid,
        notebook_id: Uuid,
    ) -> StoreResult<NotebookRow> {
        sqlx::query_as::<_, NotebookRow>(
            r#"
            SELECT n.id, n.name, n.created
            FROM notebooks n
            JOIN notebook_ownership o ON o.notebook_id = n.id
            WHERE o.user_id = ? AND n.id = ?
            "#,
        )
        .bind(user_id)
        .bind(notebook_id)
        .fetch_optional(self.pool())
        .await?
        .ok_or(StoreError::NotebookNotFound(notebook_id))
    }

    /// Resolve a user's access to a block within a notebook.
    ///
    /// Resolves the notebook first; only then is the membership row for
    /// (block, notebook) consulted. "Notebook absent", "notebook not owned",
    /// "block absent" and "block in another notebook" all collapse into the
    /// same error.
    pub async fn resolve_block_access(
        &self,
        user_id: Uuid,
        notebook_id: Uuid,
        block_id: Uuid,
    ) -> StoreResult<BlockRow> {
        self.resolve_notebook_access(user_id, notebook_id)
            .await
            .map_err(|e| match e {
                StoreError::NotebookNotFound(_) => StoreError::BlockNotFound(block_id),
                other => other,
            })?;

        sqlx::query_as::<_, BlockRow>(
            r#"
            SELECT b.id, b.kind, b.content, b.metadata, b.settings, b.created
            FROM blocks b
            JOIN block_membership m ON m.block_id = b.id
            WHERE m.notebook_id = ? AND b.id = ?
            "#,
        )
        .bind(notebook_id)
        .bind(block_id)
        .fetch_optional(self.pool())
        .await?
        .ok_or(StoreError::BlockNotFound(block_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewBlock, NewNotebook};

    async fn seeded_store() -> (Store, Uuid, Uuid, Uuid) {
        let store = Store::connect_in_memory().await.unwrap();
        let owner = Uuid::new_v4();
        let nb = store
            .insert_notebook_owned(&NewNotebook::new("Trip".into()), owner)
            .await
            .unwrap();
        let block = NewBlock {
            id: Uuid::new_v4(),
            kind: "text".into(),
            content: "packing list".into(),
            metadata: None,
            settings: None,
        };
        store.insert_block_in_notebook(&block, nb.id).await.unwrap();
        (store, owner, nb.id, block.id)
    }

    #[tokio::test]
    async fn test_owner_resolves_notebook() {
        let (store, owner, nb, _) = seeded_store().await;
        let row = store.resolve_notebook_access(owner, nb).await.unwrap();
        assert_eq!(row.name, "Trip");
    }

    #[tokio::test]
    async fn test_other_user_gets_not_found() {
        // Tenant isolation: a user without an ownership row cannot tell the
        // notebook apart from one that does not exist.
        let (store, _, nb, _) = seeded_store().await;
        let stranger = Uuid::new_v4();
        let err = store.resolve_notebook_access(stranger, nb).await.unwrap_err();
        assert!(matches!(err, StoreError::NotebookNotFound(id) if id == nb));
    }

    #[tokio::test]
    async fn test_missing_notebook_is_same_error() {
        let (store, owner, _, _) = seeded_store().await;
        let ghost = Uuid::new_v4();
        let err = store.resolve_notebook_access(owner, ghost).await.unwrap_err();
        assert!(matches!(err, StoreError::NotebookNotFound(_)));
    }

    #[tokio::test]
    async fn test_block_resolves_through_its_notebook() {
        let (store, owner, nb, block) = seeded_store().await;
        let row = store.resolve_block_access(owner, nb, block).await.unwrap();
        assert_eq!(row.content, "packing list");
    }

    #[tokio::test]
    async fn test_block_not_reachable_via_other_owned_notebook() {
        // Membership scoping: owning another notebook does not make the
        // block visible through it.
        let (store, owner, _, block) = seeded_store().await;
        let other = store
            .insert_notebook_owned(&NewNotebook::new("Other".into()), owner)
            .await
            .unwrap();

        let err = store
            .resolve_block_access(owner, other.id, block)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::BlockNotFound(_)));
    }

    #[tokio::test]
    async fn test_block_unreachable_for_non_owner() {
        let (store, _, nb, block) = seeded_store().await;
        let stranger = Uuid::new_v4();
        let err = store
            .resolve_block_access(stranger, nb, block)
            .await
            .unwrap_err();
        // Failure at the notebook step still reads as a missing block.
        assert!(matches!(err, StoreError::BlockNotFound(_)));
    }
}
