//! Domain-typed notebook and block services.
//!
//! These wrap the raw [`Store`] operations with blocknote-core types and
//! enforce the operation order every mutation follows: validate first,
//! resolve access second, mutate third. The first failure is surfaced
//! directly; no partial mutation is ever performed.

use blocknote_core::{
    Block, BlockDraft, BlockId, BlockPatch, Notebook, NotebookId, NotebookPatch, UserId,
};

use crate::error::{StoreError, StoreResult};
use crate::models::{BlockUpdate, NewBlock, NewNotebook};
use crate::store::Store;

fn require_non_blank(field: &'static str, value: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::blank_field(field));
    }
    Ok(())
}

/// Notebook CRUD, scoped through the authorization gate.
#[derive(Debug, Clone)]
pub struct NotebookService {
    store: Store,
}

impl NotebookService {
    /// Create a new service wrapping the given store.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// List all notebooks reachable by the user. Always succeeds; an
    /// unknown user simply owns nothing.
    pub async fn list(&self, user: UserId) -> StoreResult<Vec<Notebook>> {
        let rows = self.store.list_notebooks_for_user(user.0).await?;
        Ok(rows.into_iter().map(Notebook::from).collect())
    }

    /// Create a notebook owned by the user.
    ///
    /// The notebook and its ownership row are written atomically; the
    /// creator is the sole owner until a sharing operation exists.
    pub async fn create(&self, user: UserId, name: &str) -> StoreResult<Notebook> {
        require_non_blank("name", name)?;

        let new = NewNotebook::new(name.to_string());
        let row = self.store.insert_notebook_owned(&new, user.0).await?;
        Ok(row.into())
    }

    /// Get a notebook the user owns.
    pub async fn get(&self, user: UserId, id: NotebookId) -> StoreResult<Notebook> {
        let row = self.store.resolve_notebook_access(user.0, id.0).await?;
        Ok(row.into())
    }

    /// Apply a partial update to a notebook the user owns.
    pub async fn update(
        &self,
        user: UserId,
        id: NotebookId,
        patch: &NotebookPatch,
    ) -> StoreResult<Notebook> {
        if let Some(name) = &patch.name {
            require_non_blank("name", name)?;
        }

        let current = self.store.resolve_notebook_access(user.0, id.0).await?;

        match &patch.name {
            Some(name) => {
                let row = self.store.update_notebook_name(id.0, name).await?;
                Ok(row.into())
            }
            None => Ok(current.into()),
        }
    }

    /// Delete a notebook the user owns, cascading its connector rows and
    /// member blocks.
    pub async fn delete(&self, user: UserId, id: NotebookId) -> StoreResult<()> {
        self.store.resolve_notebook_access(user.0, id.0).await?;
        self.store.delete_notebook_cascade(id.0).await
    }
}

/// Block CRUD, scoped through a notebook the user owns.
#[derive(Debug, Clone)]
pub struct BlockService {
    store: Store,
}

impl BlockService {
    /// Create a new service wrapping the given store.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// List all blocks of a notebook the user owns.
    pub async fn list(&self, user: UserId, notebook: NotebookId) -> StoreResult<Vec<Block>> {
        self.store.resolve_notebook_access(user.0, notebook.0).await?;

        let rows = self.store.list_blocks_for_notebook(notebook.0).await?;
        Ok(rows.into_iter().map(Block::from).collect())
    }

    /// Create a block inside a notebook the user owns.
    ///
    /// The block and its membership row are written atomically.
    pub async fn create(
        &self,
        user: UserId,
        notebook: NotebookId,
        draft: BlockDraft,
    ) -> StoreResult<Block> {
        require_non_blank("type", &draft.kind)?;
        self.store.resolve_notebook_access(user.0, notebook.0).await?;

        let new = NewBlock::from_draft(draft);
        let row = self.store.insert_block_in_notebook(&new, notebook.0).await?;
        Ok(row.into())
    }

    /// Get a block of a notebook the user owns.
    pub async fn get(
        &self,
        user: UserId,
        notebook: NotebookId,
        block: BlockId,
    ) -> StoreResult<Block> {
        let row = self
            .store
            .resolve_block_access(user.0, notebook.0, block.0)
            .await?;
        Ok(row.into())
    }

    /// Apply a partial update to a block of a notebook the user owns.
    /// Omitted fields keep their stored values.
    pub async fn update(
        &self,
        user: UserId,
        notebook: NotebookId,
        block: BlockId,
        patch: &BlockPatch,
    ) -> StoreResult<Block> {
        if let Some(kind) = &patch.kind {
            require_non_blank("type", kind)?;
        }

        let current = self
            .store
            .resolve_block_access(user.0, notebook.0, block.0)
            .await?;

        if patch.is_empty() {
            return Ok(current.into());
        }

        let update = BlockUpdate {
            kind: patch.kind.clone(),
            content: patch.content.clone(),
            metadata: patch.metadata.clone(),
            settings: patch.settings.clone(),
        };
        let row = self.store.update_block(block.0, &update).await?;
        Ok(row.into())
    }

    /// Delete a block of a notebook the user owns, with its membership row.
    pub async fn delete(
        &self,
        user: UserId,
        notebook: NotebookId,
        block: BlockId,
    ) -> StoreResult<()> {
        self.store
            .resolve_block_access(user.0, notebook.0, block.0)
            .await?;
        self.store.delete_block_cascade(block.0, notebook.0).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn services() -> (NotebookService, BlockService) {
        let store = Store::connect_in_memory().await.unwrap();
        (
            NotebookService::new(store.clone()),
            BlockService::new(store),
        )
    }

    fn text_block(content: &str) -> BlockDraft {
        BlockDraft {
            kind: "text".into(),
            content: content.into(),
            metadata: None,
            settings: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_list_read_your_writes() {
        let (notebooks, _) = services().await;
        let user = UserId::new();

        let created = notebooks.create(user, "Trip").await.unwrap();
        let listed = notebooks.list(user).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].name, "Trip");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let (notebooks, _) = services().await;
        let user = UserId::new();

        let err = notebooks.create(user, "   ").await.unwrap_err();
        assert!(matches!(err, StoreError::Validation { field: "name", .. }));

        // Validation failed before any write: nothing to list.
        assert!(notebooks.list(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_notebooks_are_tenant_isolated() {
        let (notebooks, _) = services().await;
        let alice = UserId::new();
        let bob = UserId::new();

        let nb = notebooks.create(alice, "Trip").await.unwrap();

        assert!(notebooks.list(bob).await.unwrap().is_empty());
        let err = notebooks.get(bob, nb.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotebookNotFound(_)));
    }

    #[tokio::test]
    async fn test_update_notebook_name_and_empty_patch() {
        let (notebooks, _) = services().await;
        let user = UserId::new();
        let nb = notebooks.create(user, "Trip").await.unwrap();

        let renamed = notebooks
            .update(user, nb.id, &NotebookPatch { name: Some("Trip 2026".into()) })
            .await
            .unwrap();
        assert_eq!(renamed.name, "Trip 2026");

        // Empty patch is a no-op returning the current state.
        let same = notebooks
            .update(user, nb.id, &NotebookPatch::default())
            .await
            .unwrap();
        assert_eq!(same.name, "Trip 2026");

        let err = notebooks
            .update(user, nb.id, &NotebookPatch { name: Some(" ".into()) })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_delete_notebook_hides_it_and_its_blocks() {
        let (notebooks, blocks) = services().await;
        let user = UserId::new();
        let nb = notebooks.create(user, "Trip").await.unwrap();
        blocks
            .create(user, nb.id, text_block("packing list"))
            .await
            .unwrap();

        notebooks.delete(user, nb.id).await.unwrap();

        assert!(matches!(
            notebooks.get(user, nb.id).await.unwrap_err(),
            StoreError::NotebookNotFound(_)
        ));
        assert!(matches!(
            blocks.list(user, nb.id).await.unwrap_err(),
            StoreError::NotebookNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_block_create_requires_type() {
        let (notebooks, blocks) = services().await;
        let user = UserId::new();
        let nb = notebooks.create(user, "Trip").await.unwrap();

        let err = blocks
            .create(user, nb.id, BlockDraft::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation { field: "type", .. }));
        assert!(blocks.list(user, nb.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_block_scenario_end_to_end() {
        let (notebooks, blocks) = services().await;
        let alice = UserId::new();
        let bob = UserId::new();

        let nb = notebooks.create(alice, "Trip").await.unwrap();
        let block = blocks
            .create(alice, nb.id, text_block("packing list"))
            .await
            .unwrap();

        let listed = blocks.list(alice, nb.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].content, "packing list");

        // Bob holds no ownership row: absence, not permission-denied.
        assert!(matches!(
            blocks.get(bob, nb.id, block.id).await.unwrap_err(),
            StoreError::BlockNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_block_update_partial_semantics() {
        let (notebooks, blocks) = services().await;
        let user = UserId::new();
        let nb = notebooks.create(user, "Trip").await.unwrap();

        let draft = BlockDraft {
            kind: "text".into(),
            content: "v1".into(),
            metadata: Some(json!({"pinned": true})),
            settings: Some(json!({"font": "mono"})),
        };
        let block = blocks.create(user, nb.id, draft).await.unwrap();

        let patch = BlockPatch {
            content: Some("v2".into()),
            ..Default::default()
        };
        blocks.update(user, nb.id, block.id, &patch).await.unwrap();

        let fetched = blocks.get(user, nb.id, block.id).await.unwrap();
        assert_eq!(fetched.content, "v2");
        assert_eq!(fetched.metadata.unwrap()["pinned"], true);
        assert_eq!(fetched.settings.unwrap()["font"], "mono");
        assert_eq!(fetched.kind, "text");
    }

    #[tokio::test]
    async fn test_block_not_visible_through_wrong_notebook() {
        let (notebooks, blocks) = services().await;
        let user = UserId::new();

        let nb1 = notebooks.create(user, "One").await.unwrap();
        let nb2 = notebooks.create(user, "Two").await.unwrap();
        let block = blocks.create(user, nb1.id, text_block("x")).await.unwrap();

        // Same owner, wrong notebook scope.
        let err = blocks.get(user, nb2.id, block.id).await.unwrap_err();
        assert!(matches!(err, StoreError::BlockNotFound(_)));
    }

    #[tokio::test]
    async fn test_block_delete() {
        let (notebooks, blocks) = services().await;
        let user = UserId::new();
        let nb = notebooks.create(user, "Trip").await.unwrap();
        let block = blocks.create(user, nb.id, text_block("x")).await.unwrap();

        blocks.delete(user, nb.id, block.id).await.unwrap();

        assert!(matches!(
            blocks.get(user, nb.id, block.id).await.unwrap_err(),
            StoreError::BlockNotFound(_)
        ));
        assert!(blocks.list(user, nb.id).await.unwrap().is_empty());
    }
}
