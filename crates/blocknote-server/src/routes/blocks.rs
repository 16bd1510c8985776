//! Block routes, nested under their notebook.
//!
//! The notebook segment of the path is not decoration: a block is only
//! reachable through a notebook the caller owns, and a block addressed
//! through the wrong notebook answers 404.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use blocknote_core::{Block, BlockDraft, BlockId, BlockPatch, NotebookId};

use crate::auth::AuthenticatedUser;
use crate::error::ApiResult;
use crate::state::AppState;

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /notebooks/{id}/blocks/ - List the notebook's blocks.
async fn list_blocks(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(notebook_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Block>>> {
    let blocks = state
        .blocks()
        .list(user.user_id, NotebookId::from_uuid(notebook_id))
        .await?;
    Ok(Json(blocks))
}

/// POST /notebooks/{id}/blocks/ - Create a block inside the notebook.
///
/// # Response
///
/// - 201 Created: the new block
/// - 400 Bad Request: blank type
/// - 404 Not Found: notebook missing or not owned by the caller
async fn create_block(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(notebook_id): Path<Uuid>,
    Json(draft): Json<BlockDraft>,
) -> ApiResult<(StatusCode, Json<Block>)> {
    let block = state
        .blocks()
        .create(user.user_id, NotebookId::from_uuid(notebook_id), draft)
        .await?;

    tracing::info!(
        user_id = %user.user_id,
        notebook_id = %notebook_id,
        block_id = %block.id,
        "Block created"
    );

    Ok((StatusCode::CREATED, Json(block)))
}

/// GET /notebooks/{id}/blocks/{block_id}/ - Fetch a single block.
async fn get_block(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((notebook_id, block_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<Block>> {
    let block = state
        .blocks()
        .get(
            user.user_id,
            NotebookId::from_uuid(notebook_id),
            BlockId::from_uuid(block_id),
        )
        .await?;
    Ok(Json(block))
}

/// PUT/PATCH /notebooks/{id}/blocks/{block_id}/ - Partially update a block.
///
/// Both verbs apply the same semantics: only the fields present in the
/// body change, and an empty body is a no-op that returns the current
/// state.
async fn update_block(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((notebook_id, block_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<BlockPatch>,
) -> ApiResult<Json<Block>> {
    let block = state
        .blocks()
        .update(
            user.user_id,
            NotebookId::from_uuid(notebook_id),
            BlockId::from_uuid(block_id),
            &patch,
        )
        .await?;
    Ok(Json(block))
}

/// DELETE /notebooks/{id}/blocks/{block_id}/ - Delete a block.
async fn delete_block(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((notebook_id, block_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    state
        .blocks()
        .delete(
            user.user_id,
            NotebookId::from_uuid(notebook_id),
            BlockId::from_uuid(block_id),
        )
        .await?;

    tracing::info!(
        user_id = %user.user_id,
        notebook_id = %notebook_id,
        block_id = %block_id,
        "Block deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Build block routes. Both forms, with and without the trailing slash,
/// are accepted.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notebooks/{notebook_id}/blocks",
            get(list_blocks).post(create_block),
        )
        .route(
            "/notebooks/{notebook_id}/blocks/",
            get(list_blocks).post(create_block),
        )
        .route(
            "/notebooks/{notebook_id}/blocks/{block_id}",
            get(get_block)
                .put(update_block)
                .patch(update_block)
                .delete(delete_block),
        )
        .route(
            "/notebooks/{notebook_id}/blocks/{block_id}/",
            get(get_block)
                .put(update_block)
                .patch(update_block)
                .delete(delete_block),
        )
}
