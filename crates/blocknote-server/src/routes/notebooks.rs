//! Notebook routes.
//!
//! Every handler runs as the authenticated caller; a notebook the caller
//! does not own answers 404 on every verb, same as a notebook that does
//! not exist.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use uuid::Uuid;

use blocknote_core::{Notebook, NotebookId, NotebookPatch};

use crate::auth::AuthenticatedUser;
use crate::error::ApiResult;
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating a notebook.
#[derive(Debug, Deserialize)]
pub struct CreateNotebookRequest {
    #[serde(default)]
    pub name: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /notebooks/ - List the caller's notebooks.
async fn list_notebooks(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<Notebook>>> {
    let notebooks = state.notebooks().list(user.user_id).await?;
    Ok(Json(notebooks))
}

/// POST /notebooks/ - Create a notebook owned by the caller.
///
/// # Response
///
/// - 201 Created: the new notebook
/// - 400 Bad Request: blank name
async fn create_notebook(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateNotebookRequest>,
) -> ApiResult<(StatusCode, Json<Notebook>)> {
    let notebook = state.notebooks().create(user.user_id, &request.name).await?;

    tracing::info!(
        user_id = %user.user_id,
        notebook_id = %notebook.id,
        "Notebook created"
    );

    Ok((StatusCode::CREATED, Json(notebook)))
}

/// GET /notebooks/{id}/ - Fetch a single notebook the caller owns.
async fn get_notebook(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(notebook_id): Path<Uuid>,
) -> ApiResult<Json<Notebook>> {
    let notebook = state
        .notebooks()
        .get(user.user_id, NotebookId::from_uuid(notebook_id))
        .await?;
    Ok(Json(notebook))
}

/// PUT/PATCH /notebooks/{id}/ - Rename a notebook.
///
/// Both verbs apply the same partial-update semantics; an empty body is a
/// no-op that returns the current state.
async fn update_notebook(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(notebook_id): Path<Uuid>,
    Json(patch): Json<NotebookPatch>,
) -> ApiResult<Json<Notebook>> {
    let notebook = state
        .notebooks()
        .update(user.user_id, NotebookId::from_uuid(notebook_id), &patch)
        .await?;
    Ok(Json(notebook))
}

/// DELETE /notebooks/{id}/ - Delete a notebook and its blocks.
async fn delete_notebook(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(notebook_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .notebooks()
        .delete(user.user_id, NotebookId::from_uuid(notebook_id))
        .await?;

    tracing::info!(
        user_id = %user.user_id,
        notebook_id = %notebook_id,
        "Notebook deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Build notebook routes. Both forms, with and without the trailing slash,
/// are accepted.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notebooks", get(list_notebooks).post(create_notebook))
        .route("/notebooks/", get(list_notebooks).post(create_notebook))
        .route(
            "/notebooks/{notebook_id}",
            get(get_notebook)
                .put(update_notebook)
                .patch(update_notebook)
                .delete(delete_notebook),
        )
        .route(
            "/notebooks/{notebook_id}/",
            get(get_notebook)
                .put(update_notebook)
                .patch(update_notebook)
                .delete(delete_notebook),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_missing_name_defaults_blank() {
        let request: CreateNotebookRequest = serde_json::from_str("{}").unwrap();
        assert!(request.name.is_empty());
    }
}
