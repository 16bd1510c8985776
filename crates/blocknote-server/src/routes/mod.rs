//! Route definitions for the HTTP API.

pub mod auth;
pub mod blocks;
pub mod health;
pub mod notebooks;

use axum::Router;

use crate::state::AppState;

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(notebooks::routes())
        .merge(blocks::routes())
        .with_state(state)
}
