//! Application state shared across handlers.

use std::sync::Arc;

use blocknote_store::{BlockService, NotebookService, Store};

use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// Cloneable; extracted in handlers via `State<AppState>`. The services are
/// injected here once and threaded through every handler explicitly, so the
/// authorization dependency is visible in each call site rather than hidden
/// in request state.
#[derive(Clone)]
pub struct AppState {
    /// Database store (used directly only by the auth routes).
    store: Arc<Store>,
    /// Server configuration.
    config: Arc<ServerConfig>,
    /// Notebook service, gate-scoped.
    notebooks: NotebookService,
    /// Block service, gate-scoped.
    blocks: BlockService,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Store, config: ServerConfig) -> Self {
        Self {
            notebooks: NotebookService::new(store.clone()),
            blocks: BlockService::new(store.clone()),
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Get a reference to the database store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get a reference to the notebook service.
    pub fn notebooks(&self) -> &NotebookService {
        &self.notebooks
    }

    /// Get a reference to the block service.
    pub fn blocks(&self) -> &BlockService {
        &self.blocks
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
