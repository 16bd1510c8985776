//! blocknote-server: HTTP API server for the blocknote backend
//!
//! This crate provides:
//! - REST endpoints for notebooks and their blocks
//! - Registration and login issuing bearer tokens
//! - JSON error responses with a uniform envelope
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for request tracing,
//! CORS, and request ID generation. Every resource handler extracts the
//! authenticated user from the bearer token and passes the resulting
//! `UserId` explicitly into the store services; no handler touches entity
//! data without going through the authorization gate in blocknote-store.
//!
//! # Usage
//!
//! ```rust,ignore
//! use blocknote_server::{config::ServerConfig, routes, state::AppState};
//!
//! let config = ServerConfig::from_env()?;
//! let store = blocknote_store::Store::connect(store_config).await?;
//! let app = routes::build_router(AppState::new(store, config));
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use blocknote_core;
pub use blocknote_store;
