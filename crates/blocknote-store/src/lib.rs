//! blocknote-store: Storage layer for the blocknote backend
//!
//! This crate provides:
//! - SQLite storage for users, notebooks, blocks, and the connector tables
//!   relating them
//! - The authorization gate that resolves a (user, notebook\[, block\]) pair
//!   to an entity or a uniform not-found
//! - Domain-typed notebook and block services that enforce
//!   validate → resolve access → mutate on every operation
//! - Migration management
//!
//! # Architecture
//!
//! Entities never carry references to each other. `notebook_ownership`
//! relates users to notebooks and `block_membership` relates blocks to
//! notebooks; access exists exactly when a connector row exists. Every read
//! and write path funnels through [`Store::resolve_notebook_access`] or
//! [`Store::resolve_block_access`] before touching entity data.
//!
//! # Usage
//!
//! ```rust,ignore
//! use blocknote_store::{NotebookService, Store, StoreConfig};
//!
//! let store = Store::connect(StoreConfig::from_env()?).await?;
//! let notebooks = NotebookService::new(store.clone());
//! let created = notebooks.create(user_id, "Trip").await?;
//! ```

pub mod access;
pub mod error;
pub mod models;
pub mod schema;
pub mod service;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use models::*;
pub use service::{BlockService, NotebookService};
pub use store::{Store, StoreConfig};

// Re-export blocknote-core for downstream crates
pub use blocknote_core;
