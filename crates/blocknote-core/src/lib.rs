//! blocknote-core: Domain types for the blocknote backend
//!
//! This crate defines the entities of the note-taking model:
//!
//! - Notebooks: named containers owned by users
//! - Blocks: typed content units (text, image, code, ...) living inside
//!   notebooks
//! - The identifier newtypes (`UserId`, `NotebookId`, `BlockId`) used to
//!   relate them
//!
//! Ownership and membership are *not* fields on the entities. A notebook
//! carries no owner column and a block carries no notebook column; both
//! relations live in connector records managed by the storage layer. This
//! keeps "access exists" synonymous with "a connector row exists" and lets
//! an entity gain additional parents without any change to its own shape.

pub mod identity;
pub mod types;

pub use identity::{BlockId, NotebookId, UserId};
pub use types::{Block, BlockDraft, BlockPatch, Notebook, NotebookPatch};
