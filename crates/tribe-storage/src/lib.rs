//! Storage abstraction for the tribe portal.
//!
//! Backend crates (e.g., tribe-store-memory, or a document-database backend)
//! implement the [`Store`] trait so `tribe-core` doesn't depend on any
//! specific database engine or schema details.

mod store;
mod types;

pub use store::Store;
pub use types::*;

use thiserror::Error;

/// Uniform error type for all storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    AlreadyExists,
    #[error("backend error: {0}")]
    Backend(String),
}
