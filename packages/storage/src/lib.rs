// ABOUTME: Data layer for Mindgate's degraded reads
// ABOUTME: Local JSON mirror of created resources and the ordered listing pipeline

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub mod fallback;
pub mod pipeline;

pub use fallback::FallbackStore;
pub use pipeline::{first_non_empty, ListingStrategy};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A resource that can be mirrored to and listed from local files
pub trait StoredResource: Serialize + DeserializeOwned + Send + Sync {
    fn id(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
}
