// Saved-resume persistence: a string key-value backend plus a repository that
// keeps the whole record list under one key.

pub mod file;
pub mod handlers;
pub mod memory;
pub mod repository;

use thiserror::Error;
use uuid::Uuid;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use repository::ResumeRepository;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("stored records are not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("resume {id} was modified since it was read")]
    Conflict { id: Uuid },

    #[error("storage lock poisoned")]
    Poisoned,
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Backend(e.to_string())
    }
}

/// Whole-value reads and writes by key. A `set` replaces the previous value
/// atomically: readers see either the old or the new value, never a mix.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
