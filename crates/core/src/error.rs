use wall_ids::StoryId;

/// Errors raised by a [`KeyValueStore`](crate::storage::KeyValueStore) backend.
///
/// The like-set swallows these at runtime; they only surface from backend construction and
/// from direct backend calls.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Debug, thiserror::Error)]
pub enum WallError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("duplicate story id: {0}")]
    DuplicateStoryId(StoryId),
}

pub type WallResult<T> = std::result::Result<T, WallError>;
