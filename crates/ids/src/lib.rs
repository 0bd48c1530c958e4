//! Story identifiers.
//!
//! Every story on the wall carries a [`StoryId`]: a plain unsigned integer. Seeded sample
//! stories use small hand-picked values (`1`, `2`, ...), while stories submitted during a
//! session receive time-derived values from a [`StoryIdGenerator`] (milliseconds since the Unix
//! epoch).
//!
//! ## Uniqueness
//! A generator never hands out the same id twice and never hands out an id at or below one it
//! has been told about via [`StoryIdGenerator::observe`]. Two submissions in the same
//! millisecond therefore get consecutive ids rather than colliding. Once `u64::MAX` has been
//! reached the generator returns `None` instead of repeating an id.
//!
//! ## Wire form
//! With the `serde` feature (on by default) a `StoryId` serialises as a bare JSON number, so a
//! persisted like-set reads as `[1,5,1726000000000]`.

mod service;

pub use service::{StoryId, StoryIdGenerator};

/// Error type for story id operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for story id operations.
pub type IdResult<T> = Result<T, IdError>;
