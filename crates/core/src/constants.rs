//! Constants used throughout the wall core crate.

/// Number of stories revealed per page when no page size is configured.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Display name given to stories submitted without a name.
pub const DEFAULT_PLACEHOLDER_NAME: &str = "مواطن سعودي";

/// Storage key under which the liked-story set is persisted.
pub const DEFAULT_LIKE_SET_KEY: &str = "likedStories";

/// Countdown target used when none is configured (RFC 3339).
pub const DEFAULT_COUNTDOWN_TARGET: &str = "2025-09-23T00:00:00Z";

/// Default directory for the file-backed key-value store.
pub const DEFAULT_DATA_DIR: &str = "wall_data";

/// File extension appended to keys by the file-backed store.
pub const STORAGE_FILE_EXTENSION: &str = "json";

/// Title offered to share sheets.
pub const SHARE_TITLE: &str = "95 قصة فخر";
