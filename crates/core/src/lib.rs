//! # Wall Core
//!
//! Core state for the story wall: the collection of stories, filtering and pagination over it,
//! and the client's like toggles.
//!
//! - [`StoryStore`] owns the stories for one session and is the only thing a view layer talks to.
//! - [`PersistedLikeSet`] remembers which stories this client liked, through a
//!   [`KeyValueStore`] backend ([`FileStore`] on disk, [`MemoryStore`] in memory).
//! - [`CoreConfig`] carries page size, placeholder name, storage key and countdown target,
//!   resolved once at startup.
//!
//! **No rendering concerns**: markup, prompts and output formatting belong to the caller.
//!
//! ```
//! use wall_core::{CoreConfig, FilterCriteria, MemoryStore, StoryInput, StoryStore};
//!
//! let mut store = StoryStore::seeded(CoreConfig::default(), MemoryStore::new()).unwrap();
//! let id = store
//!     .add_story(StoryInput {
//!         name: None,
//!         region: "جدة".into(),
//!         text: "Proud of my city".into(),
//!         ..Default::default()
//!     })
//!     .id();
//!
//! store.set_filter(FilterCriteria::region("جدة"));
//! assert_eq!(store.visible_stories().len(), 2);
//!
//! store.toggle_like(id);
//! assert!(store.is_liked(id));
//! ```

pub mod config;
pub mod constants;
pub mod countdown;
mod error;
pub mod filter;
pub mod likes;
pub mod seed;
pub mod share;
pub mod storage;
pub mod store;
pub mod story;

pub use config::CoreConfig;
pub use countdown::Countdown;
pub use error::{StorageError, StorageResult, WallError, WallResult};
pub use filter::FilterCriteria;
pub use likes::PersistedLikeSet;
pub use share::share_text;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{LikeToggle, StoryStore, WallStats};
pub use story::{MediaKind, MediaRef, Story, StoryInput};
pub use wall_ids::StoryId;
pub use wall_types::NonEmptyText;
