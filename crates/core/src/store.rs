//! The story collection state machine.
//!
//! [`StoryStore`] owns every story for the session, the active [`FilterCriteria`], the
//! pagination cursor and the client's [`PersistedLikeSet`]. A view layer calls its methods in
//! response to user intents and re-reads [`StoryStore::visible_stories`],
//! [`StoryStore::has_more`] and [`StoryStore::stats`] afterwards.
//!
//! # Ordering
//!
//! Stories are kept newest-first: submissions are inserted at the front. The filtered view is
//! an order-preserving subsequence of the collection, and the visible slice is always a prefix
//! of the filtered view of length `page * page_size`.
//!
//! # Pagination state
//!
//! `page` starts at 1. [`set_filter`](StoryStore::set_filter) and
//! [`load_stories`](StoryStore::load_stories) reset it to 1; [`next_page`](StoryStore::next_page)
//! increments it only while more stories remain hidden.

use crate::config::CoreConfig;
use crate::filter::FilterCriteria;
use crate::likes::PersistedLikeSet;
use crate::seed::sample_stories;
use crate::storage::KeyValueStore;
use crate::story::{Story, StoryInput};
use crate::{WallError, WallResult};
use chrono::Utc;
use serde::Serialize;
use std::collections::HashSet;
use wall_ids::{StoryId, StoryIdGenerator};
use wall_types::NonEmptyText;

/// Outcome of a like toggle, enough for a view to refresh a single card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LikeToggle {
    pub id: StoryId,
    pub liked: bool,
    pub like_count: u64,
}

/// Aggregate counters over the whole collection, ignoring the active filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WallStats {
    pub total_stories: usize,
    pub total_likes: u64,
}

/// Single source of truth for the stories on the wall.
#[derive(Debug)]
pub struct StoryStore<S> {
    config: CoreConfig,
    stories: Vec<Story>,
    filter: FilterCriteria,
    /// Indices into `stories` that pass `filter`, in collection order.
    filtered: Vec<usize>,
    page: usize,
    likes: PersistedLikeSet<S>,
    ids: StoryIdGenerator,
}

impl<S: KeyValueStore> StoryStore<S> {
    /// Creates an empty store and loads the like-set from `storage`.
    pub fn new(config: CoreConfig, storage: S) -> Self {
        let likes = PersistedLikeSet::load(storage, config.like_set_key());

        Self {
            config,
            stories: Vec::new(),
            filter: FilterCriteria::all(),
            filtered: Vec::new(),
            page: 1,
            likes,
            ids: StoryIdGenerator::new(),
        }
    }

    /// Creates a store preloaded with the sample stories.
    pub fn seeded(config: CoreConfig, storage: S) -> WallResult<Self> {
        let mut store = Self::new(config, storage);
        store.load_stories(sample_stories())?;
        Ok(store)
    }

    /// Replaces the whole collection, for example with seed data.
    ///
    /// The stories are kept in the given order. The filter is kept and re-applied, and the
    /// page resets to 1.
    ///
    /// # Errors
    ///
    /// Returns `WallError::DuplicateStoryId` if two stories share an id, or
    /// `WallError::InvalidInput` if a story's like count is `u64::MAX` (a like on it could not
    /// be undone exactly). The store is left unchanged in either case.
    pub fn load_stories(&mut self, stories: Vec<Story>) -> WallResult<()> {
        let mut seen = HashSet::with_capacity(stories.len());
        for story in &stories {
            if !seen.insert(story.id()) {
                return Err(WallError::DuplicateStoryId(story.id()));
            }
            if story.like_count() == u64::MAX {
                return Err(WallError::InvalidInput(format!(
                    "story {} has a like count at the u64 ceiling",
                    story.id()
                )));
            }
        }

        for story in &stories {
            self.ids.observe(story.id());
        }

        tracing::debug!("loaded {} stories", stories.len());

        self.stories = stories;
        self.page = 1;
        self.refilter();
        Ok(())
    }

    /// Adds a submitted story at the front of the wall.
    ///
    /// A blank or missing name is replaced by the configured placeholder. When both a photo and
    /// a video are supplied the photo wins. The active filter is re-applied; the page is kept.
    pub fn add_story(&mut self, input: StoryInput) -> &Story {
        let now = Utc::now();
        let id = self
            .ids
            .next_id_at(now)
            .unwrap_or_else(|| self.unused_id());
        let name = NonEmptyText::from_optional(input.name.as_deref())
            .unwrap_or_else(|| self.config.placeholder_name().clone());
        let media = input.media();

        let story = Story::new(id, name, input.region, input.text, media, 0, now);

        tracing::debug!(
            "added story {} ({}, region '{}')",
            story.id(),
            story.media_kind(),
            story.region()
        );

        self.stories.insert(0, story);
        self.refilter();
        &self.stories[0]
    }

    /// Replaces the active filter and returns to the first page.
    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        self.filter = criteria;
        self.page = 1;
        self.refilter();

        tracing::debug!(
            "filter set to region={:?} kind={:?}: {} of {} stories match",
            self.filter.region,
            self.filter.media_kind,
            self.filtered.len(),
            self.stories.len()
        );
    }

    /// Reveals one more page. Does nothing once every filtered story is visible.
    pub fn next_page(&mut self) {
        if self.has_more() {
            self.page += 1;
        }
    }

    /// The first `page * page_size` stories of the filtered view.
    pub fn visible_stories(&self) -> Vec<&Story> {
        self.filtered
            .iter()
            .take(self.visible_len())
            .map(|&index| &self.stories[index])
            .collect()
    }

    pub fn has_more(&self) -> bool {
        self.visible_len() < self.filtered.len()
    }

    /// Flips this client's like on `id`.
    ///
    /// The persisted like-set decides the direction: a liked story is unliked (count decremented,
    /// never below zero) and any other story is liked. Unknown ids are ignored and return `None`.
    pub fn toggle_like(&mut self, id: StoryId) -> Option<LikeToggle> {
        let Some(story) = self.stories.iter_mut().find(|s| s.id() == id) else {
            tracing::debug!("ignoring like toggle for unknown story {}", id);
            return None;
        };

        let liked = if self.likes.contains(id) {
            story.decrement_likes();
            self.likes.remove(id);
            false
        } else {
            story.increment_likes();
            self.likes.add(id);
            true
        };

        tracing::debug!(
            "story {} {} (count {})",
            id,
            if liked { "liked" } else { "unliked" },
            story.like_count()
        );

        Some(LikeToggle {
            id,
            liked,
            like_count: story.like_count(),
        })
    }

    /// Whether this client currently likes `id`.
    pub fn is_liked(&self, id: StoryId) -> bool {
        self.likes.contains(id)
    }

    pub fn story(&self, id: StoryId) -> Option<&Story> {
        self.stories.iter().find(|s| s.id() == id)
    }

    /// Every story, newest first, ignoring the filter.
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn total_stories(&self) -> usize {
        self.stories.len()
    }

    pub fn total_likes(&self) -> u64 {
        self.stories.iter().map(Story::like_count).sum()
    }

    pub fn stats(&self) -> WallStats {
        WallStats {
            total_stories: self.total_stories(),
            total_likes: self.total_likes(),
        }
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn likes(&self) -> &PersistedLikeSet<S> {
        &self.likes
    }

    /// Tears the store down and returns the like-set backend.
    pub fn into_storage(self) -> S {
        self.likes.into_storage()
    }

    // Only reached once the generator has handed out u64::MAX; the collection is finite, so
    // some smaller id is always free.
    fn unused_id(&self) -> StoryId {
        let used: HashSet<StoryId> = self.stories.iter().map(Story::id).collect();
        (0..=u64::MAX)
            .map(StoryId::new)
            .find(|id| !used.contains(id))
            .expect("collection is smaller than the id space")
    }

    fn visible_len(&self) -> usize {
        self.page
            .saturating_mul(self.config.page_size())
            .min(self.filtered.len())
    }

    fn refilter(&mut self) {
        let filter = &self.filter;
        self.filtered = self
            .stories
            .iter()
            .enumerate()
            .filter(|(_, story)| filter.matches(story))
            .map(|(index, _)| index)
            .collect();
    }
}
