//! Story model.
//!
//! A [`Story`] is one card on the wall. Media is held as a single optional [`MediaRef`], so a
//! story can carry a photo or a video but never both, and [`Story::media_kind`] is derived from
//! it rather than stored.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use wall_ids::StoryId;
use wall_types::NonEmptyText;

use crate::WallError;

/// Kind of content a story carries, used as a filter dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Text,
    Photo,
    Video,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Text => "text",
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = WallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(MediaKind::Text),
            "photo" => Ok(MediaKind::Photo),
            "video" => Ok(MediaKind::Video),
            other => Err(WallError::InvalidInput(format!(
                "unknown media kind '{other}' (expected text, photo or video)"
            ))),
        }
    }
}

/// Opaque reference to externally hosted media (for example a transient object URL).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "lowercase")]
pub enum MediaRef {
    Photo(String),
    Video(String),
}

impl MediaRef {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaRef::Photo(_) => MediaKind::Photo,
            MediaRef::Video(_) => MediaKind::Video,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            MediaRef::Photo(url) | MediaRef::Video(url) => url,
        }
    }
}

/// A single story on the wall.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Story {
    id: StoryId,
    name: NonEmptyText,
    region: String,
    text: String,
    media: Option<MediaRef>,
    like_count: u64,
    created_at: DateTime<Utc>,
}

impl Story {
    /// Builds a story from already-resolved parts.
    ///
    /// Used for seed data and by the store once it has assigned an id.
    pub fn new(
        id: StoryId,
        name: NonEmptyText,
        region: impl Into<String>,
        text: impl Into<String>,
        media: Option<MediaRef>,
        like_count: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            region: region.into(),
            text: text.into(),
            media,
            like_count,
            created_at,
        }
    }

    pub fn id(&self) -> StoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn media(&self) -> Option<&MediaRef> {
        self.media.as_ref()
    }

    pub fn media_kind(&self) -> MediaKind {
        self.media.as_ref().map_or(MediaKind::Text, MediaRef::kind)
    }

    pub fn like_count(&self) -> u64 {
        self.like_count
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // Saturates at u64::MAX; the store refuses seeds at that value so a like can always be
    // undone exactly.
    pub(crate) fn increment_likes(&mut self) {
        self.like_count = self.like_count.saturating_add(1);
    }

    pub(crate) fn decrement_likes(&mut self) {
        self.like_count = self.like_count.saturating_sub(1);
    }
}

/// Raw fields of a submitted story as the view layer collects them.
///
/// Blank strings are treated the same as absent values for `name`, `photo` and `video`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoryInput {
    pub name: Option<String>,
    pub region: String,
    pub text: String,
    pub photo: Option<String>,
    pub video: Option<String>,
}

impl StoryInput {
    /// Resolves the submitted media, photo first.
    pub(crate) fn media(&self) -> Option<MediaRef> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };

        present(&self.photo)
            .map(MediaRef::Photo)
            .or_else(|| present(&self.video).map(MediaRef::Video))
    }
}
