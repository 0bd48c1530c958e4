//! Story id and generator implementation.

use crate::{IdError, IdResult};
use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

/// Identifier of a single story, unique within a wall session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StoryId(u64);

impl StoryId {
    /// Wraps a raw integer id (used for seeded stories and parsed input).
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for StoryId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoryId {
    type Err = IdError;

    /// Parses a decimal story id. Surrounding whitespace is ignored.
    fn from_str(s: &str) -> IdResult<Self> {
        s.trim().parse::<u64>().map(Self).map_err(|e| {
            IdError::InvalidInput(format!("Story id must be a decimal integer, got '{}': {}", s, e))
        })
    }
}

/// Hands out fresh, strictly increasing story ids.
///
/// Ids are derived from the wall-clock time in milliseconds. If the clock has not advanced past
/// the last issued (or observed) id, the next id is `last + 1` instead, so the sequence is
/// strictly monotonic even under a stalled or rewound clock.
#[derive(Clone, Debug, Default)]
pub struct StoryIdGenerator {
    last: Option<StoryId>,
}

impl StoryIdGenerator {
    /// Creates a generator that has not issued or observed any id yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recent id issued or observed, if any.
    pub fn last(&self) -> Option<StoryId> {
        self.last
    }

    /// Records an id that already exists in the collection.
    ///
    /// Later calls to [`next_id_at`](Self::next_id_at) return values strictly greater than every
    /// observed id.
    pub fn observe(&mut self, id: StoryId) {
        match self.last {
            Some(last) if id <= last => {}
            _ => self.last = Some(id),
        }
    }

    /// Issues the next id as if the current time were `now`.
    ///
    /// Returns `None` once `u64::MAX` has been issued or observed, since no larger id exists.
    /// The generator is left unchanged in that case.
    pub fn next_id_at(&mut self, now: DateTime<Utc>) -> Option<StoryId> {
        let candidate = u64::try_from(now.timestamp_millis()).unwrap_or(0);

        let id = match self.last {
            Some(prev) if candidate <= prev.0 => StoryId(prev.0.checked_add(1)?),
            _ => StoryId(candidate),
        };

        self.last = Some(id);
        Some(id)
    }
}
