use crate::story::{MediaKind, Story};

/// Filter applied to the wall. Unset fields match every story.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub region: Option<String>,
    pub media_kind: Option<MediaKind>,
}

impl FilterCriteria {
    /// A filter that matches every story.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn region(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            media_kind: None,
        }
    }

    pub fn media_kind(kind: MediaKind) -> Self {
        Self {
            region: None,
            media_kind: Some(kind),
        }
    }

    /// Returns true if no field constrains the result.
    pub fn is_unrestricted(&self) -> bool {
        self.region_constraint().is_none() && self.media_kind.is_none()
    }

    // A blank region from an untouched select box means "all regions".
    fn region_constraint(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.trim().is_empty())
    }

    pub fn matches(&self, story: &Story) -> bool {
        let region_match = self
            .region_constraint()
            .map_or(true, |region| story.region() == region);
        let kind_match = self
            .media_kind
            .map_or(true, |kind| story.media_kind() == kind);

        region_match && kind_match
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::MediaRef;
    use chrono::Utc;
    use wall_ids::StoryId;
    use wall_types::NonEmptyText;

    fn story(region: &str, media: Option<MediaRef>) -> Story {
        Story::new(
            StoryId::new(1),
            NonEmptyText::new("n").unwrap(),
            region,
            "t",
            media,
            0,
            Utc::now(),
        )
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = FilterCriteria::all();
        assert!(filter.is_unrestricted());
        assert!(filter.matches(&story("جدة", None)));
        assert!(filter.matches(&story("أبها", Some(MediaRef::Video("v".into())))));
    }

    #[test]
    fn test_blank_region_is_unrestricted() {
        let filter = FilterCriteria::region("  ");
        assert!(filter.is_unrestricted());
        assert!(filter.matches(&story("جدة", None)));
    }

    #[test]
    fn test_region_and_kind_are_conjunctive() {
        let filter = FilterCriteria {
            region: Some("جدة".into()),
            media_kind: Some(MediaKind::Photo),
        };

        assert!(filter.matches(&story("جدة", Some(MediaRef::Photo("p".into())))));
        assert!(!filter.matches(&story("جدة", None)));
        assert!(!filter.matches(&story("الرياض", Some(MediaRef::Photo("p".into())))));
    }

    #[test]
    fn test_region_match_is_exact() {
        let filter = FilterCriteria::region("الرياض");
        assert!(!filter.matches(&story("الرياض ", None)));
        assert!(filter.matches(&story("الرياض", None)));
    }
}
