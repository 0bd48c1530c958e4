//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then handed to the store. Library code
//! never reads environment variables itself; the binary reads them and feeds the raw values
//! through the `*_from_env_value` helpers below.

use crate::constants::{
    DEFAULT_COUNTDOWN_TARGET, DEFAULT_LIKE_SET_KEY, DEFAULT_PAGE_SIZE, DEFAULT_PLACEHOLDER_NAME,
};
use crate::storage::validate_key;
use crate::{WallError, WallResult};
use chrono::{DateTime, Utc};
use wall_types::NonEmptyText;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    page_size: usize,
    placeholder_name: NonEmptyText,
    like_set_key: String,
    countdown_target: DateTime<Utc>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `WallError::InvalidInput` if `page_size` is zero or `like_set_key` is not a valid
    /// storage key.
    pub fn new(
        page_size: usize,
        placeholder_name: NonEmptyText,
        like_set_key: String,
        countdown_target: DateTime<Utc>,
    ) -> WallResult<Self> {
        if page_size == 0 {
            return Err(WallError::InvalidInput(
                "page_size must be at least 1".into(),
            ));
        }

        validate_key(&like_set_key)
            .map_err(|e| WallError::InvalidInput(format!("like_set_key: {e}")))?;

        Ok(Self {
            page_size,
            placeholder_name,
            like_set_key,
            countdown_target,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn placeholder_name(&self) -> &NonEmptyText {
        &self.placeholder_name
    }

    pub fn like_set_key(&self) -> &str {
        &self.like_set_key
    }

    pub fn countdown_target(&self) -> DateTime<Utc> {
        self.countdown_target
    }

    /// Returns a copy of this configuration with a different page size.
    pub fn with_page_size(self, page_size: usize) -> WallResult<Self> {
        Self::new(
            page_size,
            self.placeholder_name,
            self.like_set_key,
            self.countdown_target,
        )
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            placeholder_name: default_placeholder_name(),
            like_set_key: DEFAULT_LIKE_SET_KEY.to_owned(),
            countdown_target: default_countdown_target(),
        }
    }
}

fn default_placeholder_name() -> NonEmptyText {
    NonEmptyText::new(DEFAULT_PLACEHOLDER_NAME).expect("default placeholder name is non-empty")
}

fn default_countdown_target() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(DEFAULT_COUNTDOWN_TARGET)
        .map(|dt| dt.with_timezone(&Utc))
        .expect("default countdown target is valid RFC 3339")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the page size from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default page size.
pub fn page_size_from_env_value(value: Option<String>) -> WallResult<usize> {
    match non_blank(value) {
        None => Ok(DEFAULT_PAGE_SIZE),
        Some(v) => match v.parse::<usize>() {
            Ok(0) => Err(WallError::InvalidInput(
                "WALL_PAGE_SIZE must be at least 1".into(),
            )),
            Ok(n) => Ok(n),
            Err(e) => Err(WallError::InvalidInput(format!(
                "WALL_PAGE_SIZE is not a positive integer ('{v}'): {e}"
            ))),
        },
    }
}

/// Parse the placeholder display name, falling back to the default when unset or blank.
pub fn placeholder_name_from_env_value(value: Option<String>) -> NonEmptyText {
    NonEmptyText::from_optional(value).unwrap_or_else(default_placeholder_name)
}

/// Parse the like-set storage key, falling back to the default when unset or blank.
pub fn like_set_key_from_env_value(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_LIKE_SET_KEY.to_owned())
}

/// Parse the countdown target from an optional RFC 3339 value.
pub fn countdown_target_from_env_value(value: Option<String>) -> WallResult<DateTime<Utc>> {
    match non_blank(value) {
        None => Ok(default_countdown_target()),
        Some(v) => DateTime::parse_from_rfc3339(&v)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                WallError::InvalidInput(format!(
                    "WALL_COUNTDOWN_TARGET is not an RFC 3339 timestamp ('{v}'): {e}"
                ))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_config() {
        let config = CoreConfig::default();

        assert_eq!(config.page_size(), 6);
        assert_eq!(config.placeholder_name().as_str(), DEFAULT_PLACEHOLDER_NAME);
        assert_eq!(config.like_set_key(), "likedStories");
        assert_eq!(
            config.countdown_target(),
            Utc.with_ymd_and_hms(2025, 9, 23, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_new_rejects_zero_page_size() {
        let result = CoreConfig::new(
            0,
            NonEmptyText::new("Guest").unwrap(),
            "likes".into(),
            Utc::now(),
        );
        assert!(matches!(result, Err(WallError::InvalidInput(_))));
    }

    #[test]
    fn test_new_rejects_unsafe_like_set_key() {
        let result = CoreConfig::new(
            6,
            NonEmptyText::new("Guest").unwrap(),
            "../likes".into(),
            Utc::now(),
        );
        assert!(matches!(result, Err(WallError::InvalidInput(_))));
    }

    #[test]
    fn test_with_page_size() {
        let config = CoreConfig::default().with_page_size(2).unwrap();
        assert_eq!(config.page_size(), 2);
        assert!(CoreConfig::default().with_page_size(0).is_err());
    }

    #[test]
    fn test_page_size_from_env_value() {
        assert_eq!(page_size_from_env_value(None).unwrap(), 6);
        assert_eq!(page_size_from_env_value(Some("  ".into())).unwrap(), 6);
        assert_eq!(page_size_from_env_value(Some(" 12 ".into())).unwrap(), 12);
        assert!(page_size_from_env_value(Some("0".into())).is_err());
        assert!(page_size_from_env_value(Some("six".into())).is_err());
    }

    #[test]
    fn test_placeholder_and_key_from_env_value() {
        assert_eq!(
            placeholder_name_from_env_value(Some("Visitor".into())).as_str(),
            "Visitor"
        );
        assert_eq!(
            placeholder_name_from_env_value(Some("".into())).as_str(),
            DEFAULT_PLACEHOLDER_NAME
        );
        assert_eq!(like_set_key_from_env_value(None), "likedStories");
        assert_eq!(like_set_key_from_env_value(Some("wall_likes".into())), "wall_likes");
    }

    #[test]
    fn test_countdown_target_from_env_value() {
        let parsed =
            countdown_target_from_env_value(Some("2026-01-01T12:00:00+03:00".into())).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap());

        assert!(countdown_target_from_env_value(Some("tomorrow".into())).is_err());
        assert_eq!(
            countdown_target_from_env_value(None).unwrap(),
            CoreConfig::default().countdown_target()
        );
    }
}
