//! Time remaining until the wall's target date.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Whole days, hours and minutes left until a target instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl Countdown {
    /// Computes the remaining time from `now` to `target`, truncated to whole minutes.
    ///
    /// Once `target` has passed every field is zero.
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining = target - now;
        if remaining <= chrono::Duration::zero() {
            return Self::default();
        }

        let total_minutes = remaining.num_minutes();
        Self {
            days: total_minutes / (24 * 60),
            hours: (total_minutes / 60) % 24,
            minutes: total_minutes % 60,
        }
    }

    pub fn is_finished(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn target() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 23, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_countdown_breakdown() {
        let now = target() - Duration::days(3) - Duration::hours(4) - Duration::minutes(5)
            - Duration::seconds(59);
        let countdown = Countdown::until(target(), now);

        assert_eq!(
            countdown,
            Countdown {
                days: 3,
                hours: 4,
                minutes: 5
            }
        );
        assert!(!countdown.is_finished());
    }

    #[test]
    fn test_countdown_under_a_minute() {
        let countdown = Countdown::until(target(), target() - Duration::seconds(30));
        assert_eq!(countdown, Countdown::default());
    }

    #[test]
    fn test_countdown_past_target_is_zero() {
        let countdown = Countdown::until(target(), target() + Duration::days(400));
        assert!(countdown.is_finished());

        let countdown = Countdown::until(target(), target());
        assert!(countdown.is_finished());
    }
}
