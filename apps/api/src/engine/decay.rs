//! Time-Decay Evaluator — turns a last-touch timestamp into a health score
//! and a resurfacing signal.
//!
//! Pure and total: health decays linearly (5 points per day, floored at 0)
//! and the resurface signal flips once the touch gap exceeds the freshness
//! threshold. Nothing here is persisted; callers derive it on read.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Default freshness threshold: a contact untouched for more than this many
/// days needs resurfacing.
pub const DEFAULT_RESURFACE_THRESHOLD_DAYS: i64 = 14;

const HEALTH_DECAY_PER_DAY: i64 = 5;

/// Resurfacing signal. `days` is days past due when overdue, days of
/// headroom remaining otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resurface {
    pub overdue: bool,
    pub days: i64,
}

/// Derived relationship health for a single contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TouchHealth {
    pub days_since: i64,
    /// 0–100, linear decay from the last touch.
    pub health: u8,
    pub resurface: Resurface,
}

/// Evaluates relationship decay for a last-touch instant against `now`.
///
/// `days_since` is the ceiling of elapsed wall-clock days, taken as an
/// absolute value so a slightly future-dated touch (clock skew) never goes
/// negative.
pub fn evaluate(last_touch: DateTime<Utc>, now: DateTime<Utc>, threshold_days: i64) -> TouchHealth {
    let elapsed_secs = (now - last_touch).num_seconds().abs();
    let days_since = (elapsed_secs + 86_399) / 86_400;

    let health = (100 - HEALTH_DECAY_PER_DAY * days_since).max(0) as u8;

    let overdue = days_since > threshold_days;
    let resurface = Resurface {
        overdue,
        days: if overdue {
            days_since - threshold_days
        } else {
            threshold_days - days_since
        },
    };

    TouchHealth {
        days_since,
        health,
        resurface,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at_days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
        now - Duration::days(days)
    }

    #[test]
    fn test_same_instant_is_full_health() {
        let now = Utc::now();
        let h = evaluate(now, now, DEFAULT_RESURFACE_THRESHOLD_DAYS);
        assert_eq!(h.days_since, 0);
        assert_eq!(h.health, 100);
        assert!(!h.resurface.overdue);
        assert_eq!(h.resurface.days, 14);
    }

    #[test]
    fn test_partial_day_rounds_up() {
        let now = Utc::now();
        let h = evaluate(now - Duration::hours(1), now, 14);
        assert_eq!(h.days_since, 1);
        assert_eq!(h.health, 95);
    }

    #[test]
    fn test_health_floors_at_zero_from_day_20() {
        let now = Utc::now();
        for days in [20, 21, 40, 365] {
            let h = evaluate(at_days_ago(now, days), now, 14);
            assert_eq!(h.health, 0, "days={days}");
        }
    }

    #[test]
    fn test_threshold_boundary() {
        let now = Utc::now();

        let at = evaluate(at_days_ago(now, 14), now, 14);
        assert!(!at.resurface.overdue);
        assert_eq!(at.resurface.days, 0);

        let over = evaluate(at_days_ago(now, 15), now, 14);
        assert!(over.resurface.overdue);
        assert_eq!(over.resurface.days, 1);
    }

    #[test]
    fn test_twenty_days_is_overdue_by_six() {
        let now = Utc::now();
        let h = evaluate(at_days_ago(now, 20), now, 14);
        assert!(h.resurface.overdue);
        assert_eq!(h.resurface.days, 6);
        assert_eq!(h.health, 0);
    }

    #[test]
    fn test_future_touch_never_negative() {
        let now = Utc::now();
        let h = evaluate(now + Duration::days(2), now, 14);
        assert_eq!(h.days_since, 2);
        assert_eq!(h.health, 90);
    }
}
