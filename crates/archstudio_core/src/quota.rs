//! crates/archstudio_core/src/quota.rs
//!
//! The quota accountant: pure arithmetic over a user-record snapshot
//! deciding whether the premium generation tier may be used today, and the
//! day-rollover rule applied when usage is recorded. The authoritative
//! read-then-write against the directory lives in the generation task; this
//! module never performs I/O.

use chrono::NaiveDate;

use crate::domain::{Requester, UserRecord};

/// A personal override credential shorter than this is not considered a
/// plausible key and does not bypass quota accounting.
pub const MIN_PLAUSIBLE_KEY_LEN: usize = 10;

/// Today's usage, treating any stale stored date as zero.
pub fn effective_usage(user: &UserRecord, today: NaiveDate) -> u32 {
    if user.last_usage_date == today {
        user.usage_count
    } else {
        0
    }
}

/// Whether the requester may use the premium tier right now.
///
/// Administrators are unlimited. A configured quota of 0 is respected as
/// zero allowance; it is never defaulted to anything larger.
pub fn has_premium_allowance(requester: &Requester, today: NaiveDate) -> bool {
    match requester {
        Requester::Admin => true,
        Requester::Member(user) => effective_usage(user, today) < user.daily_quota,
    }
}

/// The usage count to persist after one successful premium generation.
/// A stale stored date resets the counter before incrementing, so the write
/// is always (stored + 1) for today or exactly 1 after a rollover.
pub fn rolled_usage(stored_count: u32, stored_date: NaiveDate, today: NaiveDate) -> u32 {
    if stored_date == today {
        stored_count + 1
    } else {
        1
    }
}

/// Whether a personal override credential is plausible enough to bypass the
/// shared quota entirely.
pub fn is_plausible_override_key(key: Option<&str>) -> bool {
    key.map(|k| k.len() > MIN_PLAUSIBLE_KEY_LEN).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn user(quota: u32, usage: u32, last_usage_date: NaiveDate) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            username: "somsak".to_string(),
            password: "secret".to_string(),
            is_active: true,
            expiry_date: Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap(),
            created_at: Utc::now(),
            daily_quota: quota,
            usage_count: usage,
            last_usage_date,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    fn yesterday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
    }

    #[test]
    fn admin_is_always_allowed() {
        assert!(has_premium_allowance(&Requester::Admin, today()));
    }

    #[test]
    fn allowance_compares_usage_against_quota_when_date_is_today() {
        for (quota, usage, expected) in [(5, 0, true), (5, 4, true), (5, 5, false), (5, 9, false)] {
            let member = Requester::Member(user(quota, usage, today()));
            assert_eq!(
                has_premium_allowance(&member, today()),
                expected,
                "quota={quota} usage={usage}"
            );
        }
    }

    #[test]
    fn stale_date_means_effective_usage_zero() {
        // Any stored count is ignored when the stored date is not today.
        let member = Requester::Member(user(3, 99, yesterday()));
        assert!(has_premium_allowance(&member, today()));
    }

    #[test]
    fn zero_quota_yields_no_allowance_even_after_rollover() {
        let fresh = Requester::Member(user(0, 0, today()));
        assert!(!has_premium_allowance(&fresh, today()));

        // A stale date must not resurrect a zero quota.
        let stale = Requester::Member(user(0, 0, yesterday()));
        assert!(!has_premium_allowance(&stale, today()));
    }

    #[test]
    fn rolled_usage_increments_when_date_is_today() {
        assert_eq!(rolled_usage(4, today(), today()), 5);
        assert_eq!(rolled_usage(0, today(), today()), 1);
    }

    #[test]
    fn rolled_usage_resets_then_increments_on_stale_date() {
        assert_eq!(rolled_usage(7, yesterday(), today()), 1);
    }

    #[test]
    fn override_key_plausibility() {
        assert!(!is_plausible_override_key(None));
        assert!(!is_plausible_override_key(Some("short")));
        assert!(is_plausible_override_key(Some("AIzaSyExample123")));
    }
}
