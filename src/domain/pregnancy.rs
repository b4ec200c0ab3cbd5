//! Pregnancy progress derived from the anchor date

use crate::domain::anchor::{AnchorDate, GESTATION_DAYS};
use chrono::NaiveDate;

/// Weeks after which a pregnancy is considered past term
pub const PAST_TERM_WEEKS: u32 = 42;

/// Derived pregnancy progress. Never stored; recompute for every "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PregnancyInfo {
    pub weeks_pregnant: u32,
    pub days_in_current_week: u32,
    pub due_date: NaiveDate,
    pub days_remaining: u32,
    pub total_days: u32,
}

impl PregnancyInfo {
    /// Compute progress for `today`.
    ///
    /// A `today` before the anchor (clock skew, bad input) yields zero
    /// elapsed days rather than negative weeks.
    pub fn compute(anchor: AnchorDate, today: NaiveDate) -> Self {
        let elapsed = (today - anchor.date()).num_days().max(0);
        let due_date = anchor.due_date();
        let remaining = (due_date - today).num_days().max(0);

        PregnancyInfo {
            weeks_pregnant: (elapsed / 7) as u32,
            days_in_current_week: (elapsed % 7) as u32,
            due_date,
            days_remaining: remaining as u32,
            total_days: elapsed as u32,
        }
    }

    /// 1, 2 or 3
    pub fn trimester(&self) -> u8 {
        match self.weeks_pregnant {
            0..=13 => 1,
            14..=27 => 2,
            _ => 3,
        }
    }

    pub fn is_overdue(&self) -> bool {
        self.days_remaining == 0 && self.total_days > GESTATION_DAYS as u32
    }

    /// Past 42 weeks; the caller may offer postpartum tracking
    pub fn is_past_term(&self) -> bool {
        self.weeks_pregnant > PAST_TERM_WEEKS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_seventy_days_in() {
        let anchor = AnchorDate::new(today() - Duration::days(70));
        let info = PregnancyInfo::compute(anchor, today());

        assert_eq!(info.weeks_pregnant, 10);
        assert_eq!(info.days_in_current_week, 0);
        assert_eq!(info.due_date, anchor.date() + Duration::days(280));
        assert_eq!(info.days_remaining, 210);
        assert_eq!(info.total_days, 70);
    }

    #[test]
    fn test_anchor_today_is_all_zero() {
        let info = PregnancyInfo::compute(AnchorDate::new(today()), today());
        assert_eq!(info.total_days, 0);
        assert_eq!(info.weeks_pregnant, 0);
        assert_eq!(info.days_in_current_week, 0);
        assert_eq!(info.days_remaining, 280);
    }

    #[test]
    fn test_future_anchor_clamps_to_zero() {
        let anchor = AnchorDate::new(today() + Duration::days(10));
        let info = PregnancyInfo::compute(anchor, today());
        assert_eq!(info.total_days, 0);
        assert_eq!(info.weeks_pregnant, 0);
        assert_eq!(info.days_in_current_week, 0);
        assert_eq!(info.due_date, anchor.due_date());
        assert_eq!(info.days_remaining, 290);
    }

    #[test]
    fn test_partial_week() {
        let anchor = AnchorDate::new(today() - Duration::days(100));
        let info = PregnancyInfo::compute(anchor, today());
        assert_eq!(info.weeks_pregnant, 14);
        assert_eq!(info.days_in_current_week, 2);
        assert_eq!(info.days_remaining, 180);
        assert_eq!(info.trimester(), 2);
    }

    #[test]
    fn test_overdue_has_zero_remaining() {
        let anchor = AnchorDate::new(today() - Duration::days(300));
        let info = PregnancyInfo::compute(anchor, today());
        assert_eq!(info.weeks_pregnant, 42);
        assert_eq!(info.days_remaining, 0);
        assert!(info.is_overdue());
        assert!(!info.is_past_term());
    }

    #[test]
    fn test_no_error_past_42_weeks() {
        let anchor = AnchorDate::new(today() - Duration::days(7 * 45));
        let info = PregnancyInfo::compute(anchor, today());
        assert_eq!(info.weeks_pregnant, 45);
        assert!(info.is_past_term());
    }

    #[test]
    fn test_weeks_monotonic_as_today_advances() {
        let anchor = AnchorDate::new(today());
        let mut previous = 0;
        for offset in 0..400 {
            let info = PregnancyInfo::compute(anchor, today() + Duration::days(offset));
            assert_eq!(info.weeks_pregnant as i64, offset / 7);
            assert!(info.weeks_pregnant >= previous);
            previous = info.weeks_pregnant;
        }
    }

    #[test]
    fn test_compute_is_deterministic() {
        let anchor = AnchorDate::new(today() - Duration::days(33));
        assert_eq!(
            PregnancyInfo::compute(anchor, today()),
            PregnancyInfo::compute(anchor, today())
        );
    }
}
