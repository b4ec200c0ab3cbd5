//! Reminder identities and fire-time computation

use crate::domain::anchor::AnchorDate;
use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hour (local) at which weekly and period reminders fire
pub const WEEKLY_HOUR: u32 = 9;
/// Hour (local) at which daily tips fire
pub const DAILY_HOUR: u32 = 8;
/// Days before the predicted period start that the period reminder fires
pub const PERIOD_LEAD_DAYS: i64 = 2;

/// The three reminders this crate owns on the device registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderKind {
    WeeklyProgress,
    DailyTip,
    PeriodReminder,
}

impl ReminderKind {
    pub const ALL: [ReminderKind; 3] = [
        ReminderKind::WeeklyProgress,
        ReminderKind::DailyTip,
        ReminderKind::PeriodReminder,
    ];

    /// Fixed device-registry identifier
    pub fn id(&self) -> i32 {
        match self {
            ReminderKind::WeeklyProgress => 1001,
            ReminderKind::DailyTip => 1002,
            ReminderKind::PeriodReminder => 1003,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ReminderKind::WeeklyProgress => "weekly-progress",
            ReminderKind::DailyTip => "daily-tip",
            ReminderKind::PeriodReminder => "period-reminder",
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn all_ids() -> Vec<i32> {
        Self::ALL.iter().map(ReminderKind::id).collect()
    }
}

impl FromStr for ReminderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" | "weekly-progress" => Ok(ReminderKind::WeeklyProgress),
            "daily" | "daily-tip" | "tips" => Ok(ReminderKind::DailyTip),
            "period" | "period-reminder" => Ok(ReminderKind::PeriodReminder),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How often a reminder repeats after its first delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatInterval {
    Daily,
    Weekly,
}

/// A reminder ready to be handed to the device scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderRequest {
    pub id: i32,
    pub kind: ReminderKind,
    /// Local wall-clock time of the first delivery
    pub fire_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<RepeatInterval>,
    pub title: String,
    pub body: String,
}

impl ReminderRequest {
    pub fn new(
        kind: ReminderKind,
        fire_at: NaiveDateTime,
        repeat: Option<RepeatInterval>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        ReminderRequest {
            id: kind.id(),
            kind,
            fire_at,
            repeat,
            title: title.into(),
            body: body.into(),
        }
    }
}

fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    // hour is always one of the constants above
    date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN))
}

/// First weekly-progress delivery strictly after `now`.
///
/// Starts at the beginning of `current_week` (anchor + 7 × week, 09:00) and
/// advances a week at a time until the instant lies in the future. Returns
/// `None` when the anchor is after today, or when the week lies outside the
/// calendar range.
pub fn next_weekly_fire(
    anchor: AnchorDate,
    current_week: u32,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    if anchor.date() > now.date() {
        return None;
    }

    let start = anchor
        .date()
        .checked_add_days(Days::new(7 * u64::from(current_week)))?;
    let mut fire_at = at_hour(start, WEEKLY_HOUR);
    while fire_at <= now {
        fire_at = fire_at.checked_add_signed(Duration::days(7))?;
    }
    Some(fire_at)
}

/// First daily-tip delivery: today at 08:00, or tomorrow when that has passed
pub fn next_daily_fire(now: NaiveDateTime) -> NaiveDateTime {
    let today = at_hour(now.date(), DAILY_HOUR);
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

/// Period reminder instant (two days ahead of `next_period`, 09:00).
///
/// `None` when that instant is not in the future.
pub fn period_fire(next_period: NaiveDate, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let lead = next_period.checked_sub_signed(Duration::days(PERIOD_LEAD_DAYS))?;
    let fire_at = at_hour(lead, WEEKLY_HOUR);
    (fire_at > now).then_some(fire_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn anchor(y: i32, m: u32, d: u32) -> AnchorDate {
        AnchorDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_ids_are_stable_and_distinct() {
        assert_eq!(ReminderKind::WeeklyProgress.id(), 1001);
        assert_eq!(ReminderKind::DailyTip.id(), 1002);
        assert_eq!(ReminderKind::PeriodReminder.id(), 1003);
        assert_eq!(ReminderKind::from_id(1002), Some(ReminderKind::DailyTip));
        assert_eq!(ReminderKind::from_id(7), None);
        assert_eq!(ReminderKind::all_ids(), vec![1001, 1002, 1003]);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            ReminderKind::from_str("weekly").unwrap(),
            ReminderKind::WeeklyProgress
        );
        assert_eq!(
            ReminderKind::from_str("Daily-Tip").unwrap(),
            ReminderKind::DailyTip
        );
        assert_eq!(
            ReminderKind::from_str("period").unwrap(),
            ReminderKind::PeriodReminder
        );
        assert!(ReminderKind::from_str("hourly").is_err());
    }

    #[test]
    fn test_weekly_fire_later_today() {
        // Anchor 2025-03-03, week 2 starts 2025-03-17; now is 07:00 that day
        let now = dt(2025, 3, 17, 7, 0);
        let fire = next_weekly_fire(anchor(2025, 3, 3), 2, now).unwrap();
        assert_eq!(fire, dt(2025, 3, 17, 9, 0));
    }

    #[test]
    fn test_weekly_fire_advances_when_past() {
        let now = dt(2025, 3, 19, 12, 0);
        let fire = next_weekly_fire(anchor(2025, 3, 3), 2, now).unwrap();
        assert_eq!(fire, dt(2025, 3, 24, 9, 0));
    }

    #[test]
    fn test_weekly_fire_exactly_now_is_advanced() {
        let now = dt(2025, 3, 17, 9, 0);
        let fire = next_weekly_fire(anchor(2025, 3, 3), 2, now).unwrap();
        assert_eq!(fire, dt(2025, 3, 24, 9, 0));
    }

    #[test]
    fn test_weekly_fire_stale_week_still_future() {
        let now = dt(2025, 6, 1, 10, 0);
        let fire = next_weekly_fire(anchor(2025, 3, 3), 0, now).unwrap();
        assert!(fire > now);
        assert_eq!((fire.date() - NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()).num_days() % 7, 0);
    }

    #[test]
    fn test_weekly_fire_future_anchor() {
        let now = dt(2025, 3, 1, 10, 0);
        assert!(next_weekly_fire(anchor(2025, 3, 3), 0, now).is_none());
    }

    #[test]
    fn test_weekly_fire_out_of_range_week() {
        let now = dt(2025, 6, 1, 10, 0);
        assert!(next_weekly_fire(anchor(2025, 3, 3), u32::MAX, now).is_none());
    }

    #[test]
    fn test_daily_fire_before_eight() {
        assert_eq!(next_daily_fire(dt(2025, 3, 1, 7, 59)), dt(2025, 3, 1, 8, 0));
    }

    #[test]
    fn test_daily_fire_after_eight() {
        assert_eq!(next_daily_fire(dt(2025, 3, 1, 8, 0)), dt(2025, 3, 2, 8, 0));
        assert_eq!(next_daily_fire(dt(2025, 3, 31, 22, 0)), dt(2025, 4, 1, 8, 0));
    }

    #[test]
    fn test_period_fire_in_future() {
        let next = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        assert_eq!(
            period_fire(next, dt(2025, 3, 1, 12, 0)),
            Some(dt(2025, 3, 18, 9, 0))
        );
    }

    #[test]
    fn test_period_fire_in_past_is_none() {
        let next = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        assert_eq!(period_fire(next, dt(2025, 3, 18, 9, 0)), None);
        assert_eq!(period_fire(next, dt(2025, 3, 25, 9, 0)), None);
    }

    #[test]
    fn test_period_fire_at_calendar_start() {
        assert_eq!(period_fire(NaiveDate::MIN, dt(2025, 3, 1, 12, 0)), None);
    }
}
