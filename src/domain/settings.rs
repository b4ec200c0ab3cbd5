//! User notification toggles

use crate::domain::reminder::ReminderKind;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Independent on/off switch per reminder kind. All on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub weekly_notifications: bool,
    #[serde(default = "default_true")]
    pub daily_tips_notifications: bool,
    #[serde(default = "default_true")]
    pub period_notifications: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            weekly_notifications: true,
            daily_tips_notifications: true,
            period_notifications: true,
        }
    }
}

impl NotificationSettings {
    pub fn is_enabled(&self, kind: ReminderKind) -> bool {
        match kind {
            ReminderKind::WeeklyProgress => self.weekly_notifications,
            ReminderKind::DailyTip => self.daily_tips_notifications,
            ReminderKind::PeriodReminder => self.period_notifications,
        }
    }

    /// Copy with one toggle changed
    pub fn with(mut self, kind: ReminderKind, enabled: bool) -> Self {
        match kind {
            ReminderKind::WeeklyProgress => self.weekly_notifications = enabled,
            ReminderKind::DailyTip => self.daily_tips_notifications = enabled,
            ReminderKind::PeriodReminder => self.period_notifications = enabled,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_all_enabled() {
        let settings = NotificationSettings::default();
        for kind in ReminderKind::ALL {
            assert!(settings.is_enabled(kind));
        }
    }

    #[test]
    fn test_with_changes_only_one_toggle() {
        let settings = NotificationSettings::default().with(ReminderKind::DailyTip, false);
        assert!(settings.weekly_notifications);
        assert!(!settings.daily_tips_notifications);
        assert!(settings.period_notifications);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: NotificationSettings = toml::from_str("period_notifications = false").unwrap();
        assert!(settings.weekly_notifications);
        assert!(settings.daily_tips_notifications);
        assert!(!settings.period_notifications);
    }
}
