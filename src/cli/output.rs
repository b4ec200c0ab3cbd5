//! Output formatting utilities

use crate::domain::{
    AnchorRecord, CycleInfo, NotificationSettings, PregnancyInfo, ReminderKind, ReminderRequest,
    RepeatInterval, WeekContent,
};

/// Format pregnancy progress for display
pub fn format_status(record: &AnchorRecord, info: &PregnancyInfo, content: &WeekContent) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Week {} + {} days (trimester {})\n",
        info.weeks_pregnant,
        info.days_in_current_week,
        info.trimester()
    ));
    output.push_str(&format!(
        "Due date: {} ({} days remaining)\n",
        info.due_date.format("%d-%m-%Y"),
        info.days_remaining
    ));
    output.push_str(&format!(
        "Last period: {} (entered as {})\n",
        record.last_period_start.date().format("%d-%m-%Y"),
        record.mode
    ));
    output.push_str(&format!("\n{}\n{}\n", content.title, content.body));

    if info.is_past_term() {
        output.push_str("\nPast 42 weeks. Consider switching to postpartum tracking.\n");
    }

    output
}

/// Format cycle prediction for display
pub fn format_cycle(info: &CycleInfo) -> String {
    format!(
        "Cycle day {}\nNext period: {} (in {} days)\n",
        info.cycle_day,
        info.next_period.format("%d-%m-%Y"),
        info.days_until_next_period
    )
}

/// Format installed reminders for display
pub fn format_reminders(reminders: &[ReminderRequest]) -> String {
    if reminders.is_empty() {
        return "No reminders scheduled".to_string();
    }

    let mut output = String::new();
    for reminder in reminders {
        let repeat = match reminder.repeat {
            Some(RepeatInterval::Daily) => "daily",
            Some(RepeatInterval::Weekly) => "weekly",
            None => "once",
        };
        output.push_str(&format!(
            "{:<16} {}  {:<6}  {}\n",
            reminder.kind.key(),
            reminder.fire_at.format("%d-%m-%Y %H:%M"),
            repeat,
            reminder.title
        ));
    }
    output
}

/// Format reminder toggles for display
pub fn format_settings(settings: &NotificationSettings) -> String {
    let mut output = String::new();
    for kind in ReminderKind::ALL {
        let state = if settings.is_enabled(kind) { "on" } else { "off" };
        output.push_str(&format!("{:<16} {}\n", kind.key(), state));
    }
    output
}
