//! Domain layer - Date model, reminder timing and content

pub mod anchor;
pub mod content;
pub mod cycle;
pub mod pregnancy;
pub mod reminder;
pub mod settings;

pub use anchor::{parse_date, AnchorDate, AnchorRecord, DueDateMode, GESTATION_DAYS};
pub use content::{ContentTable, WeekContent};
pub use cycle::{CycleInfo, CycleRecord};
pub use pregnancy::PregnancyInfo;
pub use reminder::{ReminderKind, ReminderRequest, RepeatInterval};
pub use settings::NotificationSettings;
