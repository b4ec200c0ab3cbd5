//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{AnchorAction, Cli, Commands, CycleAction, NotifyAction};
pub use output::{format_cycle, format_reminders, format_settings, format_status};
