//! CLI command definitions

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pregtrack")]
#[command(about = "Pregnancy and cycle tracker with local reminders", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the data directory and ask for notification permission
    Init {
        /// Content language (e.g. en, es)
        #[arg(short, long, default_value = "en")]
        language: String,
    },

    /// Show pregnancy progress for today
    Status,

    /// Record the pregnancy anchor date
    Anchor {
        #[command(subcommand)]
        action: AnchorAction,
    },

    /// Log periods and show the cycle prediction
    Cycle {
        #[command(subcommand)]
        action: CycleAction,
    },

    /// Manage local reminders
    Notify {
        #[command(subcommand)]
        action: NotifyAction,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum AnchorAction {
    /// First day of the last period (YYYY-MM-DD, DD-MM-YYYY, today)
    Period { date: String },
    /// Expected due date (YYYY-MM-DD, DD-MM-YYYY)
    Due { date: String },
    /// Forget the recorded anchor
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum CycleAction {
    /// Log the start of the most recent period
    Log { date: String },
    /// Show cycle day and predicted next period
    Status,
}

#[derive(Subcommand, Debug)]
pub enum NotifyAction {
    /// List installed reminders
    List,
    /// Show reminder toggles
    Settings,
    /// Turn a reminder on (weekly, daily, period)
    Enable { kind: String },
    /// Turn a reminder off (weekly, daily, period)
    Disable { kind: String },
    /// Reinstall reminders from the saved state
    Sync,
    /// Remove all reminders
    CancelAll,
    /// Request notification permission
    Permission {
        /// Withdraw the permission and remove installed reminders
        #[arg(long)]
        revoke: bool,
    },
}
