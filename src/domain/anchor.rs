//! Anchor date handling and date input parsing

use crate::error::{PregtrackError, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of a full-term pregnancy counted from the last period start
pub const GESTATION_DAYS: i64 = 280;

/// Which input the user supplied when the anchor was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DueDateMode {
    /// First day of the last menstrual period
    #[default]
    Period,
    /// Expected due date
    DueDate,
}

impl FromStr for DueDateMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "period" => Ok(DueDateMode::Period),
            "duedate" | "due" => Ok(DueDateMode::DueDate),
            _ => Err(format!(
                "Invalid due date mode: '{}'. Valid modes are: period, duedate",
                s
            )),
        }
    }
}

impl fmt::Display for DueDateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueDateMode::Period => write!(f, "period"),
            DueDateMode::DueDate => write!(f, "duedate"),
        }
    }
}

/// The first day of the last menstrual period.
///
/// Always expressed as a period start, whichever input mode produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorDate(NaiveDate);

impl AnchorDate {
    /// Wrap a period start date without validation (used when loading stored state)
    pub fn new(last_period_start: NaiveDate) -> Self {
        AnchorDate(last_period_start)
    }

    /// Anchor from a user-entered last period start
    pub fn from_period(last_period_start: NaiveDate, today: NaiveDate) -> Result<Self> {
        if last_period_start > today {
            return Err(PregtrackError::InvalidAnchor(format!(
                "last period start {} is in the future",
                last_period_start
            )));
        }
        Ok(AnchorDate(last_period_start))
    }

    /// Anchor from a user-entered expected due date
    pub fn from_due_date(due_date: NaiveDate, today: NaiveDate) -> Result<Self> {
        if due_date < today {
            return Err(PregtrackError::InvalidAnchor(format!(
                "due date {} is in the past",
                due_date
            )));
        }

        let anchor = due_date - Duration::days(GESTATION_DAYS);
        if anchor > today {
            return Err(PregtrackError::InvalidAnchor(format!(
                "due date {} is more than {} days away",
                due_date, GESTATION_DAYS
            )));
        }

        Ok(AnchorDate(anchor))
    }

    /// Anchor from either input mode
    pub fn from_input(mode: DueDateMode, date: NaiveDate, today: NaiveDate) -> Result<Self> {
        match mode {
            DueDateMode::Period => Self::from_period(date, today),
            DueDateMode::DueDate => Self::from_due_date(date, today),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Expected due date (anchor + 280 days)
    pub fn due_date(&self) -> NaiveDate {
        self.0 + Duration::days(GESTATION_DAYS)
    }
}

impl fmt::Display for AnchorDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Persisted anchor together with the mode it was entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorRecord {
    pub last_period_start: AnchorDate,
    pub mode: DueDateMode,
}

impl AnchorRecord {
    pub fn new(last_period_start: AnchorDate, mode: DueDateMode) -> Self {
        AnchorRecord {
            last_period_start,
            mode,
        }
    }
}

/// Parse a user-supplied date.
///
/// Accepts `today`, `yesterday`, `YYYY-MM-DD` and `DD-MM-YYYY`.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let normalized = input.trim().to_lowercase();

    match normalized.as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        _ => NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&normalized, "%d-%m-%Y"))
            .map_err(|_| PregtrackError::InvalidDate(input.to_string())),
    }
}
