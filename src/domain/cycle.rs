//! Menstrual cycle prediction

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CYCLE_LENGTH: u32 = 28;
pub const MIN_CYCLE_LENGTH: u32 = 15;
pub const MAX_CYCLE_LENGTH: u32 = 60;

/// Logged cycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRecord {
    pub last_period_start: NaiveDate,
}

/// Cycle position derived for a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleInfo {
    /// 1-based day within the current cycle; 0 before the logged start
    pub cycle_day: u32,
    pub next_period: NaiveDate,
    pub days_until_next_period: u32,
}

impl CycleInfo {
    /// Predict the next period start strictly after `today`
    pub fn compute(record: CycleRecord, cycle_length: u32, today: NaiveDate) -> Self {
        let start = record.last_period_start;
        if start > today {
            return CycleInfo {
                cycle_day: 0,
                next_period: start,
                days_until_next_period: (start - today).num_days() as u32,
            };
        }

        let length = cycle_length.max(1) as i64;
        let elapsed = (today - start).num_days();
        let completed = elapsed / length;
        let next_period = start + Duration::days((completed + 1) * length);

        CycleInfo {
            cycle_day: (elapsed % length + 1) as u32,
            next_period,
            days_until_next_period: (next_period - today).num_days() as u32,
        }
    }
}

pub fn is_valid_cycle_length(length: u32) -> bool {
    (MIN_CYCLE_LENGTH..=MAX_CYCLE_LENGTH).contains(&length)
}
