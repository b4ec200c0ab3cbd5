//! Pregnancy and cycle tracking use cases

use crate::domain::{
    AnchorDate, AnchorRecord, CycleInfo, CycleRecord, DueDateMode, PregnancyInfo,
};
use crate::error::{PregtrackError, Result};
use crate::infrastructure::{KeyValueStore, SettingsStore};
use chrono::NaiveDate;

/// Service recording the anchor date and logged periods
pub struct TrackingService<S> {
    settings: SettingsStore<S>,
    cycle_length: u32,
}

impl<S: KeyValueStore> TrackingService<S> {
    pub fn new(settings: SettingsStore<S>, cycle_length: u32) -> Self {
        TrackingService {
            settings,
            cycle_length,
        }
    }

    /// Record the anchor from a date entered in `mode`, validated against `today`
    pub fn set_anchor(
        &self,
        mode: DueDateMode,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<AnchorRecord> {
        let anchor = AnchorDate::from_input(mode, date, today)?;
        let record = AnchorRecord::new(anchor, mode);
        self.settings.save_anchor(&record)?;
        tracing::info!(anchor = %anchor, mode = %mode, "pregnancy anchor recorded");
        Ok(record)
    }

    pub fn set_period(&self, last_period_start: NaiveDate, today: NaiveDate) -> Result<AnchorRecord> {
        self.set_anchor(DueDateMode::Period, last_period_start, today)
    }

    pub fn set_due_date(&self, due_date: NaiveDate, today: NaiveDate) -> Result<AnchorRecord> {
        self.set_anchor(DueDateMode::DueDate, due_date, today)
    }

    pub fn anchor(&self) -> Result<Option<AnchorRecord>> {
        self.settings.load_anchor()
    }

    pub fn clear_anchor(&self) -> Result<()> {
        self.settings.clear_anchor()
    }

    /// Progress for `today`, or `None` without a recorded anchor
    pub fn status(&self, today: NaiveDate) -> Result<Option<PregnancyInfo>> {
        Ok(self
            .anchor()?
            .map(|record| PregnancyInfo::compute(record.last_period_start, today)))
    }

    /// Log the start of the most recent period
    pub fn log_cycle(&self, last_period_start: NaiveDate, today: NaiveDate) -> Result<CycleRecord> {
        if last_period_start > today {
            return Err(PregtrackError::InvalidDate(format!(
                "{} is in the future",
                last_period_start
            )));
        }

        let record = CycleRecord { last_period_start };
        self.settings.save_cycle(&record)?;
        Ok(record)
    }

    pub fn cycle_status(&self, today: NaiveDate) -> Result<Option<CycleInfo>> {
        Ok(self
            .settings
            .load_cycle()?
            .map(|record| CycleInfo::compute(record, self.cycle_length, today)))
    }

    /// Predicted next period start, if a cycle has been logged
    pub fn next_period(&self, today: NaiveDate) -> Result<Option<NaiveDate>> {
        Ok(self.cycle_status(today)?.map(|info| info.next_period))
    }
}
