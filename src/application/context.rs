//! Application context.
//!
//! The host opens one `AppContext` at startup and closes it on shutdown.
//! It wires the file-backed store and the chosen device into the services.

use crate::application::{NotificationService, TrackingService};
use crate::domain::{ContentTable, NotificationSettings, PregnancyInfo, ReminderKind};
use crate::error::Result;
use crate::infrastructure::{
    Config, FileRegistry, FileStore, Home, NotificationDevice, SettingsStore, UnavailableDevice,
};
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;

/// Set to `none` to run without native notification support
pub const DEVICE_ENV: &str = "PREGTRACK_DEVICE";

/// Device for `home`: the file registry, unless disabled through PREGTRACK_DEVICE
pub fn default_device(home: &Home) -> Arc<dyn NotificationDevice> {
    match std::env::var(DEVICE_ENV).as_deref() {
        Ok("none") => Arc::new(UnavailableDevice),
        _ => Arc::new(FileRegistry::in_dir(home.root())),
    }
}

pub struct AppContext {
    pub home: Home,
    pub config: Config,
    pub content: ContentTable,
    pub tracking: TrackingService<FileStore>,
    pub notifications: NotificationService<FileStore>,
}

impl AppContext {
    /// Open an initialized home with the given device
    pub fn open(home: Home, device: Arc<dyn NotificationDevice>) -> Result<Self> {
        let config = home.load_config()?;
        let content = ContentTable::load(home.root())?;
        let store = FileStore::in_dir(home.root());

        let tracking = TrackingService::new(SettingsStore::new(store.clone()), config.cycle_length);
        let notifications = NotificationService::new(
            device,
            SettingsStore::new(store),
            content.clone(),
            config.language.clone(),
        );

        tracing::debug!(home = %home.root().display(), "context opened");
        Ok(AppContext {
            home,
            config,
            content,
            tracking,
            notifications,
        })
    }

    /// Re-derive every reminder from persisted state
    pub async fn sync_reminders(&self) -> Result<NotificationSettings> {
        self.sync_reminders_at(Local::now().naive_local()).await
    }

    pub async fn sync_reminders_at(&self, now: NaiveDateTime) -> Result<NotificationSettings> {
        let settings = self.notifications.get_settings();
        self.apply(settings, now).await?;
        Ok(settings)
    }

    /// Change one toggle and re-derive reminders
    pub async fn set_enabled(&self, kind: ReminderKind, enabled: bool) -> Result<NotificationSettings> {
        self.set_enabled_at(kind, enabled, Local::now().naive_local())
            .await
    }

    pub async fn set_enabled_at(
        &self,
        kind: ReminderKind,
        enabled: bool,
        now: NaiveDateTime,
    ) -> Result<NotificationSettings> {
        let settings = self.notifications.get_settings().with(kind, enabled);
        self.apply(settings, now).await?;
        Ok(settings)
    }

    async fn apply(&self, settings: NotificationSettings, now: NaiveDateTime) -> Result<()> {
        let today = now.date();

        // An unreadable anchor means no date-based reminders, not a failure
        let anchor = match self.tracking.anchor() {
            Ok(record) => record.map(|r| r.last_period_start),
            Err(e) => {
                tracing::warn!(error = %e, "stored anchor unreadable");
                None
            }
        };
        let next_period = match self.tracking.next_period(today) {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!(error = %e, "stored cycle unreadable");
                None
            }
        };
        let current_week = anchor
            .map(|a| PregnancyInfo::compute(a, today).weeks_pregnant)
            .unwrap_or(0);

        self.notifications
            .update_notifications_at(settings, current_week, anchor, next_period, now)
            .await
    }

    /// Tear down the context
    pub fn close(self) {
        tracing::debug!(home = %self.home.root().display(), "context closed");
    }
}
