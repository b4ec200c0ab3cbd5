//! Reminder scheduling use case.
//!
//! Owns the three reminder ids on the device registry. Every update persists
//! the toggles first, then for each reminder kind cancels the existing
//! instance and installs a fresh one when the toggle and the tracked dates
//! allow it. Device failures are logged and never returned to the caller.
//!
//! Titles and bodies are rendered for the first delivery only. Repeating
//! reminders carry that text until the next update, so hosts re-sync on
//! launch to keep the week number and daily tip current.

use crate::domain::reminder::{next_daily_fire, next_weekly_fire, period_fire};
use crate::domain::{
    AnchorDate, ContentTable, NotificationSettings, ReminderKind, ReminderRequest,
    RepeatInterval,
};
use crate::error::Result;
use crate::infrastructure::{KeyValueStore, NotificationDevice, SettingsStore};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Receives every settings change made through the service.
///
/// Dropping the subscription unsubscribes.
#[derive(Debug)]
pub struct SettingsSubscription {
    rx: watch::Receiver<NotificationSettings>,
}

impl SettingsSubscription {
    /// Latest settings
    pub fn current(&self) -> NotificationSettings {
        *self.rx.borrow()
    }

    /// Wait for the next change; `None` once the service is gone
    pub async fn changed(&mut self) -> Option<NotificationSettings> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

/// Service installing and cancelling local reminders
pub struct NotificationService<S> {
    device: Arc<dyn NotificationDevice>,
    settings: SettingsStore<S>,
    content: ContentTable,
    language: String,
    current: watch::Sender<NotificationSettings>,
}

impl<S: KeyValueStore> NotificationService<S> {
    /// Create the service, loading the persisted toggles
    pub fn new(
        device: Arc<dyn NotificationDevice>,
        settings: SettingsStore<S>,
        content: ContentTable,
        language: impl Into<String>,
    ) -> Self {
        let (current, _) = watch::channel(settings.get_settings());
        NotificationService {
            device,
            settings,
            content,
            language: language.into(),
            current,
        }
    }

    /// Toggles as last persisted
    pub fn get_settings(&self) -> NotificationSettings {
        *self.current.borrow()
    }

    pub fn subscribe(&self) -> SettingsSubscription {
        SettingsSubscription {
            rx: self.current.subscribe(),
        }
    }

    /// Persist `settings` and bring the device registry in line with them
    pub async fn update_notifications(
        &self,
        settings: NotificationSettings,
        current_week: u32,
        anchor: Option<AnchorDate>,
        next_period: Option<NaiveDate>,
    ) -> Result<()> {
        self.update_notifications_at(
            settings,
            current_week,
            anchor,
            next_period,
            Local::now().naive_local(),
        )
        .await
    }

    /// [`update_notifications`](Self::update_notifications) against an explicit `now`
    pub async fn update_notifications_at(
        &self,
        settings: NotificationSettings,
        current_week: u32,
        anchor: Option<AnchorDate>,
        next_period: Option<NaiveDate>,
        now: NaiveDateTime,
    ) -> Result<()> {
        self.settings.save_settings(&settings)?;
        self.current.send_replace(settings);

        if !self.device.is_available() {
            debug!("native notifications unavailable, skipping reminder update");
            return Ok(());
        }

        for kind in ReminderKind::ALL {
            let request = if settings.is_enabled(kind) {
                self.build_request(kind, current_week, anchor, next_period, now)
            } else {
                None
            };
            self.replace(kind, request).await;
        }

        Ok(())
    }

    /// Flip one toggle and re-derive reminders from the given state
    pub async fn set_enabled_at(
        &self,
        kind: ReminderKind,
        enabled: bool,
        current_week: u32,
        anchor: Option<AnchorDate>,
        next_period: Option<NaiveDate>,
        now: NaiveDateTime,
    ) -> Result<NotificationSettings> {
        let settings = self.get_settings().with(kind, enabled);
        self.update_notifications_at(settings, current_week, anchor, next_period, now)
            .await?;
        Ok(settings)
    }

    /// Ask for notification permission. Denial and failures both yield `false`.
    pub async fn request_permissions(&self) -> bool {
        if !self.device.is_available() {
            return false;
        }

        match self.device.request_permission().await {
            Ok(granted) => {
                info!(granted, "notification permission requested");
                granted
            }
            Err(e) => {
                warn!(error = %e, "notification permission request failed");
                false
            }
        }
    }

    /// Withdraw notification permission and drop the installed reminders
    pub async fn revoke_permissions(&self) {
        if !self.device.is_available() {
            return;
        }

        match self.device.revoke_permission().await {
            Ok(()) => info!("notification permission revoked"),
            Err(e) => warn!(error = %e, "failed to revoke notification permission"),
        }
        self.cancel_all_notifications().await;
    }

    /// Remove every reminder this service owns
    pub async fn cancel_all_notifications(&self) {
        if !self.device.is_available() {
            return;
        }

        if let Err(e) = self.device.cancel(&ReminderKind::all_ids()).await {
            warn!(error = %e, "failed to cancel reminders");
        }
    }

    /// Reminders currently on the device that belong to this service
    pub async fn pending(&self) -> Vec<ReminderRequest> {
        if !self.device.is_available() {
            return Vec::new();
        }

        match self.device.pending().await {
            Ok(pending) => pending
                .into_iter()
                .filter(|r| ReminderKind::from_id(r.id).is_some())
                .collect(),
            Err(e) => {
                warn!(error = %e, "failed to read pending reminders");
                Vec::new()
            }
        }
    }

    async fn replace(&self, kind: ReminderKind, request: Option<ReminderRequest>) {
        if let Err(e) = self.device.cancel(&[kind.id()]).await {
            warn!(reminder = %kind, error = %e, "failed to cancel reminder");
        }

        let Some(request) = request else {
            debug!(reminder = %kind, "no reminder to install");
            return;
        };

        match self.device.schedule(&request).await {
            Ok(()) => info!(reminder = %kind, fire_at = %request.fire_at, "reminder scheduled"),
            Err(e) => warn!(reminder = %kind, error = %e, "failed to schedule reminder"),
        }
    }

    fn build_request(
        &self,
        kind: ReminderKind,
        current_week: u32,
        anchor: Option<AnchorDate>,
        next_period: Option<NaiveDate>,
        now: NaiveDateTime,
    ) -> Option<ReminderRequest> {
        match kind {
            ReminderKind::WeeklyProgress => {
                let anchor = anchor?;
                let fire_at = next_weekly_fire(anchor, current_week, now)?;
                let week = ((fire_at.date() - anchor.date()).num_days() / 7) as u32;
                let content = self.content.week(&self.language, week);
                Some(ReminderRequest::new(
                    kind,
                    fire_at,
                    Some(RepeatInterval::Weekly),
                    content.title,
                    content.body,
                ))
            }
            ReminderKind::DailyTip => {
                let anchor = anchor?;
                let fire_at = next_daily_fire(now);
                let day = (fire_at.date() - anchor.date()).num_days().max(0) as u32;
                Some(ReminderRequest::new(
                    kind,
                    fire_at,
                    Some(RepeatInterval::Daily),
                    "Daily tip",
                    self.content.daily_tip(&self.language, day),
                ))
            }
            ReminderKind::PeriodReminder => {
                let next_period = next_period?;
                let fire_at = period_fire(next_period, now)?;
                Some(ReminderRequest::new(
                    kind,
                    fire_at,
                    None,
                    "Period reminder",
                    format!(
                        "Your next period is expected on {}.",
                        next_period.format("%B %d, %Y")
                    ),
                ))
            }
        }
    }
}
