//! Device notification capability.
//!
//! The scheduler only talks to [`NotificationDevice`]. Hosts plug in the
//! OS notification API they have; this module ships a file-backed registry
//! for the command line, an in-memory one, and a stand-in for hosts with no
//! native scheduling at all.

use crate::domain::ReminderRequest;
use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const REGISTRY_FILE: &str = "reminders.toml";

/// Schedule and cancel local reminders on the device
#[async_trait]
pub trait NotificationDevice: Send + Sync {
    /// Whether the host can schedule native notifications at all
    fn is_available(&self) -> bool;

    /// Ask the user for permission; `Ok(false)` when denied
    async fn request_permission(&self) -> anyhow::Result<bool>;

    /// Withdraw a granted permission. Hosts that cannot do this ignore it.
    async fn revoke_permission(&self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Install a reminder. An existing reminder with the same id is replaced.
    async fn schedule(&self, request: &ReminderRequest) -> anyhow::Result<()>;

    /// Remove reminders by id. Unknown ids are ignored.
    async fn cancel(&self, ids: &[i32]) -> anyhow::Result<()>;

    /// Reminders currently installed, ordered by id
    async fn pending(&self) -> anyhow::Result<Vec<ReminderRequest>>;
}

/// Host without native notification support (e.g. a browser tab)
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableDevice;

#[async_trait]
impl NotificationDevice for UnavailableDevice {
    fn is_available(&self) -> bool {
        false
    }

    async fn request_permission(&self) -> anyhow::Result<bool> {
        Ok(false)
    }

    async fn schedule(&self, request: &ReminderRequest) -> anyhow::Result<()> {
        bail!("native notifications unavailable, cannot schedule {}", request.kind)
    }

    async fn cancel(&self, _ids: &[i32]) -> anyhow::Result<()> {
        Ok(())
    }

    async fn pending(&self) -> anyhow::Result<Vec<ReminderRequest>> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryState {
    #[serde(default)]
    permission_granted: bool,
    #[serde(default, rename = "reminder")]
    reminders: Vec<ReminderRequest>,
}

impl RegistryState {
    fn by_id(self) -> (bool, BTreeMap<i32, ReminderRequest>) {
        let map = self.reminders.into_iter().map(|r| (r.id, r)).collect();
        (self.permission_granted, map)
    }
}

/// Registry kept in `<home>/reminders.toml`
#[derive(Debug, Clone)]
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(path: PathBuf) -> Self {
        FileRegistry { path }
    }

    pub fn in_dir(home: &Path) -> Self {
        Self::new(home.join(REGISTRY_FILE))
    }

    fn read(&self) -> anyhow::Result<(bool, BTreeMap<i32, ReminderRequest>)> {
        if !self.path.exists() {
            return Ok((false, BTreeMap::new()));
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let state: RegistryState = toml::from_str(&contents)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(state.by_id())
    }

    fn write(
        &self,
        permission_granted: bool,
        reminders: BTreeMap<i32, ReminderRequest>,
    ) -> anyhow::Result<()> {
        let state = RegistryState {
            permission_granted,
            reminders: reminders.into_values().collect(),
        };
        let contents = toml::to_string_pretty(&state)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

#[async_trait]
impl NotificationDevice for FileRegistry {
    fn is_available(&self) -> bool {
        true
    }

    async fn request_permission(&self) -> anyhow::Result<bool> {
        let (_, reminders) = self.read()?;
        self.write(true, reminders)?;
        Ok(true)
    }

    async fn revoke_permission(&self) -> anyhow::Result<()> {
        let (_, reminders) = self.read()?;
        self.write(false, reminders)
    }

    async fn schedule(&self, request: &ReminderRequest) -> anyhow::Result<()> {
        let (granted, mut reminders) = self.read()?;
        if !granted {
            bail!("notification permission not granted");
        }
        reminders.insert(request.id, request.clone());
        self.write(granted, reminders)
    }

    async fn cancel(&self, ids: &[i32]) -> anyhow::Result<()> {
        let (granted, mut reminders) = self.read()?;
        let before = reminders.len();
        reminders.retain(|id, _| !ids.contains(id));
        if reminders.len() != before {
            self.write(granted, reminders)?;
        }
        Ok(())
    }

    async fn pending(&self) -> anyhow::Result<Vec<ReminderRequest>> {
        let (_, reminders) = self.read()?;
        Ok(reminders.into_values().collect())
    }
}

/// Registry held in memory
#[derive(Debug)]
pub struct MemoryRegistry {
    granted: bool,
    reminders: Mutex<BTreeMap<i32, ReminderRequest>>,
}

impl MemoryRegistry {
    /// Registry whose permission prompt answers `granted`
    pub fn new(granted: bool) -> Self {
        MemoryRegistry {
            granted,
            reminders: Mutex::new(BTreeMap::new()),
        }
    }

    fn lock(&self) -> anyhow::Result<std::sync::MutexGuard<'_, BTreeMap<i32, ReminderRequest>>> {
        self.reminders
            .lock()
            .map_err(|_| anyhow!("reminder registry poisoned"))
    }
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl NotificationDevice for MemoryRegistry {
    fn is_available(&self) -> bool {
        true
    }

    async fn request_permission(&self) -> anyhow::Result<bool> {
        Ok(self.granted)
    }

    async fn schedule(&self, request: &ReminderRequest) -> anyhow::Result<()> {
        if !self.granted {
            bail!("notification permission not granted");
        }
        self.lock()?.insert(request.id, request.clone());
        Ok(())
    }

    async fn cancel(&self, ids: &[i32]) -> anyhow::Result<()> {
        self.lock()?.retain(|id, _| !ids.contains(id));
        Ok(())
    }

    async fn pending(&self) -> anyhow::Result<Vec<ReminderRequest>> {
        Ok(self.lock()?.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReminderKind, RepeatInterval};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn request(kind: ReminderKind, day: u32) -> ReminderRequest {
        ReminderRequest::new(
            kind,
            NaiveDate::from_ymd_opt(2025, 3, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            Some(RepeatInterval::Weekly),
            "title",
            "body",
        )
    }

    #[tokio::test]
    async fn test_file_registry_requires_permission() {
        let temp = TempDir::new().unwrap();
        let registry = FileRegistry::in_dir(temp.path());

        assert!(registry
            .schedule(&request(ReminderKind::WeeklyProgress, 3))
            .await
            .is_err());

        assert!(registry.request_permission().await.unwrap());
        registry
            .schedule(&request(ReminderKind::WeeklyProgress, 3))
            .await
            .unwrap();
        assert_eq!(registry.pending().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_file_registry_replaces_same_id() {
        let temp = TempDir::new().unwrap();
        let registry = FileRegistry::in_dir(temp.path());
        registry.request_permission().await.unwrap();

        registry
            .schedule(&request(ReminderKind::WeeklyProgress, 3))
            .await
            .unwrap();
        registry
            .schedule(&request(ReminderKind::WeeklyProgress, 10))
            .await
            .unwrap();

        let pending = FileRegistry::in_dir(temp.path()).pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].fire_at.date(), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    }

    #[tokio::test]
    async fn test_file_registry_cancel() {
        let temp = TempDir::new().unwrap();
        let registry = FileRegistry::in_dir(temp.path());
        registry.request_permission().await.unwrap();

        registry
            .schedule(&request(ReminderKind::WeeklyProgress, 3))
            .await
            .unwrap();
        registry
            .schedule(&request(ReminderKind::DailyTip, 3))
            .await
            .unwrap();
        registry.cancel(&[1001, 4242]).await.unwrap();

        let pending = registry.pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].kind, ReminderKind::DailyTip);
    }

    #[tokio::test]
    async fn test_file_registry_revoke() {
        let temp = TempDir::new().unwrap();
        let registry = FileRegistry::in_dir(temp.path());
        registry.request_permission().await.unwrap();
        registry.revoke_permission().await.unwrap();

        assert!(registry
            .schedule(&request(ReminderKind::DailyTip, 3))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_memory_registry_denied() {
        let registry = MemoryRegistry::new(false);
        assert!(!registry.request_permission().await.unwrap());
        assert!(registry
            .schedule(&request(ReminderKind::DailyTip, 3))
            .await
            .is_err());
        assert!(registry.pending().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_device() {
        let device = UnavailableDevice;
        assert!(!device.is_available());
        assert!(!device.request_permission().await.unwrap());
        assert!(device.pending().await.unwrap().is_empty());
        device.cancel(&[1001]).await.unwrap();
    }
}
