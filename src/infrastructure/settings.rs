//! Settings persistence on top of a key-value store

use crate::domain::{AnchorRecord, CycleRecord, NotificationSettings};
use crate::error::Result;
use crate::infrastructure::store::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const SETTINGS_KEY: &str = "notification_settings";
pub const ANCHOR_KEY: &str = "pregnancy_anchor";
pub const CYCLE_KEY: &str = "cycle_record";

/// Reads and writes user preferences and tracked dates
#[derive(Debug)]
pub struct SettingsStore<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(store: S) -> Self {
        SettingsStore { store }
    }

    /// Saved notification toggles, or the defaults on first run.
    ///
    /// An unreadable stored value also yields the defaults.
    pub fn get_settings(&self) -> NotificationSettings {
        match self.load::<NotificationSettings>(SETTINGS_KEY) {
            Ok(Some(settings)) => settings,
            Ok(None) => NotificationSettings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "stored notification settings unreadable, using defaults");
                NotificationSettings::default()
            }
        }
    }

    /// Overwrite the saved toggles
    pub fn save_settings(&self, settings: &NotificationSettings) -> Result<()> {
        self.save(SETTINGS_KEY, settings)
    }

    pub fn load_anchor(&self) -> Result<Option<AnchorRecord>> {
        self.load(ANCHOR_KEY)
    }

    pub fn save_anchor(&self, record: &AnchorRecord) -> Result<()> {
        self.save(ANCHOR_KEY, record)
    }

    pub fn clear_anchor(&self) -> Result<()> {
        self.store.remove(ANCHOR_KEY)
    }

    pub fn load_cycle(&self) -> Result<Option<CycleRecord>> {
        self.load(CYCLE_KEY)
    }

    pub fn save_cycle(&self, record: &CycleRecord) -> Result<()> {
        self.save(CYCLE_KEY, record)
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(toml::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = toml::to_string(value)?;
        self.store.set(key, &raw)
    }
}
