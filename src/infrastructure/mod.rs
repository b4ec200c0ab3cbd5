//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod device;
pub mod home;
pub mod settings;
pub mod store;

pub use config::Config;
pub use device::{FileRegistry, MemoryRegistry, NotificationDevice, UnavailableDevice};
pub use home::Home;
pub use settings::SettingsStore;
pub use store::{FileStore, KeyValueStore, MemoryStore};
