//! Application layer - Use cases and orchestration

pub mod context;
pub mod init;
pub mod manage_config;
pub mod notifications;
pub mod tracking;

pub use context::AppContext;
pub use manage_config::ConfigService;
pub use notifications::{NotificationService, SettingsSubscription};
pub use tracking::TrackingService;
