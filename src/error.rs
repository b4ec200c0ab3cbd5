//! Error types for pregtrack

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pregtrack
#[derive(Debug, Error)]
pub enum PregtrackError {
    #[error("Not a pregtrack home: {0}")]
    NotInitialized(PathBuf),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid anchor date: {0}")]
    InvalidAnchor(String),

    #[error("No pregnancy anchor recorded")]
    MissingAnchor,

    #[error("Unknown reminder kind: {0}")]
    UnknownReminder(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Content table error: {0}")]
    Content(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl PregtrackError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PregtrackError::NotInitialized(_) => 2,
            PregtrackError::InvalidDate(_) | PregtrackError::InvalidAnchor(_) => 3,
            PregtrackError::MissingAnchor => 4,
            PregtrackError::UnknownReminder(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            PregtrackError::NotInitialized(path) => {
                format!(
                    "Not a pregtrack home: {}\n\n\
                    Suggestions:\n\
                    • Run 'pregtrack init' to create the data directory\n\
                    • Set PREGTRACK_HOME environment variable to an existing home",
                    path.display()
                )
            }
            PregtrackError::InvalidDate(input) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Accepted formats:\n\
                    • YYYY-MM-DD (e.g., 2025-01-17)\n\
                    • DD-MM-YYYY (e.g., 17-01-2025)",
                    input
                )
            }
            PregtrackError::InvalidAnchor(msg) => {
                format!(
                    "Invalid anchor date: {}\n\n\
                    Rules:\n\
                    • The last period start cannot be in the future\n\
                    • The due date cannot be in the past\n\
                    • The due date cannot be more than 280 days away",
                    msg
                )
            }
            PregtrackError::MissingAnchor => "No pregnancy anchor recorded\n\n\
                Suggestions:\n\
                • pregtrack anchor period 2025-01-17\n\
                • pregtrack anchor due 2025-10-24"
                .to_string(),
            PregtrackError::UnknownReminder(kind) => {
                format!(
                    "Unknown reminder kind: '{}'\n\n\
                    Valid kinds: weekly, daily, period",
                    kind
                )
            }
            PregtrackError::Config(msg) => {
                if msg.contains("cycle_length") {
                    format!(
                        "{}\n\n\
                        Cycle length must be between 15 and 60 days\n\
                        Example: pregtrack config cycle_length 30",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using PregtrackError
pub type Result<T> = std::result::Result<T, PregtrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_initialized_suggestion() {
        let err = PregtrackError::NotInitialized(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("pregtrack init"));
        assert!(msg.contains("PREGTRACK_HOME"));
    }

    #[test]
    fn test_invalid_date_lists_formats() {
        let err = PregtrackError::InvalidDate("soon".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("'soon'"));
        assert!(msg.contains("YYYY-MM-DD"));
        assert!(msg.contains("DD-MM-YYYY"));
    }

    #[test]
    fn test_missing_anchor_examples() {
        let msg = PregtrackError::MissingAnchor.display_with_suggestions();
        assert!(msg.contains("pregtrack anchor period"));
        assert!(msg.contains("pregtrack anchor due"));
    }

    #[test]
    fn test_cycle_length_suggestion() {
        let err = PregtrackError::Config("Invalid cycle_length: 3".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("between 15 and 60"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(PregtrackError::NotInitialized(PathBuf::new()).exit_code(), 2);
        assert_eq!(PregtrackError::InvalidDate(String::new()).exit_code(), 3);
        assert_eq!(PregtrackError::MissingAnchor.exit_code(), 4);
        assert_eq!(PregtrackError::Storage(String::new()).exit_code(), 1);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = PregtrackError::Storage("disk full".to_string());
        assert_eq!(err.display_with_suggestions(), "Storage error: disk full");
    }
}
