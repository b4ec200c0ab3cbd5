//! pregtrack - Pregnancy and cycle tracker
//!
//! Derives pregnancy progress from a single anchor date, persists user
//! preferences locally and keeps a small fixed set of device reminders
//! (weekly progress, daily tip, period reminder) in line with them.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::PregtrackError;
