// src/models/mod.rs

//! Domain models for the shutdown alerts application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod address;
mod catalog;
mod config;
mod date_range;
mod schedule;
mod selectors;
mod user;

// Re-export all public types
pub use address::{Address, AddressKey};
pub use catalog::{City, Service};
pub use config::{CityInfo, Config, FetcherConfig, LoggingConfig, PathsConfig, SourceConfig};
pub use date_range::DateRange;
pub use schedule::{ScheduleEntry, ShutdownSchedule};
pub use selectors::TableSelectors;
pub use user::User;
