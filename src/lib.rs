// src/lib.rs

//! Utility shutdown alerts library.
//!
//! Scrapes provider schedule pages into [`models::ShutdownSchedule`]s and
//! matches them against user addresses.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
