//! Service layer for the shutdown alerts application.
//!
//! This module contains the business logic for:
//! - Address extraction from free text (`extractor`)
//! - Abbreviation-tolerant address comparison (`matcher`)
//! - Provider page extraction (`PageExtractor`)
//! - Per-user lookup (`lookup`)
//! - Page fetching (`PageFetcher`, `HttpFetcher`, `CachedFetcher`)
//! - Report rendering (`report`)

pub mod extractor;
mod fetcher;
pub mod lookup;
pub mod matcher;
mod records;
pub mod report;

pub use fetcher::{CachedFetcher, HttpFetcher, PageFetcher};
pub use lookup::{find_for_addresses, find_for_user};
pub use records::{ExtractStats, PageExtractor, split_streets};
