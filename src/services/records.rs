// src/services/records.rs

//! Shutdown-schedule page extraction.
//!
//! Turns a provider's HTML table into a [`ShutdownSchedule`]. Each eligible
//! row carries one outage window and a streets cell listing the affected
//! streets and houses. Malformed rows are logged and skipped; extraction
//! itself never fails.

use std::sync::LazyLock;

use chrono_tz::Tz;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Address, City, DateRange, ShutdownSchedule, TableSelectors};
use crate::services::extractor;
use crate::utils::clean_text;

/// A comma-separated fragment that continues the previous street
/// (`"д.10"`, `"дом 3"`, `"корп.2"`).
static HOUSE_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:д\.?|дом)\s*[0-9]|корп\.)").expect("house fragment pattern is valid")
});

/// Counters collected while extracting one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Rows that had a streets cell
    pub rows_seen: usize,
    /// Rows that produced at least one association
    pub rows_used: usize,
    /// Rows dropped for bad dates or unparsable streets
    pub rows_skipped: usize,
    /// Address/window associations produced (before deduplication)
    pub associations: usize,
}

/// Extracts shutdown records from one provider's pages.
pub struct PageExtractor {
    city: City,
    timezone: Tz,
    date_format: String,
    date_cell_offset: usize,
    row_sel: Selector,
    cell_sel: Selector,
    streets_sel: Selector,
    item_sel: Selector,
}

impl PageExtractor {
    /// Create an extractor for pages of `city`, whose timestamps are in `timezone`.
    pub fn new(city: City, timezone: Tz, selectors: &TableSelectors) -> Result<Self> {
        Ok(Self {
            city,
            timezone,
            date_format: selectors.date_format.clone(),
            date_cell_offset: selectors.date_cell_offset,
            row_sel: parse_selector(&selectors.row_selector)?,
            cell_sel: parse_selector(&selectors.cell_selector)?,
            streets_sel: parse_selector(&selectors.streets_cell_selector)?,
            item_sel: parse_selector(&selectors.street_item_selector)?,
        })
    }

    /// Extract every address/window association from `html_content`.
    ///
    /// An empty schedule means the page published nothing usable.
    pub fn extract_records(&self, html_content: &str) -> ShutdownSchedule {
        self.extract_records_with_stats(html_content).0
    }

    /// Same as [`extract_records`](Self::extract_records), also returning row counters.
    pub fn extract_records_with_stats(
        &self,
        html_content: &str,
    ) -> (ShutdownSchedule, ExtractStats) {
        let document = Html::parse_document(html_content);
        let mut schedule = ShutdownSchedule::new();
        let mut stats = ExtractStats::default();

        for row in document.select(&self.row_sel) {
            let Some(streets_cell) = row.select(&self.streets_sel).next() else {
                continue;
            };
            stats.rows_seen += 1;

            let added = self.extract_row(&row, &streets_cell, &mut schedule);
            if added > 0 {
                stats.rows_used += 1;
                stats.associations += added;
            } else {
                stats.rows_skipped += 1;
            }
        }

        log::debug!(
            "Extracted {} addresses from {} rows ({} skipped)",
            schedule.len(),
            stats.rows_seen,
            stats.rows_skipped
        );

        (schedule, stats)
    }

    /// Add one row's associations to `schedule`, returning how many were added.
    fn extract_row(
        &self,
        row: &ElementRef,
        streets_cell: &ElementRef,
        schedule: &mut ShutdownSchedule,
    ) -> usize {
        let cells: Vec<String> = row
            .select(&self.cell_sel)
            .map(|cell| clean_text(&cell.text().collect::<String>()))
            .collect();
        let cell = |index: usize| cells.get(index).map(String::as_str).unwrap_or("");

        let offset = self.date_cell_offset;
        let Some(range) = self.parse_range(
            cell(offset),
            cell(offset + 1),
            cell(offset + 2),
            cell(offset + 3),
        ) else {
            log::warn!(
                "Skipping row with unparsable window [{} {}] - [{} {}]",
                cell(offset),
                cell(offset + 1),
                cell(offset + 2),
                cell(offset + 3)
            );
            return 0;
        };

        let mut added = 0;
        for street in split_streets(&self.street_list(streets_cell)) {
            let (name, houses) = extractor::extract(&street);
            if houses.is_empty() {
                log::debug!("No street/house found in '{}'", street);
                continue;
            }
            for house in houses {
                let address = Address::new(self.city, name.clone(), Some(house), street.clone());
                schedule.insert(address, range);
                added += 1;
            }
        }
        added
    }

    fn parse_range(
        &self,
        start_date: &str,
        start_time: &str,
        end_date: &str,
        end_time: &str,
    ) -> Option<DateRange> {
        if [start_date, start_time, end_date, end_time]
            .iter()
            .any(|part| part.is_empty())
        {
            return None;
        }
        DateRange::parse(
            &format!("{start_date} {start_time}"),
            &format!("{end_date} {end_time}"),
            &self.date_format,
            self.timezone,
        )
    }

    /// Streets cell items joined into one comma-separated string.
    fn street_list(&self, streets_cell: &ElementRef) -> String {
        let items: Vec<String> = streets_cell
            .select(&self.item_sel)
            .map(|item| clean_text(&item.text().collect::<String>()))
            .filter(|item| !item.is_empty())
            .collect();

        if items.is_empty() {
            clean_text(&streets_cell.text().collect::<String>())
        } else {
            items.join(", ")
        }
    }
}

/// Split a joined streets list into one string per street.
///
/// Splits on commas, then glues fragments that start with a house marker back
/// onto the preceding street: `"Lenina, д.10-12, Pushkina, д.3"` becomes
/// `["Lenina, д.10-12", "Pushkina, д.3"]`.
pub fn split_streets(joined: &str) -> Vec<String> {
    let mut streets: Vec<String> = Vec::new();

    for fragment in joined.split(',').map(clean_text) {
        if fragment.is_empty() {
            continue;
        }
        match streets.last_mut() {
            Some(previous) if HOUSE_FRAGMENT.is_match(&fragment) => {
                previous.push_str(", ");
                previous.push_str(&fragment);
            }
            _ => streets.push(fragment),
        }
    }

    streets
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
