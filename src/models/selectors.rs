// src/models/selectors.rs

//! CSS selectors and layout hints for a provider's shutdown table.

use serde::{Deserialize, Serialize};

/// Layout of a provider's shutdown-schedule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSelectors {
    /// Selector for each table row
    #[serde(default = "defaults::row_selector")]
    pub row_selector: String,

    /// Selector for the text cells within a row
    #[serde(default = "defaults::cell_selector")]
    pub cell_selector: String,

    /// Selector identifying the streets cell; rows without it are skipped
    #[serde(default = "defaults::streets_cell_selector")]
    pub streets_cell_selector: String,

    /// Selector for list items inside the streets cell
    #[serde(default = "defaults::street_item_selector")]
    pub street_item_selector: String,

    /// Index of the start-date cell; start time, end date and end time follow it
    #[serde(default = "defaults::date_cell_offset")]
    pub date_cell_offset: usize,

    /// `chrono` format for `"<date> <time>"`
    #[serde(default = "defaults::date_format")]
    pub date_format: String,
}

mod defaults {
    pub fn row_selector() -> String {
        "tr".into()
    }
    pub fn cell_selector() -> String {
        "td".into()
    }
    pub fn streets_cell_selector() -> String {
        "td.rowStreets".into()
    }
    pub fn street_item_selector() -> String {
        "span".into()
    }
    pub fn date_cell_offset() -> usize {
        4
    }
    pub fn date_format() -> String {
        "%d-%m-%Y %H:%M".into()
    }
}

impl Default for TableSelectors {
    fn default() -> Self {
        Self {
            row_selector: defaults::row_selector(),
            cell_selector: defaults::cell_selector(),
            streets_cell_selector: defaults::streets_cell_selector(),
            street_item_selector: defaults::street_item_selector(),
            date_cell_offset: defaults::date_cell_offset(),
            date_format: defaults::date_format(),
        }
    }
}
