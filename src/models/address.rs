// src/models/address.rs

//! Structured postal address within a supported city.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::City;
use crate::services::{extractor, matcher};

/// A postal address extracted from user input or from a scraped row.
///
/// Addresses have no `PartialEq`; compare them with [`Address::matches`] or
/// group them through [`Address::key`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub city: City,

    /// Street as extracted, including any `пр.`/`ул.` decoration
    pub street: String,

    /// House number, `None` when extraction failed
    pub house: Option<u32>,

    /// Original text, kept for display
    pub raw: String,
}

/// Hashable identity of an address: city, normalized street and house.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AddressKey {
    pub city: City,
    pub street: String,
    pub house: Option<u32>,
}

impl Address {
    pub fn new(
        city: City,
        street: impl Into<String>,
        house: Option<u32>,
        raw: impl Into<String>,
    ) -> Self {
        Self {
            city,
            street: street.into(),
            house,
            raw: raw.into(),
        }
    }

    /// Build an address from free-form user text.
    ///
    /// Only the first house of a range is kept. When the text cannot be parsed
    /// the street is [`extractor::UNKNOWN_STREET`] and `house` is `None`.
    pub fn from_raw(city: City, raw: &str) -> Self {
        let (street, houses) = extractor::extract(raw);
        Self::new(city, street, houses.first().copied(), raw)
    }

    /// Whether extraction produced a usable street and house.
    pub fn is_resolved(&self) -> bool {
        self.house.is_some() && self.street != extractor::UNKNOWN_STREET
    }

    /// Street with decoration tokens stripped.
    pub fn normalized_street(&self) -> String {
        matcher::normalize_street(&self.street)
    }

    pub fn key(&self) -> AddressKey {
        AddressKey {
            city: self.city,
            street: self.normalized_street(),
            house: self.house,
        }
    }

    /// Tolerant comparison, see [`matcher::matches`].
    pub fn matches(&self, other: &Address) -> bool {
        matcher::matches(self, other)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
