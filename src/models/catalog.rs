// src/models/catalog.rs

//! Supported cities and utility services.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A city whose utility providers are scraped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum City {
    /// Saint Petersburg
    Spb,
    /// Rostov-on-Don
    Rnd,
}

impl City {
    pub const ALL: [City; 2] = [City::Spb, City::Rnd];

    pub fn code(&self) -> &'static str {
        match self {
            City::Spb => "SPB",
            City::Rnd => "RND",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for City {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .into_iter()
            .find(|city| city.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::validation(format!("Unsupported city: {s}")))
    }
}

/// A utility service with its own shutdown schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Service {
    Electricity,
    ColdWater,
    HotWater,
}

impl Service {
    pub const ALL: [Service; 3] = [Service::Electricity, Service::ColdWater, Service::HotWater];

    pub fn code(&self) -> &'static str {
        match self {
            Service::Electricity => "ELECTRICITY",
            Service::ColdWater => "COLD_WATER",
            Service::HotWater => "HOT_WATER",
        }
    }

    /// Human-readable title used in reports.
    pub fn title(&self) -> &'static str {
        match self {
            Service::Electricity => "Электроэнергия",
            Service::ColdWater => "Холодная вода",
            Service::HotWater => "Горячая вода",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Service {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Service::ALL
            .into_iter()
            .find(|service| service.code().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| AppError::validation(format!("Unsupported service: {s}")))
    }
}
