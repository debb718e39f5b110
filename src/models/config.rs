//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{City, Service, TableSelectors};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and caching behavior settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Filesystem locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// City assumed for addresses entered without one
    #[serde(default = "defaults::default_city")]
    pub default_city: City,

    /// Services checked when none are requested explicitly
    #[serde(default = "defaults::services")]
    pub services: Vec<Service>,

    /// City definitions
    #[serde(default = "defaults::cities")]
    pub cities: Vec<CityInfo>,

    /// Provider pages per (city, service)
    #[serde(default = "defaults::sources")]
    pub sources: Vec<SourceConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        if self.fetcher.max_concurrent == 0 {
            return Err(AppError::validation("fetcher.max_concurrent must be > 0"));
        }
        if self.services.is_empty() {
            return Err(AppError::validation("No services enabled"));
        }
        if self.city_info(self.default_city).is_none() {
            return Err(AppError::validation(format!(
                "default_city {} has no [[cities]] entry",
                self.default_city
            )));
        }
        for source in &self.sources {
            if self.city_info(source.city).is_none() {
                return Err(AppError::validation(format!(
                    "Source {}/{} refers to undefined city",
                    source.city, source.service
                )));
            }
            if source.url_template.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Source {}/{} has an empty url_template",
                    source.city, source.service
                )));
            }
        }
        Ok(())
    }

    pub fn city_info(&self, city: City) -> Option<&CityInfo> {
        self.cities.iter().find(|info| info.city == city)
    }

    /// Timezone in which a city's providers publish their schedules.
    pub fn timezone(&self, city: City) -> Result<Tz> {
        self.city_info(city)
            .map(|info| info.timezone)
            .ok_or_else(|| AppError::config(format!("No timezone configured for {city}")))
    }

    pub fn source(&self, city: City, service: Service) -> Option<&SourceConfig> {
        self.sources
            .iter()
            .find(|source| source.city == city && source.service == service)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetcher: FetcherConfig::default(),
            paths: PathsConfig::default(),
            logging: LoggingConfig::default(),
            default_city: defaults::default_city(),
            services: defaults::services(),
            cities: defaults::cities(),
            sources: defaults::sources(),
        }
    }
}

/// HTTP client and caching behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum concurrent requests
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// How long a cached page stays fresh; 0 disables reuse
    #[serde(default = "defaults::cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Days ahead of today requested from providers that take a date window
    #[serde(default = "defaults::lookahead_days")]
    pub lookahead_days: u32,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
            cache_ttl_secs: defaults::cache_ttl(),
            lookahead_days: defaults::lookahead_days(),
        }
    }
}

/// Filesystem locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for cached provider pages
    #[serde(default = "defaults::cache_dir")]
    pub cache_dir: PathBuf,

    /// JSON file holding user addresses
    #[serde(default = "defaults::address_book")]
    pub address_book: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            cache_dir: defaults::cache_dir(),
            address_book: defaults::address_book(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

/// A supported city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityInfo {
    pub city: City,

    /// Name substituted for `{city}` in URL templates (e.g., "Санкт-Петербург")
    pub name: String,

    /// IANA zone the provider's timestamps are in
    pub timezone: Tz,
}

/// Where and how to read one provider's schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub city: City,
    pub service: Service,

    /// URL with `{city}`, `{street}`, `{house}`, `{date_start}`, `{date_finish}` placeholders
    pub url_template: String,

    /// Table layout of the page
    #[serde(default)]
    pub selectors: TableSelectors,
}

mod defaults {
    use std::path::PathBuf;

    use chrono_tz::Tz;

    use super::{CityInfo, SourceConfig};
    use crate::models::{City, Service, TableSelectors};

    // Fetcher defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; shutdown-alerts/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        100
    }
    pub fn max_concurrent() -> usize {
        4
    }
    pub fn cache_ttl() -> u64 {
        3600
    }
    pub fn lookahead_days() -> u32 {
        14
    }

    // Path defaults
    pub fn cache_dir() -> PathBuf {
        PathBuf::from("storage/cache")
    }
    pub fn address_book() -> PathBuf {
        PathBuf::from("storage/addresses.json")
    }

    pub fn log_level() -> String {
        "info".into()
    }

    pub fn default_city() -> City {
        City::Spb
    }

    pub fn services() -> Vec<Service> {
        vec![Service::Electricity]
    }

    pub fn cities() -> Vec<CityInfo> {
        vec![
            CityInfo {
                city: City::Spb,
                name: "Санкт-Петербург".to_string(),
                timezone: Tz::Europe__Moscow,
            },
            CityInfo {
                city: City::Rnd,
                name: "Ростов-на-Дону".to_string(),
                timezone: Tz::Europe__Moscow,
            },
        ]
    }

    pub fn sources() -> Vec<SourceConfig> {
        vec![
            SourceConfig {
                city: City::Spb,
                service: Service::Electricity,
                url_template: "https://rosseti-lenenergo.ru/planned_work/?reg=&city={city}\
                               &date_start={date_start}&date_finish={date_finish}&res=&street={street}"
                    .to_string(),
                selectors: TableSelectors::default(),
            },
            SourceConfig {
                city: City::Spb,
                service: Service::HotWater,
                url_template: "https://www.gptek.spb.ru/grafik/?street={street}&house={house}"
                    .to_string(),
                selectors: TableSelectors::default(),
            },
            SourceConfig {
                city: City::Spb,
                service: Service::ColdWater,
                url_template: "https://www.vodokanal.spb.ru/presscentr/remontnye_raboty/"
                    .to_string(),
                selectors: TableSelectors::default(),
            },
        ]
    }
}
