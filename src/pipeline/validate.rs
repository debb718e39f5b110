// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;
use crate::services::PageExtractor;

/// Counts reported by a successful validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationSummary {
    pub cities: usize,
    pub sources: usize,
    pub services: usize,
}

/// Validate configuration values and compile every source's selectors.
pub fn run_validate(config: &Config) -> Result<ValidationSummary> {
    config.validate()?;
    log::info!("✓ Config values OK (user agent: {})", config.fetcher.user_agent);

    for source in &config.sources {
        let tz = config.timezone(source.city)?;
        PageExtractor::new(source.city, tz, &source.selectors)?;
        log::debug!("✓ Selectors OK for {}/{}", source.city, source.service);
    }

    for service in &config.services {
        if config.source(config.default_city, *service).is_none() {
            log::warn!(
                "Service {} is enabled but has no source for {}",
                service,
                config.default_city
            );
        }
    }

    Ok(ValidationSummary {
        cities: config.cities.len(),
        sources: config.sources.len(),
        services: config.services.len(),
    })
}
