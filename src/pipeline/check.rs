// src/pipeline/check.rs

//! Shutdown check: fetch provider pages, extract records and keep the user's.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use chrono::{DateTime, Days, Utc};
use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{Address, City, Config, Service, ShutdownSchedule};
use crate::services::report::ServiceReport;
use crate::services::{PageExtractor, PageFetcher, find_for_addresses};
use crate::utils::url::render_template;

/// Date format used for `{date_start}`/`{date_finish}` placeholders.
const URL_DATE_FORMAT: &str = "%d.%m.%Y";

/// Result of a check run.
#[derive(Debug, Default)]
pub struct CheckOutcome {
    /// One report per requested service, in request order
    pub reports: Vec<ServiceReport>,
    /// Inputs that could not be parsed into a street and house
    pub unresolved: Vec<String>,
    pub page_total: usize,
    pub page_failures: usize,
    /// Address/window associations extracted across all pages
    pub records_total: usize,
}

/// Check `raw_addresses` in `city` against the providers of `services`.
///
/// Pages that fail to download are logged and contribute nothing; the run
/// only fails on configuration problems.
pub async fn run_check(
    config: &Config,
    fetcher: &dyn PageFetcher,
    city: City,
    raw_addresses: &[String],
    services: &[Service],
    now: DateTime<Utc>,
) -> Result<CheckOutcome> {
    let city_info = config
        .city_info(city)
        .ok_or_else(|| AppError::config(format!("City {city} is not configured")))?;
    let tz = city_info.timezone;

    let mut outcome = CheckOutcome::default();
    let mut addresses = Vec::new();
    for raw in raw_addresses {
        let address = Address::from_raw(city, raw);
        if address.is_resolved() {
            addresses.push(address);
        } else {
            log::warn!("Could not find a street and house in '{}'", raw);
            outcome.unresolved.push(raw.clone());
        }
    }

    let today = now.with_timezone(&tz).date_naive();
    let date_start = today.format(URL_DATE_FORMAT).to_string();
    let date_finish = today
        .checked_add_days(Days::new(config.fetcher.lookahead_days.into()))
        .unwrap_or(today)
        .format(URL_DATE_FORMAT)
        .to_string();

    let mut extractors = BTreeMap::new();
    let mut jobs: BTreeSet<(Service, String)> = BTreeSet::new();
    for &service in services {
        let Some(source) = config.source(city, service) else {
            log::warn!("No source configured for {} in {}", service, city);
            continue;
        };
        extractors.insert(service, PageExtractor::new(city, tz, &source.selectors)?);

        for address in &addresses {
            let house = address.house.map(|h| h.to_string()).unwrap_or_default();
            let street = address.normalized_street();
            let url = render_template(
                &source.url_template,
                &[
                    ("city", city_info.name.as_str()),
                    ("street", street.as_str()),
                    ("house", house.as_str()),
                    ("date_start", date_start.as_str()),
                    ("date_finish", date_finish.as_str()),
                ],
            );
            jobs.insert((service, url));
        }
    }

    outcome.page_total = jobs.len();
    log::info!(
        "Checking {} address(es) across {} page(s)",
        addresses.len(),
        jobs.len()
    );

    let delay = Duration::from_millis(config.fetcher.request_delay_ms);
    let concurrency = config.fetcher.max_concurrent.max(1);
    let mut pages = stream::iter(jobs)
        .map(|(service, url)| async move {
            let result = fetcher.fetch(&url).await;
            (service, url, result)
        })
        .buffer_unordered(concurrency);

    let mut schedules: BTreeMap<Service, ShutdownSchedule> = BTreeMap::new();
    while let Some((service, url, result)) = pages.next().await {
        match result {
            Ok(html) => {
                if let Some(extractor) = extractors.get(&service) {
                    let (schedule, stats) = extractor.extract_records_with_stats(&html);
                    if schedule.is_empty() {
                        log::info!("No shutdown data published at {}", url);
                    }
                    outcome.records_total += stats.associations;
                    schedules.entry(service).or_default().merge(schedule);
                }
            }
            Err(error) => {
                outcome.page_failures += 1;
                log::warn!("Failed to fetch {} page {}: {}", service, url, error);
            }
        }

        if delay.as_millis() > 0 {
            tokio::time::sleep(delay).await;
        }
    }

    for &service in services {
        let matches = schedules
            .get(&service)
            .map(|all| find_for_addresses(all, &addresses))
            .unwrap_or_default();
        outcome.reports.push(ServiceReport { service, matches });
    }

    Ok(outcome)
}
