// src/services/report.rs

//! Human-readable shutdown reports.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::models::{Service, ShutdownSchedule};

/// Shutdowns of one service that matched a user's addresses.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceReport {
    pub service: Service,
    pub matches: ShutdownSchedule,
}

impl ServiceReport {
    /// Same report with past windows removed.
    pub fn upcoming<Z: TimeZone>(&self, now: &DateTime<Z>) -> ServiceReport {
        ServiceReport {
            service: self.service,
            matches: self.matches.filter_ranges(|range| range.is_upcoming(now)),
        }
    }
}

/// Render the user's addresses followed by every upcoming shutdown.
pub fn render_report<Z: TimeZone>(
    addresses: &[String],
    reports: &[ServiceReport],
    now: &DateTime<Z>,
) -> String {
    if addresses.is_empty() {
        return "No address yet :(".to_string();
    }

    let mut sections = vec![render_addresses(addresses)];

    let upcoming: Vec<ServiceReport> = reports
        .iter()
        .map(|report| report.upcoming(now))
        .filter(|report| !report.matches.is_empty())
        .collect();

    if upcoming.is_empty() {
        sections.push("No shutdowns :)".to_string());
    }

    for report in &upcoming {
        let mut lines = vec![format!(" ⚠︎ {}", report.service.title())];
        for entry in &report.matches {
            lines.push(format!("   - {}", entry.address.raw));
            for range in &entry.ranges {
                lines.push(format!("       {range}"));
            }
        }
        sections.push(lines.join("\n"));
    }

    sections.join("\n\n")
}

fn render_addresses(addresses: &[String]) -> String {
    let mut lines = vec!["Your Addresses:".to_string()];
    lines.extend(addresses.iter().map(|address| format!(" ☑︎ {address}")));
    lines.join("\n")
}
