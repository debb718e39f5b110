// src/models/schedule.rs

//! Mapping of addresses to their announced outage windows.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::{Address, AddressKey, DateRange};

/// One address with every window announced for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// First address inserted under this key; its `raw` text is used for display
    pub address: Address,
    pub ranges: BTreeSet<DateRange>,
}

/// Shutdown records keyed by normalized address.
///
/// Entries are grouped by [`AddressKey`], so the same house listed with
/// `"пр. X"` and `"X пр."` ends up in one entry and repeated windows collapse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ScheduleEntry>", into = "Vec<ScheduleEntry>")]
pub struct ShutdownSchedule {
    entries: BTreeMap<AddressKey, ScheduleEntry>,
}

impl ShutdownSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `range` with `address`. Returns `false` if it was already present.
    pub fn insert(&mut self, address: Address, range: DateRange) -> bool {
        self.entries
            .entry(address.key())
            .or_insert_with(|| ScheduleEntry {
                address,
                ranges: BTreeSet::new(),
            })
            .ranges
            .insert(range)
    }

    /// Add a whole entry, unioning ranges with any existing entry for the same key.
    pub fn insert_entry(&mut self, entry: ScheduleEntry) {
        match self.entries.get_mut(&entry.address.key()) {
            Some(existing) => existing.ranges.extend(entry.ranges),
            None => {
                self.entries.insert(entry.address.key(), entry);
            }
        }
    }

    /// Union `other` into `self`; colliding addresses get the union of their ranges.
    pub fn merge(&mut self, other: ShutdownSchedule) {
        for (_, entry) in other.entries {
            self.insert_entry(entry);
        }
    }

    /// Ranges recorded for an address matching `address`.
    pub fn get(&self, address: &Address) -> Option<&BTreeSet<DateRange>> {
        self.entries
            .values()
            .find(|entry| entry.address.matches(address))
            .map(|entry| &entry.ranges)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.values()
    }

    /// Number of distinct addresses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of address/window associations.
    pub fn total_ranges(&self) -> usize {
        self.entries.values().map(|entry| entry.ranges.len()).sum()
    }

    /// Copy of the schedule keeping only windows for which `keep` holds.
    /// Addresses left without windows are dropped.
    pub fn filter_ranges(&self, keep: impl Fn(&DateRange) -> bool) -> ShutdownSchedule {
        let entries = self
            .entries
            .iter()
            .filter_map(|(key, entry)| {
                let ranges: BTreeSet<DateRange> =
                    entry.ranges.iter().filter(|r| keep(r)).copied().collect();
                (!ranges.is_empty()).then(|| {
                    (
                        key.clone(),
                        ScheduleEntry {
                            address: entry.address.clone(),
                            ranges,
                        },
                    )
                })
            })
            .collect();
        ShutdownSchedule { entries }
    }
}

/// Set equality over address keys and their windows.
impl PartialEq for ShutdownSchedule {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(key, entry)| {
                other
                    .entries
                    .get(key)
                    .is_some_and(|theirs| theirs.ranges == entry.ranges)
            })
    }
}

impl Eq for ShutdownSchedule {}

impl From<Vec<ScheduleEntry>> for ShutdownSchedule {
    fn from(entries: Vec<ScheduleEntry>) -> Self {
        let mut schedule = ShutdownSchedule::new();
        for entry in entries {
            schedule.insert_entry(entry);
        }
        schedule
    }
}

impl From<ShutdownSchedule> for Vec<ScheduleEntry> {
    fn from(schedule: ShutdownSchedule) -> Self {
        schedule.entries.into_values().collect()
    }
}

impl<'a> IntoIterator for &'a ShutdownSchedule {
    type Item = &'a ScheduleEntry;
    type IntoIter = std::collections::btree_map::Values<'a, AddressKey, ScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::City;
    use chrono::{FixedOffset, TimeZone};

    fn range(day: u32, from: u32, to: u32) -> DateRange {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        DateRange::new(
            tz.with_ymd_and_hms(2024, 7, day, from, 0, 0).unwrap(),
            tz.with_ymd_and_hms(2024, 7, day, to, 0, 0).unwrap(),
        )
    }

    fn address(street: &str, house: u32) -> Address {
        Address::new(City::Spb, street, Some(house), format!("{street}, д.{house}"))
    }

    #[test]
    fn test_insert_deduplicates_ranges() {
        let mut schedule = ShutdownSchedule::new();
        assert!(schedule.insert(address("Lenina", 10), range(1, 10, 14)));
        assert!(!schedule.insert(address("Lenina", 10), range(1, 10, 14)));
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.total_ranges(), 1);
    }

    #[test]
    fn test_insert_groups_abbreviation_variants() {
        let mut schedule = ShutdownSchedule::new();
        schedule.insert(address("пр. Avenue Name", 5), range(1, 10, 14));
        schedule.insert(address("Avenue Name пр.", 5), range(2, 10, 14));
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.total_ranges(), 2);

        let entry = schedule.iter().next().unwrap();
        assert_eq!(entry.address.raw, "пр. Avenue Name, д.5");
    }

    #[test]
    fn test_merge_unions_on_collision() {
        let mut left = ShutdownSchedule::new();
        left.insert(address("Lenina", 10), range(1, 10, 14));

        let mut right = ShutdownSchedule::new();
        right.insert(address("Lenina", 10), range(2, 9, 12));
        right.insert(address("Lenina", 10), range(1, 10, 14));
        right.insert(address("Pushkina", 3), range(3, 8, 9));

        left.merge(right);
        assert_eq!(left.len(), 2);
        assert_eq!(left.get(&address("Lenina", 10)).unwrap().len(), 2);
        assert_eq!(left.get(&address("Pushkina", 3)).unwrap().len(), 1);
    }

    #[test]
    fn test_equality_ignores_raw_text() {
        let mut a = ShutdownSchedule::new();
        a.insert(address("Lenina", 10), range(1, 10, 14));
        let mut b = ShutdownSchedule::new();
        b.insert(
            Address::new(City::Spb, "Lenina", Some(10), "other text"),
            range(1, 10, 14),
        );
        assert_eq!(a, b);

        b.insert(address("Lenina", 10), range(2, 10, 14));
        assert_ne!(a, b);
    }

    #[test]
    fn test_serializes_as_entry_list() {
        let mut schedule = ShutdownSchedule::new();
        schedule.insert(address("Lenina", 10), range(1, 10, 14));

        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json[0]["address"]["street"], "Lenina");
        assert_eq!(json[0]["ranges"][0]["start"], "2024-07-01T10:00:00+03:00");

        let back: ShutdownSchedule = serde_json::from_value(json).unwrap();
        assert_eq!(back, schedule);
    }

    #[test]
    fn test_filter_ranges_drops_empty_entries() {
        let mut schedule = ShutdownSchedule::new();
        schedule.insert(address("Lenina", 10), range(1, 10, 14));
        schedule.insert(address("Lenina", 10), range(5, 10, 14));
        schedule.insert(address("Pushkina", 3), range(1, 8, 9));

        let cutoff = range(3, 0, 1).start;
        let upcoming = schedule.filter_ranges(|r| r.is_upcoming(&cutoff));
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming.total_ranges(), 1);
    }
}
