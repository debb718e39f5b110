// src/services/lookup.rs

//! Filtering extracted schedules down to a user's addresses.

use crate::models::{Address, ShutdownSchedule};

/// Entries of `all_records` whose address matches `user_address`.
///
/// Every entry is compared with the tolerant matcher rather than looked up by
/// key, so the result does not depend on how the schedule was keyed. Windows
/// are returned untouched; dropping past windows is up to the caller.
pub fn find_for_user(
    all_records: &ShutdownSchedule,
    user_address: &Address,
) -> ShutdownSchedule {
    let mut found = ShutdownSchedule::new();
    for entry in all_records
        .iter()
        .filter(|entry| entry.address.matches(user_address))
    {
        found.insert_entry(entry.clone());
    }
    found
}

/// Union of [`find_for_user`] over several addresses.
pub fn find_for_addresses(
    all_records: &ShutdownSchedule,
    addresses: &[Address],
) -> ShutdownSchedule {
    let mut found = ShutdownSchedule::new();
    for address in addresses {
        found.merge(find_for_user(all_records, address));
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{City, DateRange, TableSelectors};
    use crate::services::PageExtractor;
    use chrono_tz::Europe::Moscow;

    fn window(start: &str, end: &str) -> DateRange {
        DateRange::parse(start, end, "%d-%m-%Y %H:%M", Moscow).unwrap()
    }

    fn records() -> ShutdownSchedule {
        let mut schedule = ShutdownSchedule::new();
        let spb = |street: &str, house| Address::new(City::Spb, street, Some(house), street);
        schedule.insert(spb("Avenue Name пр.", 5), window("01-07-2024 10:00", "01-07-2024 14:00"));
        schedule.insert(spb("Avenue Name пр.", 5), window("02-07-2024 10:00", "02-07-2024 14:00"));
        schedule.insert(spb("Avenue Name пр.", 6), window("01-07-2024 10:00", "01-07-2024 14:00"));
        schedule.insert(
            Address::new(City::Rnd, "Avenue Name", Some(5), "rnd"),
            window("03-07-2024 10:00", "03-07-2024 14:00"),
        );
        schedule
    }

    #[test]
    fn test_finds_abbreviation_variant() {
        let user = Address::new(City::Spb, "пр. Avenue Name", Some(5), "пр. Avenue Name, д.5");
        let found = find_for_user(&records(), &user);

        assert_eq!(found.len(), 1);
        let entry = found.iter().next().unwrap();
        assert_eq!(entry.address.house, Some(5));
        assert_eq!(entry.address.city, City::Spb);
        assert_eq!(entry.ranges.len(), 2);
    }

    #[test]
    fn test_no_match_is_empty() {
        let user = Address::new(City::Spb, "Avenue Name", Some(7), "x");
        assert!(find_for_user(&records(), &user).is_empty());
        assert!(find_for_user(&ShutdownSchedule::new(), &user).is_empty());
    }

    #[test]
    fn test_unresolved_user_address_matches_nothing() {
        let user = Address::from_raw(City::Spb, "nowhere");
        assert!(find_for_user(&records(), &user).is_empty());
    }

    #[test]
    fn test_find_for_addresses_unions() {
        let users = [
            Address::new(City::Spb, "Avenue Name", Some(5), "a"),
            Address::new(City::Spb, "Avenue Name", Some(6), "b"),
            Address::new(City::Rnd, "Avenue Name пр.", Some(5), "c"),
        ];
        let found = find_for_addresses(&records(), &users);
        assert_eq!(found.len(), 3);
        assert_eq!(found.total_ranges(), 4);
    }

    #[test]
    fn test_end_to_end_two_row_page() {
        let html = "<table>\
            <tr><td>ЛО</td><td>р-н</td><td>СПб</td><td class=\"rowStreets\"><span>Lenina, д.10-12</span></td>\
                <td>01-07-2024</td><td>10:00</td><td>01-07-2024</td><td>14:00</td></tr>\
            <tr><td>ЛО</td><td>р-н</td><td>СПб</td><td class=\"rowStreets\"><span>Lenina, д.11</span></td>\
                <td>когда-нибудь</td><td>--:--</td><td></td><td></td></tr>\
            </table>";
        let extractor = PageExtractor::new(City::Spb, Moscow, &TableSelectors::default()).unwrap();
        let all = extractor.extract_records(html);

        let user = Address::new(City::Spb, "Lenina", Some(11), "Lenina, д.11");
        let found = find_for_user(&all, &user);

        assert_eq!(found.len(), 1);
        let entry = found.iter().next().unwrap();
        assert_eq!(entry.address.house, Some(11));
        let ranges: Vec<_> = entry.ranges.iter().collect();
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].start.to_rfc3339(), "2024-07-01T10:00:00+03:00");
        assert_eq!(ranges[0].end.to_rfc3339(), "2024-07-01T14:00:00+03:00");
    }
}
