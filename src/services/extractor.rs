// src/services/extractor.rs

//! Street and house extraction from free-form address text.

use std::sync::LazyLock;

use regex::Regex;

/// Street returned when the text does not look like an address.
pub const UNKNOWN_STREET: &str = "Unknown";

/// Widest `start-end` house range accepted from one address.
pub const MAX_HOUSE_SPAN: u32 = 500;

/// `<street>, д.<N>[-<M>][ корп.<K>]`, also accepting `д`, `д.` and `дом`.
static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<street>[\w\s.]+?),\s(?:д\.?|дом)\s*(?P<start>[0-9]+)(?:[-–](?P<end>[0-9]+))?(?:\sкорп\.[0-9]+)?",
    )
    .expect("address pattern is valid")
});

/// Split an address into its street and the houses it covers.
///
/// A range such as `д.75-79` expands to every house in `75..=79`; a `корп.`
/// suffix is accepted but dropped. Text that does not match yields
/// `(UNKNOWN_STREET, [])`, as does a range that runs backwards or spans more
/// than [`MAX_HOUSE_SPAN`] houses.
pub fn extract(raw_text: &str) -> (String, Vec<u32>) {
    parse(raw_text).unwrap_or_else(|| (UNKNOWN_STREET.to_string(), Vec::new()))
}

fn parse(raw_text: &str) -> Option<(String, Vec<u32>)> {
    let caps = ADDRESS_PATTERN.captures(raw_text)?;
    let street = caps.name("street")?.as_str().trim().to_string();
    let start: u32 = caps.name("start")?.as_str().parse().ok()?;
    let end: u32 = match caps.name("end") {
        Some(end) => end.as_str().parse().ok()?,
        None => start,
    };

    if street.is_empty() || end < start || end - start > MAX_HOUSE_SPAN {
        return None;
    }

    Some((street, (start..=end).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn street_and_houses(street: &str, houses: &[u32]) -> (String, Vec<u32>) {
        (street.to_string(), houses.to_vec())
    }

    #[test]
    fn test_block_suffix_is_dropped() {
        assert_eq!(
            extract("Test Street пр., д.75 корп.1"),
            street_and_houses("Test Street пр.", &[75])
        );
    }

    #[test]
    fn test_range_is_inclusive() {
        assert_eq!(
            extract("Test Street пр., д.75-79"),
            street_and_houses("Test Street пр.", &[75, 76, 77, 78, 79])
        );
    }

    #[test]
    fn test_en_dash_range() {
        assert_eq!(
            extract("Lenina, д.10–12"),
            street_and_houses("Lenina", &[10, 11, 12])
        );
    }

    #[test]
    fn test_single_house() {
        assert_eq!(
            extract("Test Street пр., д.79"),
            street_and_houses("Test Street пр.", &[79])
        );
    }

    #[test]
    fn test_full_word_marker() {
        assert_eq!(
            extract("Test Street пр., дом 75"),
            street_and_houses("Test Street пр.", &[75])
        );
    }

    #[test]
    fn test_cyrillic_street() {
        assert_eq!(
            extract("ул. Ленина, д. 5"),
            street_and_houses("ул. Ленина", &[5])
        );
    }

    #[test]
    fn test_no_match_returns_sentinel() {
        assert_eq!(
            extract("Invalid Address Format"),
            street_and_houses(UNKNOWN_STREET, &[])
        );
        assert_eq!(extract(""), street_and_houses(UNKNOWN_STREET, &[]));
    }

    #[test]
    fn test_backwards_range_returns_sentinel() {
        assert_eq!(
            extract("Lenina, д.12-10"),
            street_and_houses(UNKNOWN_STREET, &[])
        );
    }

    #[test]
    fn test_oversized_range_returns_sentinel() {
        assert_eq!(
            extract("Lenina, д.1-4294967295"),
            street_and_houses(UNKNOWN_STREET, &[])
        );
        assert_eq!(
            extract("Lenina, д.1-3000000"),
            street_and_houses(UNKNOWN_STREET, &[])
        );

        let (street, houses) = extract("Lenina, д.1-501");
        assert_eq!(street, "Lenina");
        assert_eq!(houses.len(), 501);
    }

    #[test]
    fn test_overflowing_house_returns_sentinel() {
        assert_eq!(
            extract("Lenina, д.99999999999"),
            street_and_houses(UNKNOWN_STREET, &[])
        );
    }
}
