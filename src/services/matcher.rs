// src/services/matcher.rs

//! Abbreviation-tolerant address comparison.
//!
//! Providers and users disagree on whether a street carries its type marker
//! and where it goes (`"пр. Невский"`, `"Невский пр."`, `"Невский"`). Streets
//! are compared after those markers are stripped; house numbers must match
//! exactly.

use crate::models::Address;

/// Street-type tokens removed from either end of a street name.
const DECORATION_TOKENS: [&str; 2] = ["пр.", "ул."];

/// Collapse whitespace and strip leading/trailing decoration tokens.
pub fn normalize_street(street: &str) -> String {
    let collapsed = street.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut current = collapsed.as_str();

    loop {
        let stripped = DECORATION_TOKENS.iter().fold(current, |s, token| {
            strip_leading_token(s, token)
                .or_else(|| strip_trailing_token(s, token))
                .map(str::trim)
                .unwrap_or(s)
        });
        if stripped.len() == current.len() {
            return stripped.to_string();
        }
        current = stripped;
    }
}

// "ул.ица" keeps its head
fn strip_leading_token<'a>(s: &'a str, token: &str) -> Option<&'a str> {
    s.strip_prefix(token)
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

// "Купр." must not lose its tail
fn strip_trailing_token<'a>(s: &'a str, token: &str) -> Option<&'a str> {
    s.strip_suffix(token)
        .filter(|rest| rest.is_empty() || rest.ends_with(char::is_whitespace))
}

/// Same city, same house, same street once decoration is ignored.
///
/// An address without a house never matches, so failed extractions cannot
/// pick up other people's shutdowns.
pub fn matches(a: &Address, b: &Address) -> bool {
    a.city == b.city
        && a.house.is_some()
        && a.house == b.house
        && normalize_street(&a.street) == normalize_street(&b.street)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::City;

    fn address(city: City, street: &str, house: Option<u32>) -> Address {
        Address::new(city, street, house, street)
    }

    #[test]
    fn test_normalize_strips_prefix_and_suffix() {
        assert_eq!(normalize_street("пр. Avenue Name"), "Avenue Name");
        assert_eq!(normalize_street("Avenue Name пр."), "Avenue Name");
        assert_eq!(normalize_street("  ул.  Ленина  "), "Ленина");
        assert_eq!(normalize_street("ул. Ленина пр."), "Ленина");
    }

    #[test]
    fn test_normalize_keeps_inner_tokens() {
        assert_eq!(normalize_street("Малый пр. В.О."), "Малый пр. В.О.");
        assert_eq!(normalize_street("Купр."), "Купр.");
    }

    #[test]
    fn test_normalize_requires_token_boundary() {
        assert_eq!(normalize_street("ул.ица"), "ул.ица");
        assert_eq!(normalize_street("пр.Avenue"), "пр.Avenue");
        assert_eq!(normalize_street("пр."), "");
    }

    #[test]
    fn test_normalize_is_case_sensitive() {
        assert_eq!(normalize_street("Пр. Avenue"), "Пр. Avenue");
    }

    #[test]
    fn test_matches_abbreviation_variants() {
        let a = address(City::Spb, "пр. Avenue Name", Some(5));
        let b = address(City::Spb, "Avenue Name пр.", Some(5));
        assert!(matches(&a, &b));
        assert!(matches(&b, &a));
    }

    #[test]
    fn test_house_mismatch() {
        let a = address(City::Spb, "пр. Avenue Name", Some(5));
        let b = address(City::Spb, "Avenue Name", Some(6));
        assert!(!matches(&a, &b));
    }

    #[test]
    fn test_city_mismatch() {
        let a = address(City::Spb, "Avenue Name", Some(5));
        let b = address(City::Rnd, "Avenue Name", Some(5));
        assert!(!matches(&a, &b));
    }

    #[test]
    fn test_missing_house_never_matches() {
        let a = address(City::Spb, "Unknown", None);
        let b = address(City::Spb, "Unknown", None);
        assert!(!matches(&a, &b));
    }
}
