//! Utility functions and helpers.

pub mod http;
pub mod url;

/// Collapse runs of whitespace (including newlines) into single spaces and trim.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  01-07-2024\n"), "01-07-2024");
        assert_eq!(clean_text("Lenina,\n   д.10"), "Lenina, д.10");
        assert_eq!(clean_text(" \n\t "), "");
    }
}
