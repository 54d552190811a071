//! Country lookup over free-text addresses.
//!
//! Addresses carry no structured country field. A customer "is in" a country
//! when the country appears as a whole token of the address once punctuation
//! is stripped, so `"123 Main St, Netherlands"` matches `Netherlands` while
//! `"Netherlands2"` does not.

use std::sync::LazyLock;

use regex::Regex;

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]+").expect("static regex must compile"));

/// Splits an address into punctuation-free, whitespace-separated tokens.
///
/// Unicode word characters (letters, marks, decimal digits, connector
/// punctuation) and whitespace survive; every other run of characters is
/// removed without inserting a separator.
pub fn address_tokens(address: &str) -> Vec<String> {
    NON_WORD_RE.replace_all(address, "").split_whitespace().map(str::to_owned).collect()
}

/// Exact, case-sensitive token membership.
pub fn mentions_country(address: &str, country: &str) -> bool {
    address_tokens(address).iter().any(|token| token == country)
}

#[cfg(test)]
mod tests {
    use super::{address_tokens, mentions_country};

    #[test]
    fn tokens_drop_punctuation_and_split_on_whitespace() {
        assert_eq!(
            address_tokens("123 Main St., Amsterdam-Noord;  Netherlands!"),
            vec!["123", "Main", "St", "AmsterdamNoord", "Netherlands"]
        );
    }

    #[test]
    fn country_matches_whole_token_after_punctuation() {
        assert!(mentions_country("123 Main St, Netherlands", "Netherlands"));
        assert!(mentions_country("Netherlands", "Netherlands"));
    }

    #[test]
    fn country_does_not_match_substring() {
        assert!(!mentions_country("Netherlands2", "Netherlands"));
        assert!(!mentions_country("The Netherlandsish coast", "Netherlands"));
    }

    #[test]
    fn country_match_is_case_sensitive() {
        assert!(!mentions_country("Utrecht, netherlands", "Netherlands"));
    }

    #[test]
    fn underscore_and_unicode_letters_are_word_characters() {
        assert_eq!(address_tokens("Zürich, Côte_d'Or"), vec!["Zürich", "Côte_dOr"]);
    }

    #[test]
    fn combining_marks_stay_inside_the_token() {
        let decomposed = "Curac\u{0327}ao";

        assert_eq!(address_tokens("Willemstad, Curac\u{0327}ao"), vec!["Willemstad", decomposed]);
        assert!(mentions_country("Willemstad, Curac\u{0327}ao", decomposed));
        assert!(!mentions_country("Willemstad, Curac\u{0327}ao", "Curacao"));
    }

    #[test]
    fn non_decimal_numerals_are_stripped() {
        assert_eq!(address_tokens("Block 7, Zone\u{b2}"), vec!["Block", "7", "Zone"]);
        assert!(mentions_country("Zone\u{b2}", "Zone"));
    }

    #[test]
    fn empty_address_has_no_tokens() {
        assert!(address_tokens("  ,. ").is_empty());
        assert!(!mentions_country("", "Netherlands"));
    }
}
