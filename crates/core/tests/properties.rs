//! Property tests for the pure text functions.

use proptest::prelude::*;

use ticketeer_core::inference::{extract_options, must_keep_symbols, CandidatePattern};
use ticketeer_core::{to_display, to_storage};

proptest! {
    /// An exact-length pattern accepts its own example and nothing of another length.
    #[test]
    fn fixed_pattern_matches_same_shape(example in "[A-Za-z0-9_+*?.()\\-]{0,11}[A-Za-z0-9]") {
        let pattern = CandidatePattern::synthesize(&example, false);
        prop_assert!(pattern.matches_exactly(&example));

        let longer = format!("{}{}", example, example.chars().last().unwrap());
        prop_assert!(!pattern.matches_exactly(&longer));

        let shorter: String = example.chars().skip(1).collect();
        prop_assert!(!pattern.matches_exactly(&shorter));
    }

    /// Swapping each character for another of the same class still matches.
    #[test]
    fn fixed_pattern_accepts_class_preserving_substitution(example in "[A-Za-z0-9]{1,12}") {
        let pattern = CandidatePattern::synthesize(&example, false);
        let swapped: String = example
            .chars()
            .map(|c| match c {
                'A'..='Y' | 'a'..='y' | '0'..='8' => ((c as u8) + 1) as char,
                'Z' => 'A',
                'z' => 'a',
                _ => '0',
            })
            .collect();
        prop_assert!(pattern.matches_exactly(&swapped));
    }

    /// Option lists are empty or hold at least three entries.
    #[test]
    fn option_list_cardinality(text in "[A-Za-z0-9()\\[\\]【】:\n 選項]{0,60}") {
        let options = extract_options(&text);
        prop_assert!(options.is_empty() || options.len() >= 3);
    }

    #[test]
    fn keep_symbols_is_deterministic(text in "\\PC{0,40}") {
        prop_assert_eq!(must_keep_symbols(&text), must_keep_symbols(&text));
    }

    /// Display form survives a trip through storage form.
    #[test]
    fn keyword_round_trip(items in prop::collection::vec("[A-Za-z0-9]{1,6}( [A-Za-z0-9]{1,6})?", 1..5)) {
        let display = items.join(";");
        prop_assert_eq!(to_display(&to_storage(&display)), display);
    }
}
