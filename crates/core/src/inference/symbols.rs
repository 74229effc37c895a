//! Least reliable fallback: harvest `\w+` tokens between delimiter symbols in
//! questions that ask for half-width input. Best effort only.

use once_cell::sync::Lazy;
use regex_lite::Regex;

const HALF_WIDTH_MARKER: &str = "半形";

const SYMBOL_PAIRS: &[(char, char)] = &[
    ('(', ')'),
    ('[', ']'),
    ('{', '}'),
    (' ', ':'),
    (' ', '.'),
    (' ', ')'),
    (' ', '-'),
];

static SYMBOL_PATTERNS: Lazy<Vec<(char, char, Regex)>> = Lazy::new(|| {
    SYMBOL_PAIRS
        .iter()
        .map(|&(left, right)| {
            let source = format!(
                r"{}\w+{}",
                regex_lite::escape(&left.to_string()),
                regex_lite::escape(&right.to_string())
            );
            let regex = Regex::new(&source).expect("static symbol pattern");
            (left, right, regex)
        })
        .collect()
});

/// Candidates found between the first delimiter pair yielding two or more hits.
pub fn extract_from_symbols(text: &str) -> Vec<String> {
    if !text.contains(HALF_WIDTH_MARKER) {
        return Vec::new();
    }
    let text = text.replace(['?', '？', '。'], " ");

    for (left, right, regex) in SYMBOL_PATTERNS.iter() {
        if !text.contains(*left) || !text.contains(*right) {
            continue;
        }
        let hits: Vec<&str> = regex.find_iter(&text).map(|m| m.as_str()).collect();
        if hits.len() < 2 {
            continue;
        }
        let answers: Vec<String> = hits
            .iter()
            .filter_map(|hit| strip_outer(hit))
            .map(str::to_string)
            .collect();
        if !answers.is_empty() {
            return answers;
        }
    }
    Vec::new()
}

fn strip_outer(hit: &str) -> Option<&str> {
    let mut chars = hit.chars();
    chars.next()?;
    chars.next_back()?;
    let inner = chars.as_str();
    (!inner.is_empty()).then_some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parenthesized_tokens() {
        let answers = extract_from_symbols("以半形輸入下列其中之一 (ABC) 或 (DEF)");
        assert_eq!(answers, vec!["ABC", "DEF"]);
    }

    #[test]
    fn test_requires_half_width_marker() {
        assert!(extract_from_symbols("(ABC) (DEF)").is_empty());
    }

    #[test]
    fn test_single_hit_is_not_enough() {
        assert!(extract_from_symbols("半形 (ABC)").is_empty());
    }

    #[test]
    fn test_space_colon_pair() {
        let answers = extract_from_symbols("半形英文 A1: 選項 B2: 選項");
        assert_eq!(answers, vec!["A1", "B2"]);
    }
}
