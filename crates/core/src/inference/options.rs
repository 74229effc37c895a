//! Multi-option extraction: bracket-delimited candidate lists such as
//! `(A) ... (B) ... (C)` or one option per line.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;

use super::keep_symbols::must_keep_symbols;

/// Fewer matches than this are treated as coincidental punctuation.
const MIN_OPTIONS: usize = 3;

/// Delimiter pairs tried in order; the first yielding enough matches wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionDelimiter {
    /// `【A】`
    Lenticular,
    /// `(A)`
    Paren,
    /// `[A]`
    Square,
    /// newline + `A)`
    LineParen,
    /// newline + `A]`
    LineSquare,
    /// newline + `A】`
    LineLenticular,
    /// newline + `A:`
    LineColon,
}

impl OptionDelimiter {
    pub const CASCADE: [OptionDelimiter; 7] = [
        OptionDelimiter::Lenticular,
        OptionDelimiter::Paren,
        OptionDelimiter::Square,
        OptionDelimiter::LineParen,
        OptionDelimiter::LineSquare,
        OptionDelimiter::LineLenticular,
        OptionDelimiter::LineColon,
    ];

    /// Characters that must both be present before the pattern is tried.
    fn required(self) -> (char, char) {
        match self {
            OptionDelimiter::Lenticular => ('【', '】'),
            OptionDelimiter::Paren => ('(', ')'),
            OptionDelimiter::Square => ('[', ']'),
            OptionDelimiter::LineParen => ('\n', ')'),
            OptionDelimiter::LineSquare => ('\n', ']'),
            OptionDelimiter::LineLenticular => ('\n', '】'),
            OptionDelimiter::LineColon => ('\n', ':'),
        }
    }

    fn source(self) -> &'static str {
        match self {
            OptionDelimiter::Lenticular => r"【.{1,4}?】",
            OptionDelimiter::Paren => r"\(.{1,4}?\)",
            OptionDelimiter::Square => r"\[.{1,4}?\]",
            OptionDelimiter::LineParen => r"\n.{1,4}?\)",
            OptionDelimiter::LineSquare => r"\n.{1,4}?\]",
            OptionDelimiter::LineLenticular => r"\n.{1,4}?】",
            OptionDelimiter::LineColon => r"\n.{1,4}?:",
        }
    }

    fn is_line_based(self) -> bool {
        matches!(
            self,
            OptionDelimiter::LineParen
                | OptionDelimiter::LineSquare
                | OptionDelimiter::LineLenticular
                | OptionDelimiter::LineColon
        )
    }

    /// Turn a raw match into an option, dropping delimiters unless kept.
    fn clean(self, raw: &str, keep_symbols: bool) -> String {
        let mut chars = raw.chars();
        if self.is_line_based() {
            chars.next();
            if !keep_symbols {
                chars.next_back();
            }
        } else if !keep_symbols {
            chars.next();
            chars.next_back();
        }
        chars.as_str().trim().to_string()
    }
}

static OPTION_PATTERNS: Lazy<Vec<(OptionDelimiter, Regex)>> = Lazy::new(|| {
    OptionDelimiter::CASCADE
        .iter()
        .map(|&delimiter| {
            let regex = Regex::new(delimiter.source()).expect("static option pattern");
            (delimiter, regex)
        })
        .collect()
});

/// Ordered candidate answers extracted from bracket scanning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionList {
    pub options: Vec<String>,
    /// Delimiter pair that produced the list.
    pub delimiter: Option<OptionDelimiter>,
    /// Whether bracket glyphs were retained in each option.
    pub symbols_kept: bool,
}

impl OptionList {
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }
}

/// Multi-option extractor.
///
/// The returned list always holds either zero or at least three options.
#[derive(Debug, Clone)]
pub struct OptionExtractor {
    require_alphanumeric: bool,
}

impl OptionExtractor {
    pub fn new() -> Self {
        Self {
            require_alphanumeric: true,
        }
    }

    /// Toggle the closing filter that keeps only ASCII-alphanumeric options.
    pub fn with_alphanumeric_filter(mut self, enabled: bool) -> Self {
        self.require_alphanumeric = enabled;
        self
    }

    pub fn extract(&self, text: &str) -> OptionList {
        let Some((delimiter, raw)) = first_option_set(text) else {
            return OptionList::default();
        };

        let keep_symbols = must_keep_symbols(text);
        let width = modal_width(&raw);
        let mut options: Vec<String> = raw
            .iter()
            .filter(|option| option.chars().count() == width)
            .map(|option| delimiter.clean(option, keep_symbols))
            .filter(|option| !option.is_empty())
            .collect();

        if self.require_alphanumeric {
            options.retain(|option| is_alphanumeric_option(option));
        }

        if options.len() < MIN_OPTIONS {
            debug!(
                "Option set from {:?} dropped after filtering ({} left)",
                delimiter,
                options.len()
            );
            return OptionList::default();
        }

        debug!("Extracted {} options using {:?}", options.len(), delimiter);
        OptionList {
            options,
            delimiter: Some(delimiter),
            symbols_kept: keep_symbols,
        }
    }
}

impl Default for OptionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract options with the default extractor.
pub fn extract_options(text: &str) -> OptionList {
    OptionExtractor::default().extract(text)
}

fn first_option_set(text: &str) -> Option<(OptionDelimiter, Vec<&str>)> {
    OPTION_PATTERNS.iter().find_map(|(delimiter, regex)| {
        let (open, close) = delimiter.required();
        if !text.contains(open) || !text.contains(close) {
            return None;
        }
        let matches: Vec<&str> = regex.find_iter(text).map(|m| m.as_str()).collect();
        (matches.len() >= MIN_OPTIONS).then_some((*delimiter, matches))
    })
}

/// Most common rendered width; ties go to the width seen first.
fn modal_width(options: &[&str]) -> usize {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    let mut order: Vec<usize> = Vec::new();
    for option in options {
        let width = option.chars().count();
        let count = counts.entry(width).or_insert(0);
        if *count == 0 {
            order.push(width);
        }
        *count += 1;
    }
    let mut best = 0;
    let mut best_count = 0;
    for width in order {
        let count = counts[&width];
        if count > best_count {
            best = width;
            best_count = count;
        }
    }
    best
}

fn is_alphanumeric_option(option: &str) -> bool {
    let mut core = option
        .chars()
        .filter(|c| !"()[]{}【】:".contains(*c))
        .peekable();
    core.peek().is_some() && core.all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paren_options() {
        let list = extract_options("下列何者正確? (A) 蘋果 (B) 香蕉 (C) 芭樂");
        assert_eq!(list.options, vec!["A", "B", "C"]);
        assert_eq!(list.delimiter, Some(OptionDelimiter::Paren));
        assert!(!list.symbols_kept);
    }

    #[test]
    fn test_adjacent_options() {
        let list = extract_options("選擇(A)(B)(C)(D)");
        assert_eq!(list.options, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_lenticular_takes_priority() {
        let list = extract_options("【1】【2】【3】 (x) (y) (z)");
        assert_eq!(list.options, vec!["1", "2", "3"]);
        assert_eq!(list.delimiter, Some(OptionDelimiter::Lenticular));
    }

    #[test]
    fn test_two_matches_are_coincidental() {
        assert!(extract_options("輸入(AB)或(CD)").is_empty());
    }

    #[test]
    fn test_mode_width_drops_outliers() {
        let list = extract_options("(A) (B) (C) (ABCD)");
        assert_eq!(list.options, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_line_based_options() {
        let list = extract_options("選出正確答案\nA) 一\nB) 二\nC) 三");
        assert_eq!(list.options, vec!["A", "B", "C"]);
        assert_eq!(list.delimiter, Some(OptionDelimiter::LineParen));
    }

    #[test]
    fn test_keep_symbols() {
        let list = extract_options("符號必須都相同 (A1) (B2) (C3)");
        assert_eq!(list.options, vec!["(A1)", "(B2)", "(C3)"]);
        assert!(list.symbols_kept);
    }

    #[test]
    fn test_alphanumeric_filter() {
        let text = "【同意】【取消】【離開】";
        assert!(extract_options(text).is_empty());
        let lax = OptionExtractor::new().with_alphanumeric_filter(false).extract(text);
        assert_eq!(lax.options, vec!["同意", "取消", "離開"]);
    }

    #[test]
    fn test_no_brackets() {
        assert!(extract_options("沒有任何選項").is_empty());
    }
}
