//! Hint-based extraction.
//!
//! Finds the example answer a question shows ("例如(AB12)"), turns it into a
//! character-class pattern and searches the rest of the question for real
//! answers of the same shape.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;

use super::canonical::{first_alnum_run, first_run, format_question, numeral_value, Cues};
use super::keep_symbols::must_keep_symbols;
use super::pattern::CandidatePattern;

const ANSWER_MARKER: &str = "答案";
const STAR_MARKER: char = '*';

/// Characters accepted as a required suffix right after the first match.
const ANSWER_DELIMITERS: &[char] = &[')', ']', '】', '.', ':', ' ', '}'];

/// "N 個 ..." rules: marker phrase and the character standing in for each
/// answer character.
const COUNT_RULES: &[(&str, char)] = &[
    ("個半形英文大寫", 'A'),
    ("個英文大寫", 'A'),
    ("個半形英文小寫", 'a'),
    ("個英文小寫", 'a'),
    ("個半形數字", '1'),
    ("個阿拉伯數字", '1'),
];

static BRACKET_CLAUSES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"【[^【】]*】", r"\([^()]*\)", r"\[[^\[\]]*\]"]
        .iter()
        .map(|source| Regex::new(source).expect("static bracket clause pattern"))
        .collect()
});

/// Outcome of hint extraction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HintExtraction {
    pub answers: Vec<String>,
    /// Literal example answer the hint showed; empty when no hint was found.
    pub example_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Hint {
    /// Text removed from the search region.
    clause: String,
    example_answer: String,
    dynamic_length: bool,
}

#[derive(Debug, Clone, Default)]
pub struct HintExtractor {
    cues: Cues,
}

impl HintExtractor {
    pub fn new(cues: Cues) -> Self {
        Self { cues }
    }

    pub fn cues(&self) -> &Cues {
        &self.cues
    }

    pub fn extract(&self, text: &str) -> HintExtraction {
        let formatted = format_question(text, &self.cues);
        let keep_symbols = must_keep_symbols(&formatted);

        let Some(hint) = self.locate(&formatted, keep_symbols) else {
            return HintExtraction::default();
        };

        let pattern = CandidatePattern::synthesize(&hint.example_answer, hint.dynamic_length);
        let search_text = search_region(&formatted, &hint.clause);
        let answers = find_answers(&pattern, &search_text, &hint.example_answer);
        debug!(
            "Hint example {:?} -> pattern {} -> {} answer(s)",
            hint.example_answer,
            pattern,
            answers.len()
        );

        HintExtraction {
            answers,
            example_answer: hint.example_answer,
        }
    }

    fn locate(&self, text: &str, keep_symbols: bool) -> Option<Hint> {
        cue_hint(text, &self.cues.example, keep_symbols)
            .or_else(|| {
                if text.contains(ANSWER_MARKER) {
                    cue_hint(text, &self.cues.input, keep_symbols)
                } else {
                    None
                }
            })
            .or_else(|| count_hint(text))
            .or_else(|| star_hint(text))
    }
}

/// Extract answers from the question's hint using the given cues.
pub fn extract_from_hint(text: &str, cues: &Cues) -> HintExtraction {
    HintExtractor::new(cues.clone()).extract(text)
}

/// Hint introduced by a cue marker.
///
/// When the cue sits inside a bracket pair the whole bracketed clause is the
/// hint; otherwise only the cue itself is removed from the search region, and
/// the example stays there to be filtered out later. Without anything after
/// the cue this abstains.
fn cue_hint(text: &str, cue: &str, keep_symbols: bool) -> Option<Hint> {
    if cue.is_empty() || !text.contains(cue) {
        return None;
    }

    let (clause, region) = match bracket_clause_containing(text, cue) {
        Some((clause, inner)) => (clause, inner),
        None => (cue, text),
    };
    let (_, right) = region.split_once(cue)?;

    let example = if keep_symbols {
        first_run(right, |c| c.is_ascii_alphanumeric() || "()[]{}<>".contains(c))
    } else {
        first_alnum_run(right)
    };
    if example.is_empty() {
        return None;
    }

    Some(Hint {
        clause: clause.to_string(),
        example_answer: example.to_string(),
        dynamic_length: true,
    })
}

/// First bracketed clause containing `needle`, with and without its brackets.
fn bracket_clause_containing<'a>(text: &'a str, needle: &str) -> Option<(&'a str, &'a str)> {
    BRACKET_CLAUSES.iter().find_map(|regex| {
        regex
            .find_iter(text)
            .map(|m| m.as_str())
            .find(|clause| clause.contains(needle))
            .map(|clause| {
                let mut inner = clause.chars();
                inner.next();
                inner.next_back();
                (clause, inner.as_str())
            })
    })
}

/// "4個半形英文大寫" style rules: exact-length answers of one class.
fn count_hint(text: &str) -> Option<Hint> {
    COUNT_RULES.iter().find_map(|(marker, filler)| {
        let marker_at = text.find(marker)?;
        let count_char = text[..marker_at].chars().next_back()?;
        let mut buf = [0u8; 4];
        let count = numeral_value(count_char.encode_utf8(&mut buf))?;
        if count == 0 {
            return None;
        }

        let start = marker_at - count_char.len_utf8();
        let end = text[marker_at..]
            .find(char::is_whitespace)
            .map(|offset| marker_at + offset)
            .unwrap_or(text.len());

        Some(Hint {
            clause: text[start..end].to_string(),
            example_answer: filler.to_string().repeat(count as usize),
            dynamic_length: false,
        })
    })
}

/// Bare `*`-marked hint such as `*AB12`.
fn star_hint(text: &str) -> Option<Hint> {
    let star_at = text.find(STAR_MARKER)?;
    let rest = &text[star_at..];
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let clause = &rest[..end];
    let example = first_alnum_run(&clause[STAR_MARKER.len_utf8()..]);
    if example.is_empty() {
        return None;
    }
    Some(Hint {
        clause: clause.to_string(),
        example_answer: example.to_string(),
        dynamic_length: true,
    })
}

/// Question text minus the question clause (up to `?`) minus the hint clause.
fn search_region(formatted: &str, clause: &str) -> String {
    let mut region = formatted.to_string();
    if let Some(idx) = formatted.find('?') {
        let question = &formatted[..=idx];
        if question.len() < formatted.len() {
            region = region.replace(question, "");
        }
    }
    if !clause.is_empty() {
        region = region.replace(clause, "");
    }
    region
}

fn find_answers(pattern: &CandidatePattern, text: &str, example: &str) -> Vec<String> {
    let Some(regex) = pattern.compile() else {
        return Vec::new();
    };
    // The example may still sit in the text; its trailing char says nothing
    // about how real answers end.
    let Some(first) = regex
        .find_iter(text)
        .find(|m| m.as_str() != example)
        .or_else(|| regex.find(text))
    else {
        return Vec::new();
    };

    let suffix = text[first.end()..]
        .chars()
        .next()
        .filter(|c| ANSWER_DELIMITERS.contains(c));

    let matches: Vec<String> = match suffix.and_then(|s| pattern.compile_with_suffix(s).map(|r| (s, r))) {
        Some((suffix, suffixed)) => suffixed
            .find_iter(text)
            .map(|m| {
                let found = m.as_str();
                found.strip_suffix(suffix).unwrap_or(found).to_string()
            })
            .collect(),
        None => regex.find_iter(text).map(|m| m.as_str().to_string()).collect(),
    };

    if matches.len() == 1 {
        debug!("Single hint match {:?} discarded as degenerate", matches[0]);
        return Vec::new();
    }

    let mut seen = HashSet::new();
    matches
        .into_iter()
        .filter(|m| m != example)
        .filter(|m| seen.insert(m.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> HintExtraction {
        extract_from_hint(text, &Cues::default())
    }

    #[test]
    fn test_example_generalizes_to_real_answer() {
        let result = extract("請輸入括號內文字，例如(AB12)，本場驗證碼為(XY99)");
        assert_eq!(result.answers, vec!["XY99"]);
        assert_eq!(result.example_answer, "AB12");
    }

    #[test]
    fn test_unbracketed_example_does_not_set_suffix() {
        let result = extract("請輸入驗證碼，例如 AB12 本場為 XY99");
        assert_eq!(result.example_answer, "AB12");
        assert_eq!(result.answers, vec!["XY99"]);
    }

    #[test]
    fn test_bracketed_hint_clause_is_removed() {
        let result = extract("請輸入答案(範例:AB12) 選項:(CD34)(EF56)");
        assert_eq!(result.answers, vec!["CD34", "EF56"]);
    }

    #[test]
    fn test_single_match_is_degenerate() {
        let result = extract("請輸入驗證碼，例如(AB12)");
        assert!(result.answers.is_empty());
        assert_eq!(result.example_answer, "AB12");
    }

    #[test]
    fn test_count_rule_exact_length() {
        let result = extract("請輸入4個半形英文大寫，下列 ABCD 與 EFGH 擇一");
        assert_eq!(result.answers, vec!["ABCD", "EFGH"]);
        assert_eq!(result.example_answer, "AAAA");
    }

    #[test]
    fn test_count_rule_chinese_numeral() {
        let result = extract("輸入三個半形英文小寫 abc 或 xyz 皆可");
        assert_eq!(result.example_answer, "aaa");
        assert_eq!(result.answers, vec!["abc", "xyz"]);
    }

    #[test]
    fn test_star_hint() {
        let result = extract("*AB12 為格式，可用代碼 (CD34) (EF56)");
        assert_eq!(result.answers, vec!["CD34", "EF56"]);
    }

    #[test]
    fn test_cue_without_example_abstains() {
        let result = extract("請輸入範例");
        assert_eq!(result, HintExtraction::default());
    }

    #[test]
    fn test_no_hint_abstains() {
        assert_eq!(extract("今天天氣如何"), HintExtraction::default());
    }
}
