//! Detects questions that demand the answer keep its bracket/quote symbols.

/// Rewrites applied before the phrase tests, in order.
const STRICTNESS_REWRITES: &[(&str, &str)] = &[
    ("也", "須"),
    ("必須", "須"),
    ("全部都", "都"),
    ("全都", "都"),
    ("一致", "相同"),
    ("一樣", "相同"),
    ("相等", "相同"),
];

/// Connective words dropped before the case-and-bracket test.
const CONNECTIVES: &[&str] = &[
    "以及", "還有", "而且", "一模", "含", "和", "與", "及", "需", "須", "且", "都",
];

const SYMBOL_PHRASES: &[&str] = &["符號須都相同", "符號都相同"];
const CASE_AND_BRACKET_PHRASE: &str = "大小寫括號相同";

/// True when the question says symbols (brackets, quotes) must be typed exactly.
///
/// Pure function of its input.
pub fn must_keep_symbols(text: &str) -> bool {
    let rewritten = STRICTNESS_REWRITES
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to));

    if SYMBOL_PHRASES.iter().any(|phrase| rewritten.contains(phrase)) {
        return true;
    }

    let stripped = CONNECTIVES
        .iter()
        .fold(rewritten, |acc, word| acc.replace(word, ""));
    stripped.contains(CASE_AND_BRACKET_PHRASE)
}
