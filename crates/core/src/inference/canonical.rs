//! Text canonicalization shared by every extractor.
//!
//! All rewrites are expressed as ordered rule tables (phrase -> canonical token)
//! so the substitution order stays auditable. Where one phrase contains another,
//! the longer phrase comes first.

/// Canonical opening bracket every opening glyph is folded onto.
pub const OPEN_BRACKET: char = '【';
/// Canonical closing bracket every closing glyph is folded onto.
pub const CLOSE_BRACKET: char = '】';

const OPENING_GLYPHS: &[char] = &[
    '「', '『', '〔', '﹝', '〈', '《', '［', '〖', '[', '（', '(', '【',
];
const CLOSING_GLYPHS: &[char] = &[
    '」', '』', '〕', '﹞', '〉', '》', '］', '〗', ']', '）', ')', '】',
];

const STOP_WORDS: &[&str] = &["輸入法", "請問", "請將", "請在", "請以", "請回答", "請"];

const SYNONYMS: &[(&str, &str)] = &[
    ("轉換成", "轉換"),
    ("轉換為", "轉換"),
    ("修改", "轉換"),
    ("調整", "轉換"),
    ("改變", "轉換"),
    ("改為", "轉換"),
    ("改成", "轉換"),
    ("置換", "轉換"),
    ("換成", "轉換"),
    ("轉為", "轉換"),
    ("轉成", "轉換"),
    ("括弧", "括號"),
    ("填入", "輸入"),
    ("填寫", "輸入"),
    ("鍵入", "輸入"),
    ("內容", "文字"),
    ("字串", "文字"),
    ("字元", "文字"),
];

/// Phrases rewritten onto the example cue.
const EXAMPLE_PHRASES: &[&str] = &["例如", "如:", "舉例", "ex:", "Ex:", "EX:"];
/// Phrases rewritten onto the input cue.
const INPUT_PHRASES: &[&str] = &["填入"];

const NUMERALS: &[(u32, &[&str])] = &[
    (0, &["0", "０", "zero", "零", "〇"]),
    (1, &["1", "１", "one", "一", "壹", "①", "❶", "⑴"]),
    (2, &["2", "２", "two", "二", "貳", "②", "❷", "⑵"]),
    (3, &["3", "３", "three", "三", "叁", "③", "❸", "⑶"]),
    (4, &["4", "４", "four", "四", "肆", "④", "❹", "⑷"]),
    (5, &["5", "５", "five", "五", "伍", "⑤", "❺", "⑸"]),
    (6, &["6", "６", "six", "六", "陸", "⑥", "❻", "⑹"]),
    (7, &["7", "７", "seven", "七", "柒", "⑦", "❼", "⑺"]),
    (8, &["8", "８", "eight", "八", "捌", "⑧", "❽", "⑻"]),
    (9, &["9", "９", "nine", "九", "玖", "⑨", "❾", "⑼"]),
];

/// The two canonical markers that "example" and "please fill in" phrases
/// are rewritten onto before hint extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cues {
    pub example: String,
    pub input: String,
}

impl Default for Cues {
    fn default() -> Self {
        Self {
            example: "範例".to_string(),
            input: "輸入".to_string(),
        }
    }
}

/// Full canonical form used by the instruction rules.
///
/// Folds full-width characters to half-width, folds every bracket glyph onto
/// `【` / `】`, strips stop words and unifies synonym phrases. Total: never fails.
pub fn canonicalize(text: &str) -> String {
    let folded = unify_brackets(&full_to_half(text));
    apply_synonyms(&strip_stop_words(&folded))
}

/// Cue-marked form used by the option and hint extractors.
///
/// Brackets keep their identity here (the option cascade tells `()` from `[]`),
/// but every example/input phrase is rewritten onto the configured cue.
pub fn format_question(text: &str, cues: &Cues) -> String {
    let mut formatted = full_to_half(text).replace("  ", " ");
    formatted = strip_stop_words(&formatted);
    for phrase in EXAMPLE_PHRASES {
        formatted = formatted.replace(phrase, &cues.example);
    }
    for phrase in INPUT_PHRASES {
        formatted = formatted.replace(phrase, &cues.input);
    }
    formatted
}

/// Fold every opening/closing bracket glyph onto the canonical pair.
pub fn unify_brackets(text: &str) -> String {
    text.chars()
        .map(|c| {
            if OPENING_GLYPHS.contains(&c) {
                OPEN_BRACKET
            } else if CLOSING_GLYPHS.contains(&c) {
                CLOSE_BRACKET
            } else {
                c
            }
        })
        .collect()
}

/// Convert the full-width ASCII block (U+FF01..=U+FF5E) and U+3000 to half-width.
pub fn full_to_half(text: &str) -> String {
    text.chars()
        .map(|c| match c as u32 {
            0x3000 => ' ',
            code @ 0xFF01..=0xFF5E => char::from_u32(code - 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect()
}

pub fn strip_stop_words(text: &str) -> String {
    STOP_WORDS
        .iter()
        .fold(text.to_string(), |acc, word| acc.replace(word, ""))
}

pub fn apply_synonyms(text: &str) -> String {
    SYNONYMS
        .iter()
        .fold(text.to_string(), |acc, (phrase, canonical)| {
            acc.replace(phrase, canonical)
        })
}

/// Numeric value of a numeral token: Arabic, full-width, Chinese, financial,
/// circled or English word form.
pub fn numeral_value(token: &str) -> Option<u32> {
    let lower = token.to_lowercase();
    NUMERALS
        .iter()
        .find(|(_, forms)| forms.contains(&lower.as_str()))
        .map(|(value, _)| *value)
}

fn char_numeral(c: char) -> Option<u32> {
    let mut buf = [0u8; 4];
    numeral_value(c.encode_utf8(&mut buf))
}

/// Keep only numeral characters, rewritten as Arabic digits.
pub fn normalize_numerals(text: &str) -> String {
    text.chars()
        .filter_map(char_numeral)
        .filter_map(|value| char::from_digit(value, 10))
        .collect()
}

/// True when every character is a numeral (and there is at least one).
pub fn is_numeral_text(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| char_numeral(c).is_some())
}

/// First contiguous run of characters accepted by `allowed`.
///
/// Leading rejected characters are skipped; the run ends at the first rejected
/// character after it starts.
pub fn first_run(text: &str, allowed: impl Fn(char) -> bool) -> &str {
    let Some(start) = text.char_indices().find(|(_, c)| allowed(*c)).map(|(i, _)| i) else {
        return "";
    };
    let rest = &text[start..];
    let end = rest
        .char_indices()
        .find(|(_, c)| !allowed(*c))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    &rest[..end]
}

/// First contiguous run of ASCII letters and digits.
pub fn first_alnum_run(text: &str) -> &str {
    first_run(text, |c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unify_brackets_folds_all_glyphs() {
        assert_eq!(unify_brackets("「A」(B)［C］《D》"), "【A】【B】【C】【D】");
    }

    #[test]
    fn test_full_to_half() {
        assert_eq!(full_to_half("ＡＢ１２　（Ｘ）：？"), "AB12 (X):?");
        assert_eq!(full_to_half("中文不變"), "中文不變");
    }

    #[test]
    fn test_stop_words_longest_first() {
        assert_eq!(strip_stop_words("請回答下列問題"), "下列問題");
        assert_eq!(strip_stop_words("請輸入注音輸入法"), "輸入注音");
    }

    #[test]
    fn test_synonyms_unify_transform() {
        assert!(apply_synonyms("改為阿拉伯數字").contains("轉換"));
        assert!(apply_synonyms("轉換成數字").contains("轉換"));
        assert_eq!(apply_synonyms("括弧內容"), "括號文字");
    }

    #[test]
    fn test_canonicalize() {
        let canonical = canonicalize("請將（括弧）內容換成數字");
        assert_eq!(canonical, "【括號】文字轉換數字");
    }

    #[test]
    fn test_format_question_marks_cues() {
        let cues = Cues::default();
        let formatted = format_question("請輸入驗證碼，例如：AB12", &cues);
        assert_eq!(formatted, "輸入驗證碼,範例:AB12");
    }

    #[test]
    fn test_numeral_value() {
        assert_eq!(numeral_value("五"), Some(5));
        assert_eq!(numeral_value("Seven"), Some(7));
        assert_eq!(numeral_value("❾"), Some(9));
        assert_eq!(numeral_value("十"), None);
    }

    #[test]
    fn test_normalize_numerals() {
        assert_eq!(normalize_numerals("三五七"), "357");
        assert_eq!(normalize_numerals("壹a貳"), "12");
        assert!(is_numeral_text("一二三"));
        assert!(!is_numeral_text("一二x"));
        assert!(!is_numeral_text(""));
    }

    #[test]
    fn test_first_alnum_run() {
        assert_eq!(first_alnum_run(":(AB12),(XY99)"), "AB12");
        assert_eq!(first_alnum_run("中文"), "");
        assert_eq!(first_alnum_run("abc"), "abc");
    }
}
