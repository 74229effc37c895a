//! Conversion between the display and storage forms of keyword lists.
//!
//! Display form: `AA BB;CC;DD`. Storage form: `"AA BB","CC","DD"`.

use serde_json::Value;

pub const KEYWORD_DELIMITER: char = ';';

const QUOTES: [char; 2] = ['"', '\''];

/// Storage form to display form: `;` between groups, quotes removed.
pub fn to_display(storage: &str) -> String {
    if storage.is_empty() {
        return String::new();
    }
    if let Ok(items) = serde_json::from_str::<Vec<String>>(&format!("[{}]", storage)) {
        return items.join(&KEYWORD_DELIMITER.to_string());
    }
    storage
        .replace("\",\"", "\";\"")
        .replace("','", "';'")
        .replace(QUOTES, "")
}

/// Display form to storage form.
///
/// Also accepts a JSON object (its first value by key is used) or a JSON array
/// literal. Input already in storage form is decoded first, so applying this
/// twice gives the same result. Items are trimmed, empty items dropped, and
/// each item is written as a JSON string literal.
pub fn to_storage(display: &str) -> String {
    let trimmed = display.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let raw = object_first_value(trimmed).unwrap_or_else(|| trimmed.to_string());
    let input = match serde_json::from_str::<Vec<String>>(&format!("[{}]", raw)) {
        Ok(items) => items.join(&KEYWORD_DELIMITER.to_string()),
        Err(_) => {
            let unquoted = raw.replace(QUOTES, "");
            match unquoted.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                Some(inner) => inner.to_string(),
                None => unquoted,
            }
        }
    };

    input
        .split(KEYWORD_DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(quote_item)
        .collect::<Vec<_>>()
        .join(",")
}

/// One storage item: a JSON string literal, so `\` survives parsing.
pub(crate) fn quote_item(item: &str) -> String {
    Value::String(item.to_string()).to_string()
}

fn object_first_value(text: &str) -> Option<String> {
    if !(text.starts_with('{') && text.ends_with('}')) {
        return None;
    }
    let object: serde_json::Map<String, Value> = serde_json::from_str(text).ok()?;
    let (_, value) = object.into_iter().next()?;
    Some(match value {
        Value::String(s) => s,
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(&KEYWORD_DELIMITER.to_string()),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_display() {
        assert_eq!(to_display(r#""AA BB","CC","DD""#), "AA BB;CC;DD");
        assert_eq!(to_display("'AA','BB'"), "AA;BB");
        assert_eq!(to_display(""), "");
    }

    #[test]
    fn test_to_storage() {
        assert_eq!(to_storage("AA BB;CC;DD"), r#""AA BB","CC","DD""#);
        assert_eq!(to_storage("VIP"), r#""VIP""#);
        assert_eq!(to_storage(" A ; ;B "), r#""A","B""#);
        assert_eq!(to_storage(""), "");
    }

    #[test]
    fn test_to_storage_is_idempotent() {
        let once = to_storage("AA BB;CC");
        assert_eq!(to_storage(&once.replace(',', ";")), once);
        assert_eq!(to_storage(r#""VIP""#), r#""VIP""#);
    }

    #[test]
    fn test_to_storage_json_inputs() {
        assert_eq!(to_storage(r#"["A","B"]"#), r#""A,B""#);
        assert_eq!(to_storage("[A;B]"), r#""A","B""#);
        assert_eq!(to_storage(r#"{"area": "VIP;1F"}"#), r#""VIP","1F""#);
        assert_eq!(to_storage(r#"{"area": ["VIP", "1F"]}"#), r#""VIP","1F""#);
    }

    #[test]
    fn test_backslash_is_escaped() {
        let storage = to_storage("A\\B;C");
        assert_eq!(storage, r#""A\\B","C""#);
        assert_eq!(to_display(&storage), "A\\B;C");
        let parsed: Vec<String> = serde_json::from_str(&format!("[{}]", storage)).unwrap();
        assert_eq!(parsed, vec!["A\\B", "C"]);
        assert_eq!(to_storage(&storage), storage);
    }

    #[test]
    fn test_round_trip() {
        for display in ["AA BB;CC;DD", "VIP", "1F 搖滾區;2F"] {
            assert_eq!(to_display(&to_storage(display)), display);
        }
    }
}
