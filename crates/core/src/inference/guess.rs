//! User-supplied answer lists.
//!
//! Users can preload answers they expect a page to ask for. The list is kept
//! in the same storage form as keyword expressions.

use std::collections::HashSet;

use tracing::warn;

use crate::keyword::to_storage;

/// Parse a guess list in storage (`"A","B"`) or display (`A;B`) form.
///
/// An unparseable list is logged and treated as empty.
pub fn parse_guess_list(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let storage = if trimmed.contains('"') {
        trimmed.to_string()
    } else {
        to_storage(trimmed)
    };

    match serde_json::from_str::<Vec<String>>(&format!("[{}]", storage)) {
        Ok(items) => items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        Err(e) => {
            warn!("Ignoring unparseable guess list {:?}: {}", text, e);
            Vec::new()
        }
    }
}

/// Local guesses followed by online guesses, first occurrence kept.
pub fn merge_guess_lists(local: &[String], online: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    local
        .iter()
        .chain(online)
        .filter(|item| seen.insert(item.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_storage_form() {
        assert_eq!(parse_guess_list(r#""YES","同意""#), vec!["YES", "同意"]);
    }

    #[test]
    fn test_parse_display_form() {
        assert_eq!(parse_guess_list("YES; 同意 ;"), vec!["YES", "同意"]);
        assert_eq!(parse_guess_list("YES"), vec!["YES"]);
    }

    #[test]
    fn test_parse_empty_and_malformed() {
        assert!(parse_guess_list("").is_empty());
        assert!(parse_guess_list("   ").is_empty());
        assert!(parse_guess_list(r#""YES","#).is_empty());
    }

    #[test]
    fn test_merge_keeps_first_occurrence() {
        let local = vec!["A".to_string(), "B".to_string()];
        let online = vec!["B".to_string(), "C".to_string(), "A".to_string()];
        assert_eq!(merge_guess_lists(&local, &online), vec!["A", "B", "C"]);
    }
}
