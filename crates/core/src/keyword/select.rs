//! Choosing one row among keyword matches.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::AutoSelectConfig;
use super::expression::{KeywordError, KeywordExpression, KeywordTerm};

/// Policy for picking one of several matched rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    #[serde(rename = "from top to bottom")]
    TopToBottom,
    #[serde(rename = "from bottom to top")]
    BottomToTop,
    #[serde(rename = "center")]
    Center,
    #[default]
    #[serde(rename = "random")]
    Random,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::TopToBottom => "from top to bottom",
            SelectionMode::BottomToTop => "from bottom to top",
            SelectionMode::Center => "center",
            SelectionMode::Random => "random",
        }
    }

    /// Index into `count` matched rows, `None` when there are none.
    ///
    /// Center needs more than two matches, otherwise the first is taken.
    pub fn pick_index<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Option<usize> {
        if count == 0 {
            return None;
        }
        let index = match self {
            SelectionMode::TopToBottom => 0,
            SelectionMode::BottomToTop => count - 1,
            SelectionMode::Center if count > 2 => count / 2,
            SelectionMode::Center => 0,
            SelectionMode::Random if count > 1 => rng.gen_range(0..count),
            SelectionMode::Random => 0,
        };
        Some(index)
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMode {
    type Err = KeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "from top to bottom" => Ok(SelectionMode::TopToBottom),
            "from bottom to top" => Ok(SelectionMode::BottomToTop),
            "center" => Ok(SelectionMode::Center),
            "random" => Ok(SelectionMode::Random),
            other => Err(KeywordError::UnknownMode(other.to_string())),
        }
    }
}

/// Rows removed from selection before any keyword is applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Exclusion {
    #[default]
    Nothing,
    /// The exclude expression was malformed: it matches, and so removes,
    /// every row.
    Everything,
    Expression(KeywordExpression),
}

impl Exclusion {
    pub fn parse(expression: &str) -> Self {
        match KeywordExpression::parse(expression) {
            Ok(parsed) if parsed.is_empty() => Exclusion::Nothing,
            Ok(parsed) => Exclusion::Expression(parsed),
            Err(e) => {
                warn!("{}; excluding every row", e);
                Exclusion::Everything
            }
        }
    }

    pub fn excludes(&self, text: &str) -> bool {
        match self {
            Exclusion::Nothing => false,
            Exclusion::Everything => true,
            Exclusion::Expression(expression) => expression.matches(text),
        }
    }
}

/// Indices of selectable rows accepted by `accept`, in row order.
///
/// Blank and excluded rows are never selectable. Top-to-bottom stops at the
/// first hit.
fn matched_indices<S: AsRef<str>>(
    rows: &[S],
    exclusion: &Exclusion,
    mode: SelectionMode,
    accept: impl Fn(&str) -> bool,
) -> Vec<usize> {
    let mut matched = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let text = row.as_ref();
        if text.trim().is_empty() || exclusion.excludes(text) {
            continue;
        }
        if accept(text) {
            matched.push(index);
            if mode == SelectionMode::TopToBottom {
                break;
            }
        }
    }
    matched
}

/// Select one row index matching `expression` and not `exclude_expression`.
///
/// A malformed keyword expression matches every row; a malformed exclude
/// expression leaves nothing selectable.
pub fn select_index<S, R>(
    rows: &[S],
    expression: &str,
    exclude_expression: &str,
    mode: SelectionMode,
    rng: &mut R,
) -> Option<usize>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let exclusion = Exclusion::parse(exclude_expression);
    let keyword = KeywordExpression::parse(expression).unwrap_or_else(|e| {
        warn!("{}; matching every row", e);
        KeywordExpression::default()
    });

    let matched = matched_indices(rows, &exclusion, mode, |text| keyword.matches(text));
    let pick = mode.pick_index(matched.len(), rng)?;
    Some(matched[pick])
}

/// Row form of [`select_index`].
pub fn select<'r, S, R>(
    rows: &'r [S],
    expression: &str,
    exclude_expression: &str,
    mode: SelectionMode,
    rng: &mut R,
) -> Option<&'r S>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    select_index(rows, expression, exclude_expression, mode, rng).map(|index| &rows[index])
}

/// Configured row selector for one page section (dates or areas).
///
/// Keyword terms are tried one at a time in the order written; the first term
/// matching any selectable row decides the candidate set.
#[derive(Debug, Clone)]
pub struct KeywordSelector {
    enabled: bool,
    keyword: KeywordExpression,
    exclusion: Exclusion,
    mode: SelectionMode,
    fallback: bool,
}

impl KeywordSelector {
    pub fn new(keyword: KeywordExpression, mode: SelectionMode) -> Self {
        Self {
            enabled: true,
            keyword,
            exclusion: Exclusion::Nothing,
            mode,
            fallback: false,
        }
    }

    pub fn with_exclusion(mut self, exclusion: Exclusion) -> Self {
        self.exclusion = exclusion;
        self
    }

    /// Select among all selectable rows when no keyword term matches.
    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Build from an auto-select section and the global exclude expression.
    pub fn from_config(config: &AutoSelectConfig, keyword_exclude: &str) -> Self {
        let keyword = KeywordExpression::parse(&config.keyword).unwrap_or_else(|e| {
            warn!("{}; selecting among every row", e);
            KeywordExpression::default()
        });
        Self::new(keyword, config.mode)
            .with_exclusion(Exclusion::parse(keyword_exclude))
            .with_fallback(config.fallback)
            .enabled(config.enable)
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn select_index<S, R>(&self, rows: &[S], rng: &mut R) -> Option<usize>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        if !self.enabled {
            debug!("Auto select disabled");
            return None;
        }

        if self.keyword.is_empty() {
            return self.pick(rows, rng, |_| true);
        }

        for term in self.keyword.terms() {
            if let Some(index) = self.pick(rows, rng, |text| term.matches(text)) {
                debug!("Keyword term {:?} selected row {}", term.to_string(), index);
                return Some(index);
            }
        }

        if self.fallback {
            debug!("No keyword term matched, falling back to all rows");
            return self.pick(rows, rng, |_| true);
        }

        debug!("No keyword term matched");
        None
    }

    pub fn select<'r, S, R>(&self, rows: &'r [S], rng: &mut R) -> Option<&'r S>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        self.select_index(rows, rng).map(|index| &rows[index])
    }

    /// Terms in priority order.
    pub fn terms(&self) -> &[KeywordTerm] {
        self.keyword.terms()
    }

    fn pick<S, R>(&self, rows: &[S], rng: &mut R, accept: impl Fn(&str) -> bool) -> Option<usize>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let matched = matched_indices(rows, &self.exclusion, self.mode, accept);
        let pick = self.mode.pick_index(matched.len(), rng)?;
        Some(matched[pick])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ROWS: [&str; 3] = ["1F VIP", "1F 一般", "2F VIP 輪椅"];

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_pick_index_modes() {
        let mut rng = rng();
        assert_eq!(SelectionMode::TopToBottom.pick_index(5, &mut rng), Some(0));
        assert_eq!(SelectionMode::BottomToTop.pick_index(5, &mut rng), Some(4));
        assert_eq!(SelectionMode::Center.pick_index(5, &mut rng), Some(2));
        assert_eq!(SelectionMode::Center.pick_index(4, &mut rng), Some(2));
        assert_eq!(SelectionMode::Center.pick_index(2, &mut rng), Some(0));
        assert_eq!(SelectionMode::Random.pick_index(1, &mut rng), Some(0));
        assert_eq!(SelectionMode::Random.pick_index(0, &mut rng), None);
    }

    #[test]
    fn test_random_stays_in_range() {
        let mut rng = rng();
        for _ in 0..100 {
            let index = SelectionMode::Random.pick_index(3, &mut rng).unwrap();
            assert!(index < 3);
        }
    }

    #[test]
    fn test_random_is_reproducible_with_seed() {
        let first: Vec<_> = (0..10)
            .scan(rng(), |rng, _| Some(SelectionMode::Random.pick_index(9, rng)))
            .collect();
        let second: Vec<_> = (0..10)
            .scan(rng(), |rng, _| Some(SelectionMode::Random.pick_index(9, rng)))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_mode_serde_names() {
        let mode: SelectionMode = serde_json::from_str("\"from bottom to top\"").unwrap();
        assert_eq!(mode, SelectionMode::BottomToTop);
        assert_eq!("center".parse::<SelectionMode>().unwrap(), SelectionMode::Center);
        assert!("middle".parse::<SelectionMode>().is_err());
        assert_eq!(SelectionMode::default(), SelectionMode::Random);
    }

    #[test]
    fn test_exclude_applies_before_position() {
        let selected = select(&ROWS, "\"VIP\"", "\"輪椅\"", SelectionMode::BottomToTop, &mut rng());
        assert_eq!(selected, Some(&"1F VIP"));
    }

    #[test]
    fn test_empty_exclude_excludes_nothing() {
        let selected = select(&ROWS, "\"VIP\"", "", SelectionMode::BottomToTop, &mut rng());
        assert_eq!(selected, Some(&"2F VIP 輪椅"));
    }

    #[test]
    fn test_malformed_exclude_blocks_everything() {
        let selected = select(&ROWS, "\"VIP\"", "\"輪椅\",", SelectionMode::TopToBottom, &mut rng());
        assert_eq!(selected, None);
    }

    #[test]
    fn test_malformed_keyword_matches_everything() {
        let index = select_index(&ROWS, "\"VIP\",", "", SelectionMode::BottomToTop, &mut rng());
        assert_eq!(index, Some(2));
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let rows = ["", "A", "  ", "B"];
        assert_eq!(select_index(&rows, "", "", SelectionMode::TopToBottom, &mut rng()), Some(1));
        assert_eq!(select_index(&rows, "", "", SelectionMode::BottomToTop, &mut rng()), Some(3));
    }

    #[test]
    fn test_selector_priority_terms() {
        let keyword = KeywordExpression::parse("\"2F\",\"1F\"").unwrap();
        let selector = KeywordSelector::new(keyword, SelectionMode::TopToBottom);
        assert_eq!(selector.select(&ROWS, &mut rng()), Some(&"2F VIP 輪椅"));

        let selector = selector.with_exclusion(Exclusion::parse("\"輪椅\""));
        assert_eq!(selector.select(&ROWS, &mut rng()), Some(&"1F VIP"));
    }

    #[test]
    fn test_selector_fallback() {
        let keyword = KeywordExpression::parse("\"3F\"").unwrap();
        let selector = KeywordSelector::new(keyword, SelectionMode::BottomToTop);
        assert_eq!(selector.select_index(&ROWS, &mut rng()), None);

        let selector = selector.with_fallback(true);
        assert_eq!(selector.select_index(&ROWS, &mut rng()), Some(2));
    }

    #[test]
    fn test_selector_from_config() {
        let config = AutoSelectConfig {
            keyword: "\"VIP\"".to_string(),
            mode: SelectionMode::Center,
            ..Default::default()
        };
        let selector = KeywordSelector::from_config(&config, "\"輪椅\"");
        assert_eq!(selector.select(&ROWS, &mut rng()), Some(&"1F VIP"));

        let disabled = AutoSelectConfig {
            enable: false,
            ..config
        };
        let selector = KeywordSelector::from_config(&disabled, "");
        assert_eq!(selector.select(&ROWS, &mut rng()), None);
    }

    #[test]
    fn test_empty_keyword_selects_among_all() {
        let selector = KeywordSelector::new(KeywordExpression::default(), SelectionMode::Center);
        assert_eq!(selector.select_index(&ROWS, &mut rng()), Some(1));
    }
}
