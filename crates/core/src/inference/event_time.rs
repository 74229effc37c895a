//! Performance date/time answers.
//!
//! Some pages ask for the performance date or start time "in half-width
//! digits". The answer is not in the question: it is the displayed event date
//! supplied by the caller, re-rendered in the shape the hint shows.

use std::fmt::Write;

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::{debug, warn};

use super::canonical::first_run;
use super::pattern::{CandidatePattern, CharClass, PatternToken};
use super::traits::AnswerRule;
use super::types::{QuestionContext, RuleKind};

const DATE_CUES: &[&str] = &[
    "演出日期",
    "表演日期",
    "活動日期",
    "節目日期",
    "場次日期",
    "performance date",
    "event date",
    "show date",
];

const TIME_CUES: &[&str] = &[
    "演出時間",
    "表演時間",
    "開演時間",
    "活動時間",
    "節目時間",
    "場次時間",
    "performance time",
    "event time",
    "show time",
    "start time",
];

/// Phrases asking for the answer as half-width digits.
const DIGIT_CUES: &[&str] = &["半形", "數字", "阿拉伯", "digit", "number"];

const FORMAT_MARKER: &str = "格式";
const TWELVE_HOUR_MARKERS: &[&str] = &["12小時", "十二小時", "12-hour", "12 hour"];

/// Literal templates, longest first so `YYYYMMDD` wins over `MMDD`.
const DATE_TEMPLATES: &[(&str, &str)] = &[
    ("YYYY/MM/DD", "%Y/%m/%d"),
    ("YYYY-MM-DD", "%Y-%m-%d"),
    ("YYYYMMDD", "%Y%m%d"),
    ("MM/DD", "%m/%d"),
    ("MMDD", "%m%d"),
];

const TIME_TEMPLATES: &[(&str, &str)] = &[
    ("HH:MM", "%H:%M"),
    ("hh:mm", "%H:%M"),
    ("HHMM", "%H%M"),
    ("hhmm", "%H%M"),
];

const DATE_DEFAULTS: &[&str] = &["%Y%m%d", "%m%d"];
const TIME_DEFAULTS: &[&str] = &["%H:%M", "%H%M"];

static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[(（][^()（）]*[)）]").expect("static parenthetical pattern"));

/// A displayed performance date with optional start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMoment {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

/// Parse a displayed event string such as `2025/12/24 19:30(三)`.
///
/// Parentheticals are dropped and anything after a `~` range marker is
/// ignored. Returns `None` when the leading token is not a `%Y/%m/%d` date.
pub fn parse_event_datetime(raw: &str) -> Option<EventMoment> {
    let without_notes = PARENTHETICAL.replace_all(raw, " ");
    let head = without_notes.split(['~', '～']).next().unwrap_or_default();
    let mut parts = head
        .split_whitespace()
        .map(|part| part.trim_end_matches([',', '-', '、']));

    let date_text = parts.next()?;
    let date = match NaiveDate::parse_from_str(date_text, "%Y/%m/%d") {
        Ok(date) => date,
        Err(e) => {
            warn!("Unparseable event date {:?}: {}", raw, e);
            return None;
        }
    };
    let time = parts
        .next()
        .and_then(|text| NaiveTime::parse_from_str(text, "%H:%M").ok());

    Some(EventMoment { date, time })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Digits(usize),
    Separator(char),
}

/// Digit groups and separators of an exact-length pattern. `None` when the
/// pattern holds letters.
fn segments(pattern: &CandidatePattern) -> Option<Vec<Segment>> {
    let mut out: Vec<Segment> = Vec::new();
    for token in pattern.tokens() {
        match token {
            PatternToken::Class(CharClass::Digit) => match out.last_mut() {
                Some(Segment::Digits(n)) => *n += 1,
                _ => out.push(Segment::Digits(1)),
            },
            PatternToken::Literal(c) => out.push(Segment::Separator(*c)),
            _ => return None,
        }
    }
    (!out.is_empty()).then_some(out)
}

fn date_format_for(segments: &[Segment]) -> Option<String> {
    use Segment::{Digits, Separator};

    match segments {
        [Digits(8)] => Some("%Y%m%d".to_string()),
        [Digits(6)] => Some("%y%m%d".to_string()),
        [Digits(4)] => Some("%m%d".to_string()),
        [Digits(4), Separator(a), Digits(2), Separator(b), Digits(2)] => {
            Some(format!("%Y{a}%m{b}%d"))
        }
        [Digits(2), Separator(s), Digits(2)] => Some(format!("%m{s}%d")),
        [Digits(m), Separator(s), Digits(d)] if *m <= 2 && *d <= 2 => {
            Some(format!("%-m{s}%-d"))
        }
        _ => None,
    }
}

fn time_format_for(segments: &[Segment]) -> Option<String> {
    use Segment::{Digits, Separator};

    match segments {
        [Digits(4)] => Some("%H%M".to_string()),
        [Digits(3)] => Some("%-H%M".to_string()),
        [Digits(2), Separator(s), Digits(2)] => Some(format!("%H{s}%M")),
        [Digits(1), Separator(s), Digits(2)] => Some(format!("%-H{s}%M")),
        _ => None,
    }
}

fn mentions(ctx: &QuestionContext<'_>, cues: &[&str]) -> bool {
    let lower = ctx.canonical.to_lowercase();
    cues.iter().any(|cue| lower.contains(cue))
}

/// Text following the example cue, or the format marker.
fn hint_tail<'c>(ctx: &'c QuestionContext<'_>) -> Option<&'c str> {
    let text = ctx.formatted.as_str();
    text.split_once(ctx.cues.example.as_str())
        .or_else(|| text.split_once(FORMAT_MARKER))
        .map(|(_, right)| right)
}

/// Digits-and-separators sample after the cue, e.g. `20240101` or `09:30`.
fn hint_sample<'c>(ctx: &'c QuestionContext<'_>) -> Option<&'c str> {
    let tail = hint_tail(ctx)?;
    let sample = first_run(tail, |c| c.is_ascii_digit() || "/:-.".contains(c))
        .trim_matches(|c: char| !c.is_ascii_digit());
    (!sample.is_empty()).then_some(sample)
}

fn template_format(ctx: &QuestionContext<'_>, templates: &[(&str, &str)]) -> Option<String> {
    templates
        .iter()
        .find(|(template, _)| ctx.formatted.contains(template))
        .map(|(_, format)| format.to_string())
}

fn shape_format(
    ctx: &QuestionContext<'_>,
    format_for: fn(&[Segment]) -> Option<String>,
) -> Option<String> {
    let sample = hint_sample(ctx)?;
    let pattern = CandidatePattern::synthesize(sample, false);
    let format = segments(&pattern).and_then(|s| format_for(&s));
    debug!("Date/time hint {:?} -> {:?}", sample, format);
    format
}

/// The question asks for digits: a digit cue, a literal template or a digit
/// sample after the example cue. A bare mention of the date is not enough.
fn asks_for_digits(ctx: &QuestionContext<'_>, templates: &[(&str, &str)]) -> bool {
    mentions(ctx, DIGIT_CUES)
        || template_format(ctx, templates).is_some()
        || hint_sample(ctx).is_some()
}

fn render_all(
    formats: &[String],
    render: impl Fn(&str, &mut String) -> std::fmt::Result,
) -> Vec<String> {
    let mut answers: Vec<String> = Vec::new();
    for format in formats {
        let mut out = String::new();
        if render(format, &mut out).is_err() {
            warn!("Invalid date/time format {:?}", format);
            continue;
        }
        if !answers.contains(&out) {
            answers.push(out);
        }
    }
    answers
}

/// Answers "what is the performance date" from the displayed event date.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventDateRule;

impl EventDateRule {
    fn formats(ctx: &QuestionContext<'_>) -> Vec<String> {
        template_format(ctx, DATE_TEMPLATES)
            .or_else(|| shape_format(ctx, date_format_for))
            .map(|format| vec![format])
            .unwrap_or_else(|| DATE_DEFAULTS.iter().map(|f| f.to_string()).collect())
    }
}

impl AnswerRule for EventDateRule {
    fn kind(&self) -> RuleKind {
        RuleKind::EventDate
    }

    fn apply(&self, ctx: &QuestionContext<'_>) -> Option<Vec<String>> {
        if !mentions(ctx, DATE_CUES) || !asks_for_digits(ctx, DATE_TEMPLATES) {
            return None;
        }
        let Some(event) = ctx.event else {
            debug!("Date question without a displayed event date");
            return None;
        };
        let formats = Self::formats(ctx);
        Some(render_all(&formats, |format, out| {
            write!(out, "{}", event.date.format(format))
        }))
    }
}

/// Answers "what is the start time" from the displayed event time.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventTimeRule;

impl EventTimeRule {
    fn formats(ctx: &QuestionContext<'_>) -> Vec<String> {
        let formats: Vec<String> = template_format(ctx, TIME_TEMPLATES)
            .or_else(|| shape_format(ctx, time_format_for))
            .map(|format| vec![format])
            .unwrap_or_else(|| TIME_DEFAULTS.iter().map(|f| f.to_string()).collect());

        let meridiem = hint_tail(ctx).is_some_and(|tail| {
            let head: String = tail.chars().take(16).collect::<String>().to_lowercase();
            head.contains("am") || head.contains("pm")
        });
        let twelve_hour = meridiem || mentions(ctx, TWELVE_HOUR_MARKERS);
        if !twelve_hour {
            return formats;
        }

        formats
            .into_iter()
            .map(|format| {
                let mut format = format.replace("%H", "%I").replace("%-H", "%-I");
                if meridiem {
                    format.push_str("%p");
                }
                format
            })
            .collect()
    }
}

impl AnswerRule for EventTimeRule {
    fn kind(&self) -> RuleKind {
        RuleKind::EventTime
    }

    fn apply(&self, ctx: &QuestionContext<'_>) -> Option<Vec<String>> {
        if !mentions(ctx, TIME_CUES) || !asks_for_digits(ctx, TIME_TEMPLATES) {
            return None;
        }
        let Some(time) = ctx.event.and_then(|event| event.time) else {
            debug!("Time question without a displayed event time");
            return None;
        };
        let formats = Self::formats(ctx);
        Some(render_all(&formats, |format, out| {
            write!(out, "{}", time.format(format))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::canonical::Cues;

    const EVENT: &str = "2025/12/24 19:30(三)";

    fn date_answers(question: &str, event: Option<&str>) -> Option<Vec<String>> {
        let cues = Cues::default();
        let ctx = QuestionContext::new(question, &cues, event);
        EventDateRule.apply(&ctx)
    }

    fn time_answers(question: &str, event: Option<&str>) -> Option<Vec<String>> {
        let cues = Cues::default();
        let ctx = QuestionContext::new(question, &cues, event);
        EventTimeRule.apply(&ctx)
    }

    #[test]
    fn test_parse_event_datetime() {
        let moment = parse_event_datetime(EVENT).unwrap();
        assert_eq!(moment.date, NaiveDate::from_ymd_opt(2025, 12, 24).unwrap());
        assert_eq!(moment.time, NaiveTime::from_hms_opt(19, 30, 0));

        let moment = parse_event_datetime("2025/12/24(三) 19:30").unwrap();
        assert_eq!(moment.time, NaiveTime::from_hms_opt(19, 30, 0));

        let moment = parse_event_datetime("2025/12/24 19:30 ~ 21:30").unwrap();
        assert_eq!(moment.time, NaiveTime::from_hms_opt(19, 30, 0));

        assert_eq!(parse_event_datetime("2025/12/24").unwrap().time, None);
        assert!(parse_event_datetime("星期三").is_none());
        assert!(parse_event_datetime("").is_none());
    }

    #[test]
    fn test_date_from_eight_digit_example() {
        let answers = date_answers("請輸入本場演出日期(半形數字)，例如：20240101", Some(EVENT));
        assert_eq!(answers, Some(vec!["20251224".to_string()]));
    }

    #[test]
    fn test_date_from_four_digit_example() {
        let answers = date_answers("請輸入演出日期，例如：0101", Some(EVENT));
        assert_eq!(answers, Some(vec!["1224".to_string()]));
    }

    #[test]
    fn test_date_with_separators() {
        let answers = date_answers("請輸入演出日期，例如 2024/01/01", Some(EVENT));
        assert_eq!(answers, Some(vec!["2025/12/24".to_string()]));
    }

    #[test]
    fn test_date_template() {
        let answers = date_answers("請輸入演出日期，格式為 MMDD", Some(EVENT));
        assert_eq!(answers, Some(vec!["1224".to_string()]));
    }

    #[test]
    fn test_date_without_hint_uses_defaults() {
        let answers = date_answers("請以半形數字輸入演出日期", Some(EVENT));
        assert_eq!(
            answers,
            Some(vec!["20251224".to_string(), "1224".to_string()])
        );
    }

    #[test]
    fn test_date_needs_event() {
        assert_eq!(date_answers("請以半形數字輸入演出日期", None), None);
        assert_eq!(date_answers("請以半形數字輸入演出日期", Some("TBA")), None);
        assert_eq!(date_answers("請輸入驗證碼", Some(EVENT)), None);
    }

    #[test]
    fn test_time_shapes() {
        assert_eq!(
            time_answers("請輸入演出時間，例如：09:30", Some(EVENT)),
            Some(vec!["19:30".to_string()])
        );
        assert_eq!(
            time_answers("請輸入演出時間，例如 0930", Some(EVENT)),
            Some(vec!["1930".to_string()])
        );
        assert_eq!(
            time_answers("請輸入演出時間(半形數字)", Some(EVENT)),
            Some(vec!["19:30".to_string(), "1930".to_string()])
        );
    }

    #[test]
    fn test_time_twelve_hour() {
        assert_eq!(
            time_answers("請以12小時制輸入開演時間，例如 07:30", Some(EVENT)),
            Some(vec!["07:30".to_string()])
        );
        assert_eq!(
            time_answers("請輸入開演時間，例如 07:30PM", Some(EVENT)),
            Some(vec!["07:30PM".to_string()])
        );
    }

    #[test]
    fn test_time_needs_event_time() {
        assert_eq!(time_answers("請輸入演出時間(半形數字)", Some("2025/12/24")), None);
    }

    #[test]
    fn test_date_mention_without_digit_request_abstains() {
        assert_eq!(
            date_answers("下列哪一個是本場演出日期的場次代碼?(A1) (B2) (C3)", Some(EVENT)),
            None
        );
        assert_eq!(time_answers("請選出演出時間正確的選項", Some(EVENT)), None);
    }
}
