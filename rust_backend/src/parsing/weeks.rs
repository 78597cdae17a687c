//! Week-of-term expression parsing.
//!
//! Portals encode teaching weeks in many textual shapes: `"1-16"`,
//! `"1,3,5-9"`, `"7-15(单)"`, `"1-16周[01-02节]"`, `"1-9,11-17(周)"`, or a
//! positional bitmask such as `"0111100000"`. Everything here folds those
//! into a [`WeekSet`] and never fails: malformed tokens are skipped and an
//! unusable expression yields an empty set, which callers treat as "drop
//! this fragment".

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::domain::WeekSet;

/// Ranges wider than this are treated as malformed tokens.
const MAX_RANGE_SPAN: u32 = 1024;

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("HTML tag pattern is valid"));

static BRACKET_ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]|【[^】]*】").expect("bracket pattern is valid"));

/// Odd/even week restriction applied to every parsed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OddEvenFilter {
    #[default]
    None,
    OddOnly,
    EvenOnly,
}

impl OddEvenFilter {
    /// Maps the numeric flag some portals send next to the week list:
    /// `1` is odd weeks only, `2` is even weeks only, anything else
    /// (`0`, `-1`, ...) means every week.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => OddEvenFilter::OddOnly,
            2 => OddEvenFilter::EvenOnly,
            _ => OddEvenFilter::None,
        }
    }

    /// Detects an odd (`单`, `odd`) or even (`双`, `even`) marker in `text`.
    /// Text carrying both markers, or neither, yields [`OddEvenFilter::None`].
    pub fn from_marker(text: &str) -> Self {
        let lower = text.to_lowercase();
        let odd = lower.contains('单') || lower.contains("odd");
        let even = lower.contains('双') || lower.contains("even");
        match (odd, even) {
            (true, false) => OddEvenFilter::OddOnly,
            (false, true) => OddEvenFilter::EvenOnly,
            _ => OddEvenFilter::None,
        }
    }

    pub fn accepts(self, week: u32) -> bool {
        match self {
            OddEvenFilter::None => true,
            OddEvenFilter::OddOnly => week % 2 == 1,
            OddEvenFilter::EvenOnly => week % 2 == 0,
        }
    }
}

/// Parser for textual week expressions.
pub struct WeekExpressionParser;

impl WeekExpressionParser {
    pub fn parse(raw: &str, filter: OddEvenFilter) -> WeekSet {
        parse_week_expression(raw, filter)
    }

    pub fn parse_bitmask(mask: &str) -> WeekSet {
        parse_week_bitmask(mask)
    }

    /// Parse several expressions sharing one filter.
    pub fn parse_batch(expressions: &[&str], filter: OddEvenFilter) -> Vec<WeekSet> {
        expressions
            .iter()
            .map(|raw| parse_week_expression(raw, filter))
            .collect()
    }
}

/// Parse a comma-separated week expression into a sorted, duplicate-free set.
///
/// Each token is a single week or an inclusive `start-end` range. A `单`/`双`
/// marker inside a token overrides `filter` for that token only. Tokens that
/// cannot be read, and ranges with `start > end`, are skipped.
///
/// # Examples
///
/// ```
/// use timetable_norm::parsing::weeks::{parse_week_expression, OddEvenFilter};
///
/// let weeks = parse_week_expression("1-16(单)", OddEvenFilter::OddOnly);
/// assert_eq!(weeks.as_slice(), &[1, 3, 5, 7, 9, 11, 13, 15]);
///
/// let weeks = parse_week_expression("1-3周[01-02节],6", OddEvenFilter::None);
/// assert_eq!(weeks.as_slice(), &[1, 2, 3, 6]);
/// ```
pub fn parse_week_expression(raw: &str, filter: OddEvenFilter) -> WeekSet {
    let cleaned = strip_decorations(raw);
    if cleaned.trim().is_empty() {
        return WeekSet::new();
    }

    let mut weeks = Vec::new();
    for token in cleaned.split(',') {
        let token_filter = match OddEvenFilter::from_marker(token) {
            OddEvenFilter::None => filter,
            marked => marked,
        };
        match parse_token(token) {
            Some((start, end)) => {
                weeks.extend((start..=end).filter(|&w| token_filter.accepts(w)));
            }
            None => {
                if !token.trim().is_empty() {
                    debug!("Skipping malformed week token '{}' in '{}'", token, raw);
                }
            }
        }
    }

    WeekSet::from_weeks(weeks)
}

/// Parse a positional bitmask: the i-th character (1-based) being `'1'`
/// marks week i as occupied. Every other character means unoccupied.
///
/// ```
/// use timetable_norm::parsing::weeks::parse_week_bitmask;
///
/// assert_eq!(parse_week_bitmask("0110001").as_slice(), &[2, 3, 7]);
/// ```
pub fn parse_week_bitmask(mask: &str) -> WeekSet {
    mask.chars()
        .zip(1u32..)
        .filter(|(c, _)| *c == '1')
        .map(|(_, week)| week)
        .collect()
}

/// Remove markup and unit decorations, normalizing separators to ASCII.
fn strip_decorations(raw: &str) -> String {
    let without_tags = HTML_TAG.replace_all(raw, "");
    let without_brackets = BRACKET_ANNOTATION.replace_all(&without_tags, "");

    without_brackets
        .chars()
        .map(|c| match c {
            '，' | '、' | ';' | '；' => ',',
            '~' | '～' | '–' | '—' | '至' => '-',
            other => other,
        })
        .collect()
}

/// Read one token as an inclusive `(start, end)` pair.
fn parse_token(token: &str) -> Option<(u32, u32)> {
    let digits: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    if digits.is_empty() {
        return None;
    }

    let mut parts = digits.split('-');
    let first = parts.next()?;
    let second = parts.next();
    if parts.next().is_some() {
        return None;
    }

    let start: u32 = first.parse().ok()?;
    let end: u32 = match second {
        Some(s) => s.parse().ok()?,
        None => start,
    };

    if start > end || end - start > MAX_RANGE_SPAN {
        return None;
    }
    Some((start, end))
}
