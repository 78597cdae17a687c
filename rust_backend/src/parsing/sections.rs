//! Section (class period) expression parsing.
//!
//! Some portals hand over sections as text instead of a start/end pair:
//! `"05,06"`, `"1-2节"`, `"[3-4]"` or `"第7节"`. The first integer found is the
//! start and the last is the end.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::domain::SectionRange;

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("number pattern is valid"));

/// Extract a section range from free text.
///
/// Returns `None` when no integer is present or the numbers describe an
/// invalid range (zero start, start after end, or an end past
/// [`MAX_SECTION`](crate::core::domain::MAX_SECTION)).
///
/// # Examples
///
/// ```
/// use timetable_norm::parsing::sections::parse_section_expression;
///
/// let range = parse_section_expression("05,06").unwrap();
/// assert_eq!((range.start(), range.end()), (5, 6));
/// assert!(parse_section_expression("节").is_none());
/// ```
pub fn parse_section_expression(raw: &str) -> Option<SectionRange> {
    let numbers: Vec<u32> = NUMBER
        .find_iter(raw)
        .map(|m| m.as_str().parse().ok())
        .collect::<Option<_>>()?;
    let start = *numbers.first()?;
    let end = *numbers.last()?;
    SectionRange::new(start, end)
}
