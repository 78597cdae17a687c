//! Intake validation of raw adapter tuples.
//!
//! This module turns [`RawOccurrence`] and [`RawChange`] tuples into the
//! engine's typed records. It separates two kinds of problems:
//!
//! - Contract violations (weekday outside `1..=7`, missing course name) are
//!   returned as [`EngineError`]s carrying the index of the offending tuple.
//! - Data noise (inverted, oversized or missing sections, unreadable week expressions)
//!   drops or empties the tuple, and is counted and reported as a warning.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::domain::{
    ChangeEvent, ChangeTarget, OccurrenceRecord, Replacement, SectionRange, WeekSet, Weekday,
};
use crate::core::error::{EngineError, EngineResult};
use crate::parsing::json_parser::{RawChange, RawOccurrence, RawReplacement, WeekSpec};
use crate::parsing::sections::parse_section_expression;
use crate::parsing::weeks::{parse_week_bitmask, OddEvenFilter};
use crate::preprocessing::pipeline::PipelineConfig;

/// Only the first few drops of each kind are spelled out in warnings.
const MAX_DETAILED_WARNINGS: usize = 5;

/// Warnings and counters collected during intake.
///
/// Intake never fails on noisy data, so there is no error list here: a
/// contract violation aborts the whole batch instead.
///
/// # Examples
///
/// ```
/// use timetable_norm::preprocessing::validator::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// assert!(!result.has_warnings());
///
/// result.add_warning("Fragment 3 dropped".to_string());
/// assert_eq!(result.warnings.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Summary counters computed during intake.
///
/// # Fields
///
/// * `total_fragments` - Raw occurrence tuples received
/// * `accepted_fragments` - Tuples turned into records
/// * `dropped_invalid_sections` - Tuples dropped for a missing or invalid section range
/// * `empty_week_fragments` - Accepted records whose week set came out empty
/// * `total_changes` - Raw change tuples received
/// * `accepted_changes` - Change tuples turned into events
/// * `dropped_changes` - Change tuples dropped for an invalid target slot
/// * `dropped_replacements` - Replacements discarded for an invalid slot (removal still applies)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_fragments: usize,
    pub accepted_fragments: usize,
    pub dropped_invalid_sections: usize,
    pub empty_week_fragments: usize,
    pub total_changes: usize,
    pub accepted_changes: usize,
    pub dropped_changes: usize,
    pub dropped_replacements: usize,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Record a drop, spelling it out only while under the detail limit.
    fn report_drop(&mut self, count: usize, warning: String) {
        if count <= MAX_DETAILED_WARNINGS {
            warn!("{}", warning);
            self.add_warning(warning);
        }
    }

    /// Append a "(showing first N)" total once a category overflowed.
    fn summarize_overflow(&mut self, label: &str, count: usize) {
        if count > MAX_DETAILED_WARNINGS {
            self.add_warning(format!(
                "Total {}: {} (showing first {})",
                label, count, MAX_DETAILED_WARNINGS
            ));
        }
    }
}

/// Converts raw adapter tuples into validated records and events.
///
/// # Examples
///
/// ```
/// use timetable_norm::parsing::json_parser::{RawOccurrence, WeekSpec};
/// use timetable_norm::preprocessing::pipeline::PipelineConfig;
/// use timetable_norm::preprocessing::validator::{FragmentValidator, ValidationResult};
///
/// let raw = RawOccurrence {
///     name: Some("  Organic   Chemistry ".to_string()),
///     weekday: 3,
///     start_section: Some(5),
///     end_section: Some(3),
///     weeks: Some(WeekSpec::Expression("1-16".to_string())),
///     ..Default::default()
/// };
///
/// let config = PipelineConfig::default();
/// let validator = FragmentValidator::new(&config);
/// let mut result = ValidationResult::new();
/// let records = validator.validate_fragments(&[raw], &mut result).unwrap();
/// assert!(records.is_empty());
/// assert_eq!(result.stats.dropped_invalid_sections, 1);
/// ```
pub struct FragmentValidator<'a> {
    config: &'a PipelineConfig,
}

impl<'a> FragmentValidator<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    /// Validate occurrence tuples in input order.
    ///
    /// # Arguments
    /// * `raw` - Occurrence tuples as read from the adapter
    /// * `result` - Receives warnings and counters
    ///
    /// # Returns
    /// The accepted records, or the first contract violation
    pub fn validate_fragments(
        &self,
        raw: &[RawOccurrence],
        result: &mut ValidationResult,
    ) -> EngineResult<Vec<OccurrenceRecord>> {
        result.stats.total_fragments += raw.len();
        let mut records = Vec::with_capacity(raw.len());

        for (index, tuple) in raw.iter().enumerate() {
            let Some(record) = self
                .validate_fragment(tuple, index, result)
                .map_err(|e| e.at_fragment(index))?
            else {
                continue;
            };

            if record.weeks.is_empty() {
                result.stats.empty_week_fragments += 1;
            }
            result.stats.accepted_fragments += 1;
            records.push(record);
        }

        let dropped = result.stats.dropped_invalid_sections;
        result.summarize_overflow("fragments with invalid sections", dropped);
        Ok(records)
    }

    fn validate_fragment(
        &self,
        tuple: &RawOccurrence,
        index: usize,
        result: &mut ValidationResult,
    ) -> EngineResult<Option<OccurrenceRecord>> {
        let course_name = self
            .clean_optional(tuple.name.as_deref())
            .ok_or(EngineError::EmptyCourseName)?;
        let weekday = Weekday::new(tuple.weekday)?;

        let sections = match tuple_sections(tuple) {
            Some(sections) => sections,
            None => {
                result.stats.dropped_invalid_sections += 1;
                let dropped = result.stats.dropped_invalid_sections;
                result.report_drop(
                    dropped,
                    format!(
                        "Fragment {} ({}) dropped: invalid section range {:?}-{:?} / {:?}",
                        index, course_name, tuple.start_section, tuple.end_section, tuple.sections
                    ),
                );
                return Ok(None);
            }
        };

        let filter = tuple
            .odd_even
            .as_ref()
            .map(|spec| spec.to_filter())
            .unwrap_or_default();
        let weeks = resolve_weeks(tuple.weeks.as_ref(), tuple.week_mask.as_deref(), filter);

        let teacher = self
            .clean_optional(tuple.teacher.as_deref())
            .unwrap_or_else(|| self.config.teacher_placeholder.clone());
        let location = self
            .clean_optional(tuple.location.as_deref())
            .unwrap_or_else(|| self.config.location_placeholder.clone());

        OccurrenceRecord::new(course_name, teacher, location, weekday, sections, weeks).map(Some)
    }

    /// Validate change tuples in input order.
    pub fn validate_changes(
        &self,
        raw: &[RawChange],
        result: &mut ValidationResult,
    ) -> EngineResult<Vec<ChangeEvent>> {
        result.stats.total_changes += raw.len();
        let mut events = Vec::with_capacity(raw.len());

        for (index, tuple) in raw.iter().enumerate() {
            if let Some(event) = self
                .validate_change(tuple, index, result)
                .map_err(|e| e.at_change(index))?
            {
                result.stats.accepted_changes += 1;
                events.push(event);
            }
        }

        let (dropped, replacements) = (result.stats.dropped_changes, result.stats.dropped_replacements);
        result.summarize_overflow("change events with invalid target slots", dropped);
        result.summarize_overflow("replacements with invalid slots", replacements);
        Ok(events)
    }

    fn validate_change(
        &self,
        tuple: &RawChange,
        index: usize,
        result: &mut ValidationResult,
    ) -> EngineResult<Option<ChangeEvent>> {
        let weekday = Weekday::new(tuple.weekday)?;

        let Some(sections) = section_pair(Some(tuple.start_section), Some(tuple.end_section)) else {
            result.stats.dropped_changes += 1;
            let dropped = result.stats.dropped_changes;
            result.report_drop(
                dropped,
                format!(
                    "Change event {} dropped: invalid target sections {}-{}",
                    index, tuple.start_section, tuple.end_section
                ),
            );
            return Ok(None);
        };

        let target = ChangeTarget {
            course_name: self.clean_optional(tuple.course_name.as_deref()),
            teacher: self.clean_optional(tuple.teacher.as_deref()),
            weekday,
            sections,
        };
        let weeks_to_remove = resolve_weeks(
            tuple.weeks_to_remove.as_ref(),
            tuple.weeks_to_remove_mask.as_deref(),
            OddEvenFilter::None,
        );

        let replacement = match &tuple.replacement {
            Some(raw) => {
                let replacement = self.validate_replacement(raw)?;
                if replacement.is_none() {
                    result.stats.dropped_replacements += 1;
                    let dropped = result.stats.dropped_replacements;
                    result.report_drop(
                        dropped,
                        format!(
                            "Change event {}: replacement slot {}-{} is invalid, only the removal applies",
                            index, raw.start_section, raw.end_section
                        ),
                    );
                }
                replacement
            }
            None => None,
        };

        Ok(Some(ChangeEvent {
            target,
            weeks_to_remove,
            replacement,
        }))
    }

    fn validate_replacement(&self, raw: &RawReplacement) -> EngineResult<Option<Replacement>> {
        let weekday = Weekday::new(raw.weekday)?;
        let Some(sections) = section_pair(Some(raw.start_section), Some(raw.end_section)) else {
            return Ok(None);
        };

        Ok(Some(Replacement {
            weekday,
            sections,
            weeks: resolve_weeks(raw.weeks.as_ref(), raw.week_mask.as_deref(), OddEvenFilter::None),
            location: self.clean_optional(raw.location.as_deref()),
            teacher: self.clean_optional(raw.teacher.as_deref()),
        }))
    }

    /// Normalize free text; blank input becomes `None`.
    fn clean_optional(&self, text: Option<&str>) -> Option<String> {
        let text = text?;
        let cleaned = if self.config.collapse_whitespace {
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        } else {
            text.trim().to_string()
        };
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }
}

/// Sections from explicit bounds when present, else from the text form.
fn tuple_sections(tuple: &RawOccurrence) -> Option<SectionRange> {
    match (tuple.start_section, tuple.end_section) {
        (None, None) => tuple.sections.as_deref().and_then(parse_section_expression),
        (start, end) => section_pair(start, end),
    }
}

/// A lone bound describes a single period.
fn section_pair(start: Option<i64>, end: Option<i64>) -> Option<SectionRange> {
    let (start, end) = match (start, end) {
        (Some(s), Some(e)) => (s, e),
        (Some(s), None) | (None, Some(s)) => (s, s),
        (None, None) => return None,
    };
    let start = u32::try_from(start).ok()?;
    let end = u32::try_from(end).ok()?;
    SectionRange::new(start, end)
}

/// Weeks from a list or expression, else a bitmask, else nothing.
fn resolve_weeks(spec: Option<&WeekSpec>, mask: Option<&str>, filter: OddEvenFilter) -> WeekSet {
    match (spec, mask) {
        (Some(spec), _) => spec.resolve(filter),
        (None, Some(mask)) => parse_week_bitmask(mask)
            .iter()
            .filter(|&w| filter.accepts(w))
            .collect(),
        (None, None) => WeekSet::new(),
    }
}
