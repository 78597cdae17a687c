use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::domain::{CanonicalBlock, WeekSet};
use crate::parsing::weeks::{parse_week_expression, OddEvenFilter};

/// Week information as adapters send it: an explicit list or an expression.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum WeekSpec {
    List(Vec<i64>),
    Expression(String),
}

impl WeekSpec {
    /// Resolve to a week set, applying `filter` to every week.
    ///
    /// Non-positive entries of an explicit list are discarded.
    pub fn resolve(&self, filter: OddEvenFilter) -> WeekSet {
        match self {
            WeekSpec::List(weeks) => weeks
                .iter()
                .filter_map(|&w| u32::try_from(w).ok())
                .filter(|&w| filter.accepts(w))
                .collect(),
            WeekSpec::Expression(raw) => parse_week_expression(raw, filter),
        }
    }
}

/// Odd/even flag as adapters send it: a numeric code or a marker string.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OddEvenSpec {
    Code(i64),
    Marker(String),
}

impl OddEvenSpec {
    pub fn to_filter(&self) -> OddEvenFilter {
        match self {
            OddEvenSpec::Code(code) => OddEvenFilter::from_code(*code),
            OddEvenSpec::Marker(marker) => OddEvenFilter::from_marker(marker),
        }
    }
}

/// Raw occurrence tuple as produced by an institution adapter.
///
/// Sections come either as `startSection`/`endSection` or as a `sections`
/// expression; weeks come as `weeks` (list or expression) or `weekMask`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOccurrence {
    #[serde(default, alias = "courseName")]
    pub name: Option<String>,
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default, alias = "position")]
    pub location: Option<String>,
    #[serde(alias = "day")]
    pub weekday: i64,
    #[serde(default)]
    pub start_section: Option<i64>,
    #[serde(default)]
    pub end_section: Option<i64>,
    #[serde(default)]
    pub sections: Option<String>,
    #[serde(default, alias = "weekExpression")]
    pub weeks: Option<WeekSpec>,
    #[serde(default)]
    pub week_mask: Option<String>,
    #[serde(default)]
    pub odd_even: Option<OddEvenSpec>,
}

/// Replacement slot of a raw change tuple.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReplacement {
    #[serde(alias = "day")]
    pub weekday: i64,
    pub start_section: i64,
    pub end_section: i64,
    #[serde(default, alias = "weekExpression")]
    pub weeks: Option<WeekSpec>,
    #[serde(default)]
    pub week_mask: Option<String>,
    #[serde(default, alias = "position")]
    pub location: Option<String>,
    #[serde(default)]
    pub teacher: Option<String>,
}

/// Raw change tuple: cancellation, relocation or rescheduling of a slot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChange {
    #[serde(default, alias = "name")]
    pub course_name: Option<String>,
    #[serde(default, alias = "targetTeacher")]
    pub teacher: Option<String>,
    #[serde(alias = "targetWeekday", alias = "day")]
    pub weekday: i64,
    #[serde(alias = "targetStartSection")]
    pub start_section: i64,
    #[serde(alias = "targetEndSection")]
    pub end_section: i64,
    #[serde(default, alias = "weeksToRemoveExpression")]
    pub weeks_to_remove: Option<WeekSpec>,
    #[serde(default)]
    pub weeks_to_remove_mask: Option<String>,
    #[serde(default)]
    pub replacement: Option<RawReplacement>,
}

/// Complete adapter payload: fragments plus optional change records.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TimetableInput {
    #[serde(alias = "lessons")]
    pub courses: Vec<RawOccurrence>,
    #[serde(default)]
    pub changes: Vec<RawChange>,
}

/// Wire shape of an emitted canonical block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub name: String,
    pub teacher: String,
    pub location: String,
    pub weekday: u8,
    pub start_section: u32,
    pub end_section: u32,
    pub weeks: Vec<u32>,
}

impl From<&CanonicalBlock> for CourseRecord {
    fn from(block: &CanonicalBlock) -> Self {
        Self {
            name: block.course_name.clone(),
            teacher: block.teacher.clone(),
            location: block.location.clone(),
            weekday: block.weekday.get(),
            start_section: block.sections.start(),
            end_section: block.sections.end(),
            weeks: block.weeks.as_slice().to_vec(),
        }
    }
}

/// Parse an adapter payload file
pub fn parse_timetable_json(json_path: &Path) -> Result<TimetableInput> {
    let json_content = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file: {}", json_path.display()))?;

    parse_timetable_json_str(&json_content)
}

/// Parse an adapter payload from a string.
///
/// Accepts either a document `{"courses": [...], "changes": [...]}` (also
/// `"lessons"`) or a bare array of occurrence tuples.
pub fn parse_timetable_json_str(json_str: &str) -> Result<TimetableInput> {
    let json_value: serde_json::Value = serde_json::from_str(json_str).with_context(|| {
        format!("Invalid JSON syntax. First 500 chars: {}", preview(json_str))
    })?;

    match &json_value {
        serde_json::Value::Array(_) => {}
        serde_json::Value::Object(map) => {
            if !map.contains_key("courses") && !map.contains_key("lessons") {
                anyhow::bail!(
                    "JSON must contain a 'courses' or 'lessons' key. Found keys: {:?}",
                    map.keys().collect::<Vec<_>>()
                );
            }
        }
        other => anyhow::bail!("Expected a JSON object or array, found: {}", other),
    }

    if json_value.is_array() {
        let courses: Vec<RawOccurrence> = serde_path_to_error::deserialize(json_value)
            .map_err(|e| {
                anyhow::anyhow!("JSON deserialization error at '{}': {}", e.path(), e.inner())
            })?;
        return Ok(TimetableInput {
            courses,
            changes: Vec::new(),
        });
    }

    serde_path_to_error::deserialize(json_value).map_err(|e| {
        anyhow::anyhow!("JSON deserialization error at '{}': {}", e.path(), e.inner())
    })
}

/// Parse a standalone list of change tuples
pub fn parse_changes_json_str(json_str: &str) -> Result<Vec<RawChange>> {
    let mut deserializer = serde_json::Deserializer::from_str(json_str);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        anyhow::anyhow!(
            "Change list deserialization error at '{}': {}",
            e.path(),
            e.inner()
        )
    })
}

/// Serialize blocks into their wire shape
pub fn blocks_to_json(blocks: &[CanonicalBlock], pretty: bool) -> Result<String> {
    let records: Vec<CourseRecord> = blocks.iter().map(CourseRecord::from).collect();
    let json = if pretty {
        serde_json::to_string_pretty(&records)
    } else {
        serde_json::to_string(&records)
    };
    json.context("Failed to serialize canonical blocks")
}

fn preview(json_str: &str) -> String {
    if json_str.chars().count() > 500 {
        format!("{}...", json_str.chars().take(500).collect::<String>())
    } else {
        json_str.to_string()
    }
}
