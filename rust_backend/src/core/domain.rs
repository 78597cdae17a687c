//! Domain models for timetable fragments, canonical blocks and change events.
//!
//! This module provides the value types the engine passes between its stages:
//! week sets, section ranges, raw occurrence fragments, the compressed
//! canonical blocks they collapse into, and the change events reconciled
//! against those blocks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::core::error::{EngineError, EngineResult};

/// Ordered, duplicate-free set of 1-based week-of-term numbers.
///
/// Every constructor sorts, deduplicates and discards week `0`, so the inner
/// list is always strictly increasing with all values `>= 1`. No upper bound
/// is enforced; institutions report terms anywhere from 16 to 24+ weeks.
///
/// # Examples
///
/// ```
/// use timetable_norm::core::domain::WeekSet;
///
/// let weeks = WeekSet::from_weeks([5, 1, 3, 3, 0]);
/// assert_eq!(weeks.as_slice(), &[1, 3, 5]);
/// assert!(weeks.contains(3));
/// assert_eq!(weeks.to_string(), "1,3,5");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<u32>", into = "Vec<u32>")]
pub struct WeekSet(Vec<u32>);

impl WeekSet {
    /// Creates an empty week set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a week set from any sequence of week numbers.
    pub fn from_weeks<I: IntoIterator<Item = u32>>(weeks: I) -> Self {
        let mut weeks: Vec<u32> = weeks.into_iter().filter(|&w| w >= 1).collect();
        weeks.sort_unstable();
        weeks.dedup();
        Self(weeks)
    }

    /// Builds the inclusive range `start..=end`. Empty when `start > end`.
    pub fn range(start: u32, end: u32) -> Self {
        Self::from_weeks(start..=end)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, week: u32) -> bool {
        self.0.binary_search(&week).is_ok()
    }

    /// Weeks in `self` that are not in `other`, order preserved.
    pub fn difference(&self, other: &WeekSet) -> WeekSet {
        Self(self.iter().filter(|&w| !other.contains(w)).collect())
    }

}

impl From<Vec<u32>> for WeekSet {
    fn from(weeks: Vec<u32>) -> Self {
        Self::from_weeks(weeks)
    }
}

impl From<WeekSet> for Vec<u32> {
    fn from(weeks: WeekSet) -> Self {
        weeks.0
    }
}

impl FromIterator<u32> for WeekSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self::from_weeks(iter)
    }
}

/// Compact form: consecutive runs of three or more weeks print as `a-b`.
impl fmt::Display for WeekSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        let mut i = 0;
        while i < self.0.len() {
            let start = self.0[i];
            let mut j = i;
            while j + 1 < self.0.len() && self.0[j + 1] == self.0[j] + 1 {
                j += 1;
            }
            let end = self.0[j];
            match j - i {
                0 => parts.push(start.to_string()),
                1 => {
                    parts.push(start.to_string());
                    parts.push(end.to_string());
                }
                _ => parts.push(format!("{}-{}", start, end)),
            }
            i = j + 1;
        }
        write!(f, "{}", parts.join(","))
    }
}

/// Day of the week, 1 (Monday) through 7 (Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Weekday(u8);

impl Weekday {
    /// Validates `day` against `1..=7`.
    ///
    /// A weekday outside that range is an adapter bug, not data noise, so
    /// it is reported as [`EngineError::InvalidWeekday`].
    pub fn new(day: i64) -> EngineResult<Self> {
        if (1..=7).contains(&day) {
            Ok(Self(day as u8))
        } else {
            Err(EngineError::InvalidWeekday(day))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Weekday {
    type Error = EngineError;

    fn try_from(day: i64) -> Result<Self, Self::Error> {
        Self::new(day)
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        day.0
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Highest class-period index accepted. Real timetables stop around 14.
pub const MAX_SECTION: u32 = 64;

/// Inclusive range of 1-based class-period indices with
/// `1 <= start <= end <= MAX_SECTION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionRange {
    start: u32,
    end: u32,
}

impl SectionRange {
    /// Returns `None` for `start > end`, a zero start or an end past
    /// [`MAX_SECTION`]; such ranges are structurally invalid and their
    /// fragments get discarded.
    pub fn new(start: u32, end: u32) -> Option<Self> {
        if start == 0 || start > end || end > MAX_SECTION {
            None
        } else {
            Some(Self { start, end })
        }
    }

    /// A single-period range `section..=section`.
    pub fn single(section: u32) -> Option<Self> {
        Self::new(section, section)
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn contains(&self, section: u32) -> bool {
        (self.start..=self.end).contains(&section)
    }

    pub fn sections(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

impl fmt::Display for SectionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Grouping key for fragments: two fragments with equal keys describe the
/// same course meeting on the same day and are compressed together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    pub course_name: String,
    pub teacher: String,
    pub location: String,
    pub weekday: Weekday,
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | day {}",
            self.course_name, self.teacher, self.location, self.weekday
        )
    }
}

/// One raw course meeting fragment as extracted by an institution adapter.
///
/// Fragments are frequently redundant: source tables often list one row per
/// period, or repeat the same meeting under several week expressions.
///
/// # Examples
///
/// ```
/// use timetable_norm::core::domain::{OccurrenceRecord, SectionRange, WeekSet, Weekday};
///
/// let record = OccurrenceRecord::new(
///     "Linear Algebra",
///     "Dr. Chen",
///     "A-101",
///     Weekday::new(2).unwrap(),
///     SectionRange::new(1, 2).unwrap(),
///     WeekSet::range(1, 16),
/// )
/// .unwrap();
/// assert_eq!(record.identity_key().course_name, "Linear Algebra");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceRecord {
    pub course_name: String,
    pub teacher: String,
    pub location: String,
    pub weekday: Weekday,
    pub sections: SectionRange,
    pub weeks: WeekSet,
}

impl OccurrenceRecord {
    /// Creates a fragment, rejecting a blank course name.
    pub fn new(
        course_name: impl Into<String>,
        teacher: impl Into<String>,
        location: impl Into<String>,
        weekday: Weekday,
        sections: SectionRange,
        weeks: WeekSet,
    ) -> EngineResult<Self> {
        let course_name = course_name.into();
        if course_name.trim().is_empty() {
            return Err(EngineError::EmptyCourseName);
        }
        Ok(Self {
            course_name,
            teacher: teacher.into(),
            location: location.into(),
            weekday,
            sections,
            weeks,
        })
    }

    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            course_name: self.course_name.clone(),
            teacher: self.teacher.clone(),
            location: self.location.clone(),
            weekday: self.weekday,
        }
    }
}

/// A maximal, non-redundant recurring meeting emitted by the engine.
///
/// For every week in `weeks` the occupied periods of this identity are
/// exactly `sections`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalBlock {
    pub course_name: String,
    pub teacher: String,
    pub location: String,
    pub weekday: Weekday,
    pub sections: SectionRange,
    pub weeks: WeekSet,
}

impl CanonicalBlock {
    pub fn from_key(key: &IdentityKey, sections: SectionRange, weeks: WeekSet) -> Self {
        Self {
            course_name: key.course_name.clone(),
            teacher: key.teacher.clone(),
            location: key.location.clone(),
            weekday: key.weekday,
            sections,
            weeks,
        }
    }

    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            course_name: self.course_name.clone(),
            teacher: self.teacher.clone(),
            location: self.location.clone(),
            weekday: self.weekday,
        }
    }

    /// Every occupied `(week, section)` cell of this block.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.weeks
            .iter()
            .flat_map(move |w| self.sections.sections().map(move |s| (w, s)))
    }
}

/// Feeding blocks back in as fragments is how re-normalization is expressed.
impl From<CanonicalBlock> for OccurrenceRecord {
    fn from(block: CanonicalBlock) -> Self {
        Self {
            course_name: block.course_name,
            teacher: block.teacher,
            location: block.location,
            weekday: block.weekday,
            sections: block.sections,
            weeks: block.weeks,
        }
    }
}

/// The original time slot a change event refers to.
///
/// `course_name` and `teacher` narrow the match when present; weekday and
/// the exact original section range always have to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeTarget {
    pub course_name: Option<String>,
    pub teacher: Option<String>,
    pub weekday: Weekday,
    pub sections: SectionRange,
}

impl ChangeTarget {
    pub fn matches(&self, block: &CanonicalBlock, match_course_name: bool) -> bool {
        if block.weekday != self.weekday || block.sections != self.sections {
            return false;
        }
        if let Some(teacher) = &self.teacher {
            if teacher != &block.teacher {
                return false;
            }
        }
        if match_course_name {
            if let Some(name) = &self.course_name {
                if name != &block.course_name {
                    return false;
                }
            }
        }
        true
    }
}

/// New slot a relocated or rescheduled meeting moves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub weekday: Weekday,
    pub sections: SectionRange,
    pub weeks: WeekSet,
    pub location: Option<String>,
    pub teacher: Option<String>,
}

/// One cancellation, relocation or rescheduling record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub target: ChangeTarget,
    pub weeks_to_remove: WeekSet,
    pub replacement: Option<Replacement>,
}
