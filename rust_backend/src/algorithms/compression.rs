//! Rectangle compression of occurrence fragments.
//!
//! All fragments of one identity key are first expanded into a
//! `week -> {section}` cell map. Each week's sections are then split into
//! maximal contiguous runs, and weeks sharing an identical run are gathered
//! into a single block. Runs separated by a gap are never joined, so a
//! morning and an afternoon meeting on the same day stay separate blocks.
//!
//! The output covers exactly the cells implied by the input: nothing is
//! gained or lost.

use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::core::domain::{CanonicalBlock, IdentityKey, OccurrenceRecord, SectionRange, WeekSet};

/// Occupied sections per week for one identity key.
pub type CellMap = BTreeMap<u32, BTreeSet<u32>>;

/// Two-phase compressor: cell expansion, then rectangle reconstruction.
pub struct PatternCompressor;

impl PatternCompressor {
    /// Compress one identity group into canonical blocks.
    pub fn compress_group(key: &IdentityKey, fragments: &[OccurrenceRecord]) -> Vec<CanonicalBlock> {
        let blocks: Vec<CanonicalBlock> = Self::compress(fragments)
            .into_iter()
            .map(|(sections, weeks)| CanonicalBlock::from_key(key, sections, weeks))
            .collect();
        debug!(
            "Compressed {} fragment(s) of [{}] into {} block(s)",
            fragments.len(),
            key,
            blocks.len()
        );
        blocks
    }

    /// Compress fragments into `(section range, weeks)` rectangles.
    ///
    /// Rectangles come out in first-discovery order while scanning weeks
    /// ascending and, within a week, runs ascending.
    pub fn compress(fragments: &[OccurrenceRecord]) -> Vec<(SectionRange, WeekSet)> {
        Self::reconstruct(&Self::expand_cells(fragments))
    }

    /// Phase 1: mark every `(week, section)` cell any fragment occupies.
    pub fn expand_cells(fragments: &[OccurrenceRecord]) -> CellMap {
        let mut cells = CellMap::new();
        for fragment in fragments {
            for week in fragment.weeks.iter() {
                cells
                    .entry(week)
                    .or_default()
                    .extend(fragment.sections.sections());
            }
        }
        cells
    }

    /// Phase 2: split each week into contiguous runs and merge weeks that
    /// share an identical run.
    pub fn reconstruct(cells: &CellMap) -> Vec<(SectionRange, WeekSet)> {
        let mut patterns: Vec<(SectionRange, Vec<u32>)> = Vec::new();
        let mut slots: HashMap<SectionRange, usize> = HashMap::new();

        for (&week, sections) in cells {
            for run in contiguous_runs(sections) {
                match slots.get(&run) {
                    Some(&slot) => patterns[slot].1.push(week),
                    None => {
                        slots.insert(run, patterns.len());
                        patterns.push((run, vec![week]));
                    }
                }
            }
        }

        patterns
            .into_iter()
            .map(|(run, weeks)| (run, WeekSet::from_weeks(weeks)))
            .collect()
    }
}

/// Maximal runs of consecutive section numbers, ascending.
///
/// A run ends when the next section is not `current + 1`.
pub fn contiguous_runs(sections: &BTreeSet<u32>) -> Vec<SectionRange> {
    let mut runs = Vec::new();
    let mut iter = sections.iter().copied().filter(|&s| s >= 1);

    let Some(first) = iter.next() else {
        return runs;
    };
    let (mut start, mut prev) = (first, first);

    for section in iter {
        if section != prev + 1 {
            runs.extend(SectionRange::new(start, prev));
            start = section;
        }
        prev = section;
    }
    runs.extend(SectionRange::new(start, prev));
    runs
}
