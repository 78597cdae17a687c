//! Application of schedule-change events to a normalized block list.
//!
//! Each block moves through `Active -> Active (fewer weeks) -> Removed`.
//! Removed is terminal: the block keeps its attributes so later events can
//! still match it, but it never regains weeks and is never emitted.
//! Replacement slots are appended as fresh blocks and are not merged with
//! anything that already exists.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::domain::{CanonicalBlock, ChangeEvent};

/// Lifecycle of a block during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    Active,
    Removed,
}

/// A block plus its reconciliation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedBlock {
    pub block: CanonicalBlock,
    pub state: BlockState,
}

impl TrackedBlock {
    fn active(block: CanonicalBlock) -> Self {
        Self {
            block,
            state: BlockState::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == BlockState::Active
    }
}

/// Counters describing what a reconciliation pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Matched events that removed weeks or appended a replacement
    pub applied: usize,
    /// Events that matched nothing
    pub unmatched: usize,
    pub blocks_removed: usize,
    pub blocks_added: usize,
}

/// Surviving blocks and the report of the pass that produced them.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub blocks: Vec<CanonicalBlock>,
    pub report: ReconcileReport,
}

/// Replays change events, in arrival order, over canonical blocks.
#[derive(Debug, Clone, Copy)]
pub struct ChangeReconciler {
    match_course_name: bool,
}

impl Default for ChangeReconciler {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ChangeReconciler {
    /// # Arguments
    /// * `match_course_name` - When false, a course name carried by a change
    ///   target is ignored during matching
    pub fn new(match_course_name: bool) -> Self {
        Self { match_course_name }
    }

    /// Apply `events` to `blocks`.
    ///
    /// # Arguments
    /// * `blocks` - Normalized blocks, consumed
    /// * `events` - Change events in source order
    ///
    /// # Returns
    /// Every block that still has weeks, originals first then replacements,
    /// in discovery order
    pub fn reconcile(&self, blocks: Vec<CanonicalBlock>, events: &[ChangeEvent]) -> ReconcileOutcome {
        let mut tracked: Vec<TrackedBlock> = blocks
            .into_iter()
            .filter(|b| !b.weeks.is_empty())
            .map(TrackedBlock::active)
            .collect();
        let mut report = ReconcileReport::default();

        for (index, event) in events.iter().enumerate() {
            let matched: Vec<usize> = tracked
                .iter()
                .enumerate()
                .filter(|(_, t)| event.target.matches(&t.block, self.match_course_name))
                .map(|(i, _)| i)
                .collect();

            if matched.is_empty() {
                debug!(
                    "Change event {} targets day {} sections {} but no block matches",
                    index, event.target.weekday, event.target.sections
                );
                report.unmatched += 1;
                continue;
            }
            let mut effective = false;

            if !event.weeks_to_remove.is_empty() {
                for &slot in &matched {
                    let entry = &mut tracked[slot];
                    if !entry.is_active() {
                        continue;
                    }
                    let remaining = entry.block.weeks.difference(&event.weeks_to_remove);
                    if remaining.len() == entry.block.weeks.len() {
                        continue;
                    }
                    effective = true;
                    entry.block.weeks = remaining;
                    if entry.block.weeks.is_empty() {
                        entry.state = BlockState::Removed;
                        report.blocks_removed += 1;
                        debug!("Block [{}] removed by change event {}", entry.block.identity_key(), index);
                    }
                }
            }

            if let Some(block) = self.replacement_block(event, &tracked[matched[0]].block) {
                debug!(
                    "Change event {} adds [{}] sections {} weeks {}",
                    index,
                    block.identity_key(),
                    block.sections,
                    block.weeks
                );
                tracked.push(TrackedBlock::active(block));
                report.blocks_added += 1;
                effective = true;
            }

            if effective {
                report.applied += 1;
            } else {
                debug!("Change event {} matched but changed nothing", index);
            }
        }

        let blocks = tracked
            .into_iter()
            .filter(|t| t.is_active() && !t.block.weeks.is_empty())
            .map(|t| t.block)
            .collect();

        ReconcileOutcome { blocks, report }
    }

    /// Build the block a relocation moves to, filling omitted attributes
    /// from the target and then from the first matched block.
    fn replacement_block(&self, event: &ChangeEvent, original: &CanonicalBlock) -> Option<CanonicalBlock> {
        let replacement = event.replacement.as_ref()?;
        if replacement.weeks.is_empty() {
            return None;
        }

        let course_name = event
            .target
            .course_name
            .clone()
            .unwrap_or_else(|| original.course_name.clone());
        let teacher = replacement
            .teacher
            .clone()
            .or_else(|| event.target.teacher.clone())
            .unwrap_or_else(|| original.teacher.clone());
        let location = replacement
            .location
            .clone()
            .unwrap_or_else(|| original.location.clone());

        Some(CanonicalBlock {
            course_name,
            teacher,
            location,
            weekday: replacement.weekday,
            sections: replacement.sections,
            weeks: replacement.weeks.clone(),
        })
    }
}
