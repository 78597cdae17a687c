//! Normalization algorithms.
//!
//! This module turns validated occurrence fragments into canonical blocks and
//! replays schedule changes over them.
//!
//! # Components
//!
//! - [`grouping`]: Bucket fragments by identity key, preserving discovery order
//! - [`compression`]: Collapse each bucket into maximal section/week rectangles
//! - [`reconcile`]: Apply cancellations and relocations to the compressed blocks
//!
//! # Example
//!
//! ```
//! use timetable_norm::algorithms::{FragmentGrouper, PatternCompressor};
//! use timetable_norm::core::{OccurrenceRecord, SectionRange, WeekSet, Weekday};
//!
//! let fragments: Vec<OccurrenceRecord> = (1..=2)
//!     .map(|section| {
//!         OccurrenceRecord::new(
//!             "Calculus",
//!             "Dr. Wu",
//!             "C-3",
//!             Weekday::new(4).unwrap(),
//!             SectionRange::single(section).unwrap(),
//!             WeekSet::range(1, 16),
//!         )
//!         .unwrap()
//!     })
//!     .collect();
//!
//! let groups = FragmentGrouper::group(fragments);
//! let group = groups.iter().next().unwrap();
//! let blocks = PatternCompressor::compress_group(&group.key, &group.fragments);
//! assert_eq!(blocks.len(), 1);
//! assert_eq!(blocks[0].sections.to_string(), "1-2");
//! ```

pub mod compression;
pub mod grouping;
pub mod reconcile;


pub use compression::{contiguous_runs, CellMap, PatternCompressor};
pub use grouping::{FragmentGroup, FragmentGrouper, FragmentGroups};
pub use reconcile::{BlockState, ChangeReconciler, ReconcileOutcome, ReconcileReport, TrackedBlock};
