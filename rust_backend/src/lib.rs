//! Timetable normalization and reconciliation engine.
//!
//! Institution adapters scrape noisy, redundant schedule fragments from
//! campus portals. This crate turns those fragments into a minimal set of
//! canonical recurring blocks and replays schedule changes (cancellations,
//! relocations, rescheduling) over them.
//!
//! Data flow:
//!
//! ```text
//! adapter JSON -> parsing -> preprocessing::validator -> algorithms::grouping
//!     -> algorithms::compression -> algorithms::reconcile -> emitted blocks
//! ```
//!
//! # Example
//!
//! ```
//! use timetable_norm::preprocessing::NormalizationPipeline;
//!
//! let json = r#"{"courses": [
//!     {"name": "Optics", "weekday": 2, "startSection": 1, "endSection": 1, "weeks": "1-16"},
//!     {"name": "Optics", "weekday": 2, "startSection": 2, "endSection": 2, "weeks": "1-16"}
//! ]}"#;
//!
//! let result = NormalizationPipeline::new().process_json_str(json).unwrap();
//! assert_eq!(result.blocks.len(), 1);
//! assert_eq!(result.blocks[0].sections.to_string(), "1-2");
//! ```

pub mod algorithms;
pub mod config;
pub mod core;
pub mod io;
pub mod parsing;
pub mod preprocessing;
