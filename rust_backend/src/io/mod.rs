//! File loading and writing utilities.
//!
//! This module wraps the JSON parsers with format detection and error context
//! so callers can go from a path to adapter tuples, and from canonical blocks
//! back to a file.
//!
//! # Example
//!
//! ```no_run
//! use timetable_norm::io::loaders::TimetableLoader;
//! use std::path::Path;
//!
//! let input = TimetableLoader::load_from_file(Path::new("timetable.json"))
//!     .expect("Failed to load");
//! println!("Loaded {} fragments", input.courses.len());
//! ```

pub mod loaders;

#[cfg(test)]
mod loaders_tests;

pub use loaders::{write_blocks, TimetableLoader};
