//! Parsers for the loosely formatted data institution adapters hand over.
//!
//! This module turns textual week and section descriptions into typed values,
//! and reads adapter payloads from JSON.
//!
//! # Parsers
//!
//! - [`weeks`]: Week expressions (`"1-16(单)"`, `"1,3,5-9"`) and bitmasks
//! - [`sections`]: Section expressions (`"05,06"`, `"第1-2节"`)
//! - [`json_parser`]: Raw occurrence and change tuples in JSON form
//!
//! # Example
//!
//! ```no_run
//! use timetable_norm::parsing::json_parser::parse_timetable_json;
//! use std::path::Path;
//!
//! let input = parse_timetable_json(Path::new("timetable.json"))
//!     .expect("Failed to parse timetable");
//! println!("{} raw fragments", input.courses.len());
//! ```

pub mod json_parser;
pub mod sections;
pub mod weeks;

#[cfg(test)]
mod json_parser_tests;
#[cfg(test)]
mod weeks_tests;

pub use sections::parse_section_expression;
pub use weeks::{parse_week_bitmask, parse_week_expression, OddEvenFilter, WeekExpressionParser};
