//! Core domain models for timetable normalization.
//!
//! This module defines the value types shared by every stage of the engine,
//! the engine's error type, and the fingerprint used to compare results.

pub mod checksum;
pub mod domain;
pub mod error;

pub use domain::{
    CanonicalBlock, ChangeEvent, ChangeTarget, IdentityKey, OccurrenceRecord, Replacement,
    SectionRange, WeekSet, Weekday,
};
pub use error::{EngineError, EngineResult};
