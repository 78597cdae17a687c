//! Error types for the normalization engine.
//!
//! Only caller contract violations surface as errors. Noisy institutional data
//! (malformed week tokens, inverted section ranges, unmatched change events) is
//! tolerated and reported through statistics and warnings instead.

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Error type for engine operations
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid weekday {0}: expected a value in 1..=7")]
    InvalidWeekday(i64),

    #[error("Course name is missing or blank")]
    EmptyCourseName,

    #[error("Fragment at index {index}: {source}")]
    InvalidFragment {
        index: usize,
        #[source]
        source: Box<EngineError>,
    },

    #[error("Change event at index {index}: {source}")]
    InvalidChange {
        index: usize,
        #[source]
        source: Box<EngineError>,
    },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl EngineError {
    /// Attach the position of the offending fragment in its input batch.
    pub fn at_fragment(self, index: usize) -> Self {
        EngineError::InvalidFragment {
            index,
            source: Box::new(self),
        }
    }

    /// Attach the position of the offending change event in its input batch.
    pub fn at_change(self, index: usize) -> Self {
        EngineError::InvalidChange {
            index,
            source: Box::new(self),
        }
    }
}
