pub mod pipeline;
pub mod validator;

pub use pipeline::{
    normalize_timetable, NormalizationPipeline, PipelineConfig, PipelineResult, PipelineStats,
};
pub use validator::{FragmentValidator, ValidationResult, ValidationStats};
