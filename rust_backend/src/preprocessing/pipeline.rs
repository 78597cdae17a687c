use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::algorithms::compression::PatternCompressor;
use crate::algorithms::grouping::FragmentGrouper;
use crate::algorithms::reconcile::ChangeReconciler;
use crate::core::checksum::fingerprint_blocks;
use crate::core::domain::{CanonicalBlock, ChangeEvent, OccurrenceRecord};
use crate::core::error::EngineResult;
use crate::io::loaders::TimetableLoader;
use crate::parsing::json_parser::{parse_timetable_json_str, TimetableInput};
use crate::preprocessing::validator::{FragmentValidator, ValidationResult};

/// Configuration for the normalization pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Apply change events after compression
    pub reconcile: bool,
    /// Require a change target's course name, when given, to match
    pub match_course_name: bool,
    pub teacher_placeholder: String,
    pub location_placeholder: String,
    /// Trim text and collapse inner whitespace runs before keys are formed
    pub collapse_whitespace: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reconcile: true,
            match_course_name: true,
            teacher_placeholder: "unknown".to_string(),
            location_placeholder: "unspecified".to_string(),
            collapse_whitespace: true,
        }
    }
}

/// Counters describing one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    pub fragments: usize,
    pub empty_week_fragments: usize,
    pub groups: usize,
    pub compressed_blocks: usize,
    pub changes_applied: usize,
    pub changes_unmatched: usize,
    pub blocks_removed: usize,
    pub blocks_added: usize,
    pub emitted_blocks: usize,
}

/// Result of a normalization run
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub blocks: Vec<CanonicalBlock>,
    pub stats: PipelineStats,
    pub validation: ValidationResult,
    /// SHA-256 over the emitted blocks
    pub fingerprint: String,
}

/// Fragments → groups → compressed blocks → reconciled blocks.
pub struct NormalizationPipeline {
    config: PipelineConfig,
}

impl NormalizationPipeline {
    /// Create a new pipeline with default configuration
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Normalize already validated fragments and apply `changes`.
    ///
    /// Pure and deterministic: identical inputs give identical output, and
    /// feeding the output back in as fragments (with no changes) returns it
    /// unchanged.
    ///
    /// # Arguments
    /// * `fragments` - Occurrence records in source order
    /// * `changes` - Change events in source order; ignored when
    ///   reconciliation is disabled
    ///
    /// # Returns
    /// PipelineResult with the emitted blocks, counters and fingerprint
    pub fn run(&self, fragments: Vec<OccurrenceRecord>, changes: &[ChangeEvent]) -> PipelineResult {
        let mut stats = PipelineStats {
            fragments: fragments.len(),
            empty_week_fragments: fragments.iter().filter(|f| f.weeks.is_empty()).count(),
            ..Default::default()
        };

        // Step 1: Group by identity key
        let groups = FragmentGrouper::group(fragments);
        stats.groups = groups.len();

        // Step 2: Compress each group, concatenated in group-discovery order
        let mut blocks: Vec<CanonicalBlock> = groups
            .iter()
            .flat_map(|group| PatternCompressor::compress_group(&group.key, &group.fragments))
            .collect();
        stats.compressed_blocks = blocks.len();

        // Step 3: Reconcile
        if self.config.reconcile && !changes.is_empty() {
            let outcome = ChangeReconciler::new(self.config.match_course_name).reconcile(blocks, changes);
            stats.changes_applied = outcome.report.applied;
            stats.changes_unmatched = outcome.report.unmatched;
            stats.blocks_removed = outcome.report.blocks_removed;
            stats.blocks_added = outcome.report.blocks_added;
            blocks = outcome.blocks;
        }

        // Step 4: Nothing with an empty week set is ever emitted
        blocks.retain(|b| !b.weeks.is_empty());
        stats.emitted_blocks = blocks.len();

        info!(
            "Normalized {} fragment(s) in {} group(s) into {} block(s) ({} change(s) applied, {} unmatched)",
            stats.fragments,
            stats.groups,
            stats.emitted_blocks,
            stats.changes_applied,
            stats.changes_unmatched
        );

        let fingerprint = fingerprint_blocks(&blocks);
        PipelineResult {
            blocks,
            stats,
            validation: ValidationResult::new(),
            fingerprint,
        }
    }

    /// Validate raw adapter tuples, then normalize them.
    pub fn run_raw(&self, input: &TimetableInput) -> EngineResult<PipelineResult> {
        let validator = FragmentValidator::new(&self.config);
        let mut validation = ValidationResult::new();

        let fragments = validator.validate_fragments(&input.courses, &mut validation)?;
        let changes = validator.validate_changes(&input.changes, &mut validation)?;

        let mut result = self.run(fragments, &changes);
        result.validation = validation;
        Ok(result)
    }

    /// Process from JSON string (useful for testing or adapter hand-off)
    pub fn process_json_str(&self, json_str: &str) -> Result<PipelineResult> {
        let input = parse_timetable_json_str(json_str).context("Failed to parse timetable JSON")?;
        self.run_raw(&input).context("Failed to validate timetable input")
    }

    /// Process a timetable JSON file
    ///
    /// # Arguments
    /// * `input_path` - Path to an adapter payload (`.json`)
    pub fn process(&self, input_path: &Path) -> Result<PipelineResult> {
        let input = TimetableLoader::load_from_file(input_path)?;
        self.run_raw(&input)
            .with_context(|| format!("Invalid timetable input in {}", input_path.display()))
    }
}

impl Default for NormalizationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to normalize a timetable file
pub fn normalize_timetable(input_path: &Path, config: PipelineConfig) -> Result<PipelineResult> {
    NormalizationPipeline::with_config(config).process(input_path)
}
