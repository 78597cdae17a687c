use anyhow::{Context, Result};
use std::path::Path;

use crate::core::domain::CanonicalBlock;
use crate::parsing::json_parser::{self, RawChange, TimetableInput};

/// Loads adapter payloads from disk
pub struct TimetableLoader;

impl TimetableLoader {
    /// Load a timetable payload, checking the file extension first
    pub fn load_from_file(path: &Path) -> Result<TimetableInput> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .context("File has no extension")?;

        match extension.to_lowercase().as_str() {
            "json" => Self::load_from_json(path),
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        }
    }

    pub fn load_from_json(json_path: &Path) -> Result<TimetableInput> {
        json_parser::parse_timetable_json(json_path).context("Failed to parse JSON file")
    }

    pub fn load_from_json_str(json_str: &str) -> Result<TimetableInput> {
        json_parser::parse_timetable_json_str(json_str).context("Failed to parse JSON string")
    }

    /// Load a change list kept in its own file
    pub fn load_changes_from_file(path: &Path) -> Result<Vec<RawChange>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read change file: {}", path.display()))?;
        json_parser::parse_changes_json_str(&content)
            .with_context(|| format!("Failed to parse change file: {}", path.display()))
    }
}

/// Write emitted blocks as JSON, indented when `pretty` is set
pub fn write_blocks(path: &Path, blocks: &[CanonicalBlock], pretty: bool) -> Result<()> {
    let json = json_parser::blocks_to_json(blocks, pretty)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}
