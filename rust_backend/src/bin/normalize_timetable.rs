use anyhow::{Context, Result};
use std::path::PathBuf;

use timetable_norm::config::EngineConfig;
use timetable_norm::io::loaders::write_blocks;
use timetable_norm::parsing::json_parser::blocks_to_json;
use timetable_norm::preprocessing::NormalizationPipeline;

const USAGE: &str = "Usage: normalize_timetable <input.json> [output.json] [--config <file.toml>]";

struct CliArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<CliArgs> {
    let mut positional = Vec::new();
    let mut config = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config requires a file path")?;
                config = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let mut positional = positional.into_iter();
    let input = positional.next().context(USAGE)?;
    let output = positional.next();
    if positional.next().is_some() {
        anyhow::bail!("Too many arguments. {}", USAGE);
    }

    Ok(CliArgs {
        input,
        output,
        config,
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => match EngineConfig::from_default_location() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Using default configuration: {}", e);
                EngineConfig::default()
            }
        },
    };

    eprintln!("=== Timetable Normalization ===");
    eprintln!("Input file: {}", args.input.display());

    let pipeline = NormalizationPipeline::with_config(config.pipeline.clone());
    let result = pipeline.process(&args.input)?;

    let stats = &result.stats;
    eprintln!("Fragments: {} ({} with no weeks)", stats.fragments, stats.empty_week_fragments);
    eprintln!("Groups: {}", stats.groups);
    eprintln!("Compressed blocks: {}", stats.compressed_blocks);
    eprintln!(
        "Changes: {} applied, {} unmatched ({} blocks removed, {} added)",
        stats.changes_applied, stats.changes_unmatched, stats.blocks_removed, stats.blocks_added
    );
    eprintln!("Emitted blocks: {}", stats.emitted_blocks);
    eprintln!("Fingerprint: {}", result.fingerprint);
    for warning in &result.validation.warnings {
        eprintln!("Warning: {}", warning);
    }

    match &args.output {
        Some(path) => {
            write_blocks(path, &result.blocks, config.output.pretty)?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", blocks_to_json(&result.blocks, config.output.pretty)?),
    }

    Ok(())
}
