//! Command dispatch
//!
//! Turns parsed commands into core operations: resolves output names and
//! presets, runs the operation under a spinner and renders its result.

use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::{Args, Command, PresetAction};
use crate::dedup::deduplicate;
use crate::error::ComboError;
use crate::extract::extract;
use crate::merge::{merge, MIN_SOURCES};
use crate::output::resolve_output_path;
use crate::presets::Presets;
use crate::progress::{
    create_spinner, format_number, print_bullet, print_dedup_summary, print_extract_summary,
    print_header, print_info, print_merge_summary, print_success, print_warning,
};

/// Processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub presets_path: PathBuf,
    pub json: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl ProcessorConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            presets_path: args.presets.clone(),
            json: args.json,
            quiet: args.quiet,
            verbose: args.verbose,
        }
    }

    /// Human-readable output is suppressed in quiet and JSON modes
    fn silent(&self) -> bool {
        self.quiet || self.json
    }
}

/// Main processor
pub struct Processor {
    config: ProcessorConfig,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, command: &Command) -> anyhow::Result<()> {
        match command {
            Command::Extract {
                input,
                lines,
                preset,
                output,
            } => {
                let count = self.resolve_line_count(*lines, preset.as_deref())?;
                self.run_extract(input, count, output)
            }
            Command::Merge { inputs, output } => self.run_merge(inputs, output),
            Command::Dedup { input, output } => self.run_dedup(input, output),
            Command::Preset { action } => self.run_preset(action),
        }
    }

    /// Pick the extraction size from an explicit count or a named preset
    fn resolve_line_count(&self, lines: Option<usize>, preset: Option<&str>) -> anyhow::Result<usize> {
        match (lines, preset) {
            (Some(count), _) => Ok(count),
            (None, Some(name)) => {
                let presets = Presets::load(&self.config.presets_path)?;
                let count = presets.get(name).with_context(|| {
                    format!(
                        "Unknown preset '{}' in {:?}",
                        name, self.config.presets_path
                    )
                })?;
                if self.config.verbose {
                    print_info(&format!("Preset '{}': {} lines", name, format_number(count)));
                }
                Ok(count)
            }
            (None, None) => anyhow::bail!("Specify the number of lines with -n or --preset"),
        }
    }

    fn run_extract(&self, input: &Path, count: usize, output_name: &str) -> anyhow::Result<()> {
        let output = resolve_output_path(input, output_name);
        if !self.config.silent() {
            print_header(&format!("Extracting {} lines", format_number(count)));
            print_info(&format!("Source: {:?}", input));
            print_info(&format!("Output: {:?}", output));
        }

        let start = Instant::now();
        let spinner = create_spinner("Extracting...", self.config.silent());
        let result = extract(input, count, &output);
        spinner.finish_and_clear();
        let result = result.with_context(|| format!("Extract from {:?} failed", input))?;

        if self.config.json {
            print_json(&result)?;
        } else if !self.config.quiet {
            print_extract_summary(&result, start.elapsed());
        }
        Ok(())
    }

    fn run_merge(&self, inputs: &[PathBuf], output_name: &str) -> anyhow::Result<()> {
        // inputs[0] is needed to place the output
        if inputs.len() < MIN_SOURCES {
            anyhow::bail!("Need at least {} files to merge, got {}", MIN_SOURCES, inputs.len());
        }
        let output = resolve_output_path(&inputs[0], output_name);
        if !self.config.silent() {
            print_header(&format!("Merging {} files", inputs.len()));
            for input in inputs {
                print_bullet(&format!("{:?}", input));
            }
            print_info(&format!("Output: {:?}", output));
        }

        let start = Instant::now();
        let spinner = create_spinner("Merging...", self.config.silent());
        let result = merge(inputs, &output);
        spinner.finish_and_clear();
        let result = result.context("Merge failed")?;

        if self.config.json {
            print_json(&result)?;
        } else if !self.config.quiet {
            print_merge_summary(&result, start.elapsed());
        }
        Ok(())
    }

    fn run_dedup(&self, input: &Path, output_name: &str) -> anyhow::Result<()> {
        let output = resolve_output_path(input, output_name);
        if !self.config.silent() {
            print_header("Removing duplicate email:password combos");
            print_info(&format!("Source: {:?}", input));
        }

        let start = Instant::now();
        let spinner = create_spinner("Deduplicating...", self.config.silent());
        let result = deduplicate(input, &output);
        spinner.finish_and_clear();
        let result = result.with_context(|| format!("Deduplicating {:?} failed", input))?;

        if self.config.json {
            print_json(&result)?;
        } else if !self.config.quiet {
            print_dedup_summary(&result, start.elapsed());
        }
        Ok(())
    }

    fn run_preset(&self, action: &PresetAction) -> anyhow::Result<()> {
        let path = &self.config.presets_path;
        let mut presets = Presets::load(path)?;

        match action {
            PresetAction::List => {
                if self.config.json {
                    return print_json(&presets);
                }
                if presets.is_empty() {
                    print_warning(&format!("No presets saved in {:?}", path));
                    return Ok(());
                }
                print_header("Presets");
                for (i, (name, lines)) in presets.iter().enumerate() {
                    print_bullet(&format!("[{}] {}: {} lines", i + 1, name, format_number(lines)));
                }
            }
            PresetAction::Add { name, lines } => {
                let previous = presets.insert(name, *lines)?;
                presets.save(path)?;
                log::debug!("Saved {} presets to {:?}", presets.len(), path);
                if !self.config.silent() {
                    match previous {
                        Some(old) => print_success(&format!(
                            "Updated preset '{}': {} → {} lines",
                            name.trim(),
                            format_number(old),
                            format_number(*lines)
                        )),
                        None => print_success(&format!(
                            "Added preset '{}': {} lines",
                            name.trim(),
                            format_number(*lines)
                        )),
                    }
                }
            }
            PresetAction::Remove { name } => {
                if presets.remove(name).is_none() {
                    anyhow::bail!("Unknown preset '{}' in {:?}", name, path);
                }
                presets.save(path)?;
                if !self.config.silent() {
                    print_success(&format!("Removed preset '{}'", name));
                }
            }
        }
        Ok(())
    }
}

/// Process exit code for a failed run: 2 when the arguments were rejected,
/// 1 for everything else
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ComboError>() {
        Some(e) if e.is_validation() => 2,
        _ => 1,
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
