//! File merging
//!
//! Concatenates sources in argument order. Lines are neither reordered nor
//! deduplicated, and no separator is added between sources.

use std::path::{Path, PathBuf};

use crate::encoding::read_dataset;
use crate::error::{ComboError, Result};
use crate::output::write_dataset;
use crate::report::{MergeResult, SourceSummary};

/// Minimum number of sources a merge accepts
pub const MIN_SOURCES: usize = 2;

/// Concatenate `sources` into `output`
///
/// Every source is read before the output is opened, so `output` may be
/// one of the sources.
pub fn merge(sources: &[PathBuf], output: &Path) -> Result<MergeResult> {
    if sources.len() < MIN_SOURCES {
        return Err(ComboError::TooFewSources {
            given: sources.len(),
        });
    }

    let mut merged = Vec::new();
    let mut summaries = Vec::with_capacity(sources.len());

    for (i, path) in sources.iter().enumerate() {
        log::debug!("Reading file {}/{}: {:?}", i + 1, sources.len(), path);
        let dataset = read_dataset(path)?;

        summaries.push(SourceSummary {
            path: dataset.path().to_path_buf(),
            lines: dataset.len(),
            encoding: dataset.encoding(),
        });
        merged.extend(dataset.into_lines());
    }

    let output_size = write_dataset(output, &merged)?;
    log::info!(
        "Merged {} files ({} lines) into {:?}",
        sources.len(),
        merged.len(),
        output
    );

    Ok(MergeResult {
        sources: summaries,
        total_lines: merged.len(),
        output: output.to_path_buf(),
        output_size,
    })
}
