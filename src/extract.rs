//! Head extraction
//!
//! Moves the first `n` lines of a file into a new file and leaves the rest
//! in the source. The head is written first; the source is only replaced
//! once that write has succeeded.

use std::path::Path;

use crate::encoding::read_dataset;
use crate::error::{ComboError, Result};
use crate::output::{replace_dataset, write_dataset};
use crate::report::ExtractResult;

/// Split `lines` into `(head, tail)` at `n`
///
/// `n` must lie in `1..=lines.len()`.
pub fn split_at<S>(lines: &[S], n: usize) -> Result<(&[S], &[S])> {
    if n == 0 {
        return Err(ComboError::ZeroLineCount);
    }
    if n > lines.len() {
        return Err(ComboError::InvalidLineCount {
            requested: n,
            available: lines.len(),
        });
    }
    Ok(lines.split_at(n))
}

/// Move the first `n` lines of `source` into `output`
pub fn extract(source: &Path, n: usize, output: &Path) -> Result<ExtractResult> {
    if n == 0 {
        return Err(ComboError::ZeroLineCount);
    }
    if same_file(source, output) {
        return Err(ComboError::OutputIsSource {
            path: output.to_path_buf(),
        });
    }

    let dataset = read_dataset(source)?;
    let (head, tail) = split_at(dataset.lines(), n)?;

    let output_size = write_dataset(output, head)?;
    let source_size = replace_dataset(source, tail)?;

    log::info!(
        "Extracted {} lines from {:?} into {:?}, {} remaining",
        head.len(),
        source,
        output,
        tail.len()
    );

    Ok(ExtractResult {
        source: source.to_path_buf(),
        source_encoding: dataset.encoding(),
        extracted: head.len(),
        remaining: tail.len(),
        output: output.to_path_buf(),
        output_size,
        source_size,
    })
}

/// True when both paths name the same file
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
