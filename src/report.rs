//! Result records returned by each operation

use serde::Serialize;
use std::path::PathBuf;

use crate::encoding::TextEncoding;

/// Outcome of splitting a file into head and remainder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractResult {
    pub source: PathBuf,
    pub source_encoding: TextEncoding,
    /// Lines written to the output file
    pub extracted: usize,
    /// Lines left in the rewritten source
    pub remaining: usize,
    pub output: PathBuf,
    pub output_size: u64,
    /// Size of the source after the rewrite
    pub source_size: u64,
}

/// Line count for one merged source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSummary {
    pub path: PathBuf,
    pub lines: usize,
    pub encoding: TextEncoding,
}

/// Outcome of concatenating several files
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeResult {
    pub sources: Vec<SourceSummary>,
    pub total_lines: usize,
    pub output: PathBuf,
    pub output_size: u64,
}

impl MergeResult {
    pub fn files_merged(&self) -> usize {
        self.sources.len()
    }
}

/// Outcome of removing duplicate combos
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DedupResult {
    pub source: PathBuf,
    pub source_encoding: TextEncoding,
    pub original_lines: usize,
    pub combos_total: usize,
    pub unique_combos: usize,
    pub passthrough_lines: usize,
    pub duplicates_removed: usize,
    /// Only set when duplicates were found and the output was written
    pub output: Option<PathBuf>,
    pub output_size: Option<u64>,
}

impl DedupResult {
    pub fn has_duplicates(&self) -> bool {
        self.duplicates_removed > 0
    }

    pub fn kept_lines(&self) -> usize {
        self.unique_combos + self.passthrough_lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_result_json() {
        let result = DedupResult {
            source: PathBuf::from("combo.txt"),
            source_encoding: TextEncoding::Latin1,
            original_lines: 4,
            combos_total: 3,
            unique_combos: 2,
            passthrough_lines: 1,
            duplicates_removed: 1,
            output: Some(PathBuf::from("clean.txt")),
            output_size: Some(42),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["source_encoding"], "latin1");
        assert_eq!(json["duplicates_removed"], 1);
        assert_eq!(json["output"], "clean.txt");
        assert_eq!(result.kept_lines(), 3);
        assert!(result.has_duplicates());
    }

    #[test]
    fn test_merge_result_counts() {
        let result = MergeResult {
            sources: vec![
                SourceSummary {
                    path: PathBuf::from("a.txt"),
                    lines: 5,
                    encoding: TextEncoding::Utf8,
                },
                SourceSummary {
                    path: PathBuf::from("b.txt"),
                    lines: 7,
                    encoding: TextEncoding::Utf8,
                },
            ],
            total_lines: 12,
            output: PathBuf::from("merged.txt"),
            output_size: 100,
        };

        assert_eq!(result.files_merged(), 2);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["sources"][1]["encoding"], "utf8");
    }
}
