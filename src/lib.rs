//! # Combo Editor
//!
//! Line-based tools for `email:password` combo lists.
//!
//! ## Features
//!
//! - **Extract**: move the first N lines of a file into a new file, leaving
//!   the rest in the source
//! - **Merge**: concatenate files in order, keeping every line
//! - **Deduplicate**: drop repeated `email:password` pairs (email compared
//!   case-insensitively) while passing other lines through
//! - **Encoding fallback**: files that are not valid UTF-8 are read as latin1
//!
//! Lines are kept byte-for-byte, terminators included.
//!
//! ## Example
//!
//! ```rust,no_run
//! use combo_editor::{deduplicate, extract, merge};
//! use std::path::{Path, PathBuf};
//!
//! # fn main() -> combo_editor::Result<()> {
//! let head = extract(Path::new("combo.txt"), 1000, Path::new("part1.txt"))?;
//! println!("{} lines left", head.remaining);
//!
//! let merged = merge(
//!     &[PathBuf::from("a.txt"), PathBuf::from("b.txt")],
//!     Path::new("merged.txt"),
//! )?;
//! println!("{} lines merged", merged.total_lines);
//!
//! let dedup = deduplicate(Path::new("merged.txt"), Path::new("clean.txt"))?;
//! println!("{} duplicates removed", dedup.duplicates_removed);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod dedup;
pub mod encoding;
pub mod error;
pub mod extract;
pub mod merge;
pub mod output;
pub mod presets;
pub mod processor;
pub mod progress;
pub mod report;

pub use dedup::{classify, dedup_lines, deduplicate, ComboKey, LineKind};
pub use encoding::{read_dataset, Dataset, TextEncoding};
pub use error::{ComboError, Result};
pub use extract::extract;
pub use merge::merge;
pub use report::{DedupResult, ExtractResult, MergeResult, SourceSummary};
