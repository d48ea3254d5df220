//! Combo deduplication
//!
//! A line is a combo when the text before its first `:` looks like an email
//! (contains both `@` and `.`). Combos are keyed on the lower-cased email and
//! the case-preserved password, both trimmed; only the first line per key is
//! kept. Every other line passes through untouched and is never counted as a
//! duplicate.

use ahash::RandomState;
use hashbrown::HashSet;
use std::path::Path;

use crate::encoding::read_dataset;
use crate::error::Result;
use crate::output::write_dataset;
use crate::report::DedupResult;

/// Uniqueness key of a combo line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComboKey {
    pub email: String,
    pub password: String,
}

impl ComboKey {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password: password.trim().to_string(),
        }
    }
}

/// How a single line is treated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Combo(ComboKey),
    Passthrough,
}

/// Classify a line, ignoring its terminator (`\r\n`, `\n` or `\r`)
pub fn classify(line: &str) -> LineKind {
    let raw = line
        .strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line);

    let Some((email, password)) = raw.split_once(':') else {
        return LineKind::Passthrough;
    };

    let email = email.trim();
    if email.contains('@') && email.contains('.') {
        LineKind::Combo(ComboKey::new(email, password))
    } else {
        LineKind::Passthrough
    }
}

/// Counters for one deduplication pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DedupStats {
    pub combos_total: usize,
    pub unique_combos: usize,
    pub duplicates_removed: usize,
    pub passthrough_lines: usize,
}

impl DedupStats {
    pub fn total_lines(&self) -> usize {
        self.combos_total + self.passthrough_lines
    }
}

/// Set of combo keys seen so far
pub struct ComboSet {
    seen: HashSet<ComboKey, RandomState>,
}

impl ComboSet {
    pub fn new() -> Self {
        Self {
            seen: HashSet::with_hasher(RandomState::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Record a key, returning true if it was not seen before
    pub fn insert(&mut self, key: ComboKey) -> bool {
        self.seen.insert(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }
}

impl Default for ComboSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Lines kept by a deduplication pass, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupOutcome<'a> {
    pub kept: Vec<&'a str>,
    pub stats: DedupStats,
}

/// Filter `lines`, keeping passthrough lines and the first line per combo key
pub fn dedup_lines<S: AsRef<str>>(lines: &[S]) -> DedupOutcome<'_> {
    let mut seen = ComboSet::with_capacity(lines.len());
    let mut kept = Vec::with_capacity(lines.len());
    let mut stats = DedupStats::default();

    for line in lines {
        let line = line.as_ref();
        match classify(line) {
            LineKind::Combo(key) => {
                stats.combos_total += 1;
                if seen.insert(key) {
                    kept.push(line);
                } else {
                    stats.duplicates_removed += 1;
                }
            }
            LineKind::Passthrough => {
                stats.passthrough_lines += 1;
                kept.push(line);
            }
        }
    }

    stats.unique_combos = seen.len();
    DedupOutcome { kept, stats }
}

/// Deduplicate `source`, writing the result to `output` only if anything
/// was removed
pub fn deduplicate(source: &Path, output: &Path) -> Result<DedupResult> {
    let dataset = read_dataset(source)?;
    let outcome = dedup_lines(dataset.lines());
    let stats = outcome.stats;
    debug_assert_eq!(stats.total_lines(), dataset.len());

    log::debug!(
        "{:?}: {} lines, {} combos, {} unique, {} duplicates, {} passthrough",
        source,
        stats.total_lines(),
        stats.combos_total,
        stats.unique_combos,
        stats.duplicates_removed,
        stats.passthrough_lines
    );

    let (written, output_size) = if stats.duplicates_removed > 0 {
        let size = write_dataset(output, &outcome.kept)?;
        log::info!(
            "Removed {} duplicate combos from {:?} into {:?}",
            stats.duplicates_removed,
            source,
            output
        );
        (Some(output.to_path_buf()), Some(size))
    } else {
        log::info!("No duplicate combos in {:?}, nothing written", source);
        (None, None)
    };

    Ok(DedupResult {
        source: source.to_path_buf(),
        source_encoding: dataset.encoding(),
        original_lines: dataset.len(),
        combos_total: stats.combos_total,
        unique_combos: stats.unique_combos,
        passthrough_lines: stats.passthrough_lines,
        duplicates_removed: stats.duplicates_removed,
        output: written,
        output_size,
    })
}
