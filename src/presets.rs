//! Named line-count presets for extraction
//!
//! Stored as a flat JSON object mapping preset name to line count. The file
//! location is always passed in explicitly.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default presets file, relative to the working directory
pub const DEFAULT_PRESETS_FILE: &str = "presets.json";

/// Collection of named extraction sizes
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Presets {
    entries: BTreeMap<String, usize>,
}

impl Presets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load presets, treating a missing file as empty
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::debug!("No presets file at {:?}", path);
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read presets file {:?}", path))?;
        let presets: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid presets file {:?}", path))?;

        log::debug!("Loaded {} presets from {:?}", presets.len(), path);
        Ok(presets)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write presets file {:?}", path))?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.entries.get(name).copied()
    }

    /// Add or replace a preset, returning the previous count
    pub fn insert(&mut self, name: &str, lines: usize) -> anyhow::Result<Option<usize>> {
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("Preset name must not be empty");
        }
        if lines == 0 {
            anyhow::bail!("Preset '{}' must extract at least 1 line", name);
        }
        Ok(self.entries.insert(name.to_string(), lines))
    }

    pub fn remove(&mut self, name: &str) -> Option<usize> {
        self.entries.remove(name)
    }

    /// Presets in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, &lines)| (name.as_str(), lines))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let presets = Presets::load(&temp_dir.path().join(DEFAULT_PRESETS_FILE)).unwrap();
        assert!(presets.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_PRESETS_FILE);

        let mut presets = Presets::new();
        presets.insert("small", 1000).unwrap();
        presets.insert("large", 50_000).unwrap();
        presets.save(&path).unwrap();

        let loaded = Presets::load(&path).unwrap();
        assert_eq!(loaded, presets);
        assert_eq!(loaded.get("large"), Some(50_000));
        assert_eq!(
            loaded.iter().collect::<Vec<_>>(),
            vec![("large", 50_000), ("small", 1000)]
        );
    }

    #[test]
    fn test_reads_plain_object() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_PRESETS_FILE);
        fs::write(&path, r#"{"10k": 10000, "1k": 1000}"#).unwrap();

        let presets = Presets::load(&path).unwrap();
        assert_eq!(presets.get("10k"), Some(10000));
        assert_eq!(presets.len(), 2);
    }

    #[test]
    fn test_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_PRESETS_FILE);
        fs::write(&path, "not json").unwrap();

        assert!(Presets::load(&path).is_err());
    }

    #[test]
    fn test_insert_validation() {
        let mut presets = Presets::new();
        assert!(presets.insert("zero", 0).is_err());
        assert!(presets.insert("  ", 5).is_err());
        assert_eq!(presets.insert("five", 5).unwrap(), None);
        assert_eq!(presets.insert("five", 6).unwrap(), Some(5));
        assert_eq!(presets.remove("five"), Some(6));
        assert!(presets.is_empty());
    }
}
