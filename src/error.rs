//! Error types for combo list operations

use std::io;
use std::path::{Path, PathBuf};

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, ComboError>;

/// Errors returned at the boundary of every operation
#[derive(Debug, thiserror::Error)]
pub enum ComboError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Line count must be positive")]
    ZeroLineCount,

    #[error("Invalid line count {requested}: must be between 1 and {available}")]
    InvalidLineCount { requested: usize, available: usize },

    #[error("Need at least 2 files to merge, got {given}")]
    TooFewSources { given: usize },

    #[error("Output path is the same as the source: {}", path.display())]
    OutputIsSource { path: PathBuf },
}

impl ComboError {
    /// Wrap an I/O error, mapping `NotFound` to its own variant
    pub fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// True for errors raised by argument validation rather than I/O
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ZeroLineCount
                | Self::InvalidLineCount { .. }
                | Self::TooFewSources { .. }
                | Self::OutputIsSource { .. }
        )
    }
}
