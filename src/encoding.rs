//! Line reading with encoding fallback
//!
//! Files are decoded as strict UTF-8 first. Anything that is not valid UTF-8
//! is decoded as ISO-8859-1, mapping every byte to the character with the
//! same code, so decoding cannot fail. Lines end at `\n`, `\r\n` or a lone
//! `\r`. Line content is never altered: whitespace, case, BOM and line
//! terminators survive verbatim.

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ComboError, Result};

/// Encoding that produced a dataset's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => f.write_str("UTF-8"),
            Self::Latin1 => f.write_str("latin1"),
        }
    }
}

/// Outcome of the two-step decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedText {
    /// Input was valid UTF-8
    Primary(String),
    /// Input was decoded with the single-byte fallback
    Fallback(String),
}

impl DecodedText {
    pub fn encoding(&self) -> TextEncoding {
        match self {
            Self::Primary(_) => TextEncoding::Utf8,
            Self::Fallback(_) => TextEncoding::Latin1,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Primary(s) | Self::Fallback(s) => s,
        }
    }
}

/// Decode raw bytes, falling back to ISO-8859-1 on invalid UTF-8
pub fn decode(bytes: Vec<u8>) -> DecodedText {
    match String::from_utf8(bytes) {
        Ok(text) => DecodedText::Primary(text),
        Err(e) => {
            let bytes = e.into_bytes();
            DecodedText::Fallback(encoding_rs::mem::decode_latin1(&bytes).into_owned())
        }
    }
}

/// Split text into lines, keeping terminators attached
///
/// A line ends after `\n`, after `\r\n`, or after a `\r` not followed by
/// `\n`. The final line has no terminator when the text does not end with
/// one. Empty text yields no lines.
pub fn split_lines(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;

    for end in memchr::memchr2_iter(b'\n', b'\r', bytes) {
        if bytes[end] == b'\r' && bytes.get(end + 1) == Some(&b'\n') {
            continue;
        }
        lines.push(text[start..=end].to_string());
        start = end + 1;
    }

    if start < text.len() {
        lines.push(text[start..].to_string());
    }

    lines
}

/// Ordered lines of one source file
#[derive(Debug, Clone)]
pub struct Dataset {
    path: PathBuf,
    encoding: TextEncoding,
    lines: Vec<String>,
}

impl Dataset {
    pub fn new(path: PathBuf, encoding: TextEncoding, lines: Vec<String>) -> Self {
        Self {
            path,
            encoding,
            lines,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Load a file's lines
///
/// Only I/O failures are reported; decoding always succeeds.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let bytes = fs::read(path).map_err(|e| ComboError::io(path, e))?;
    let size = bytes.len();

    let decoded = decode(bytes);
    let encoding = decoded.encoding();
    if encoding == TextEncoding::Latin1 {
        log::warn!("{:?} is not valid UTF-8, decoded as {}", path, encoding);
    }

    let lines = split_lines(&decoded.into_string());
    log::debug!("Read {} lines ({} bytes) from {:?}", lines.len(), size, path);

    Ok(Dataset::new(path.to_path_buf(), encoding, lines))
}
