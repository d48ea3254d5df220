//! Output management module
//!
//! Writes datasets back to disk verbatim and resolves output file names.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{ComboError, Result};

/// Default buffer size for file writing (8MB)
const DEFAULT_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Extension appended to output names that lack it
pub const OUTPUT_EXTENSION: &str = ".txt";

/// Buffered writer that emits lines exactly as given
pub struct OutputWriter<W: Write> {
    writer: BufWriter<W>,
    path: PathBuf,
    lines_written: u64,
    bytes_written: u64,
}

impl OutputWriter<File> {
    /// Create (or truncate) the file at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| ComboError::io(path, e))?;

        Ok(Self::from_writer(file, path))
    }
}

impl<W: Write> OutputWriter<W> {
    pub fn from_writer(inner: W, path: &Path) -> Self {
        Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, inner),
            path: path.to_path_buf(),
            lines_written: 0,
            bytes_written: 0,
        }
    }

    /// Write a line including whatever terminator it already carries
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer
            .write_all(line.as_bytes())
            .map_err(|e| ComboError::io(&self.path, e))?;
        self.lines_written += 1;
        self.bytes_written += line.len() as u64;
        Ok(())
    }

    pub fn write_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<()> {
        for line in lines {
            self.write_line(line.as_ref())?;
        }
        Ok(())
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and release the underlying writer, returning it
    pub fn finish(self) -> Result<W> {
        let path = self.path;
        self.writer
            .into_inner()
            .map_err(|e| ComboError::io(&path, e.into_error()))
    }
}

/// Write `lines` to `path`, returning the resulting file size
pub fn write_dataset<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<u64> {
    let mut writer = OutputWriter::create(path)?;
    writer.write_lines(lines)?;
    let lines_written = writer.lines_written();
    let bytes = writer.bytes_written();
    writer.finish()?;

    log::debug!("Wrote {} lines ({} bytes) to {:?}", lines_written, bytes, path);
    Ok(bytes)
}

/// Replace the contents of an existing file with `lines`
///
/// The new content goes to a temporary file next to `path` which is then
/// renamed over it, so a failure part-way leaves the original intact. A
/// symlinked `path` is resolved first; the link stays and its target is
/// rewritten.
pub fn replace_dataset<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<u64> {
    let target = fs::canonicalize(path).map_err(|e| ComboError::io(path, e))?;
    let dir = target.parent().unwrap_or_else(|| Path::new("/"));
    let permissions = fs::metadata(&target)
        .map_err(|e| ComboError::io(path, e))?
        .permissions();

    let temp = NamedTempFile::new_in(dir).map_err(|e| ComboError::io(dir, e))?;
    let mut writer = OutputWriter::from_writer(temp, path);
    writer.write_lines(lines)?;
    let bytes = writer.bytes_written();
    let temp = writer.finish()?;

    temp.as_file()
        .set_permissions(permissions)
        .map_err(|e| ComboError::io(path, e))?;
    temp.persist(&target).map_err(|e| ComboError::io(path, e.error))?;

    log::debug!("Rewrote {:?} with {} lines ({} bytes)", target, lines.len(), bytes);
    Ok(bytes)
}

/// Append `.txt` unless the name already ends with it
pub fn normalize_output_name(name: &str) -> String {
    let name = name.trim();
    if name.ends_with(OUTPUT_EXTENSION) {
        name.to_string()
    } else {
        format!("{}{}", name, OUTPUT_EXTENSION)
    }
}

/// Resolve an output name against the directory of the input file
///
/// A bare file name lands next to `input`; a name with directory
/// components is used as given.
pub fn resolve_output_path(input: &Path, name: &str) -> PathBuf {
    let name = PathBuf::from(normalize_output_name(name));
    let has_dir = name
        .parent()
        .map(|p| !p.as_os_str().is_empty())
        .unwrap_or(false);

    if has_dir || name.is_absolute() {
        return name;
    }

    match input.parent() {
        Some(parent) => parent.join(name),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_writer_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.txt");

        let mut writer = OutputWriter::create(&path).unwrap();
        writer.write_line("hello\r\n").unwrap();
        writer.write_line("world").unwrap();
        assert_eq!(writer.lines_written(), 2);
        assert_eq!(writer.bytes_written(), 12);
        writer.finish().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "hello\r\nworld");
    }

    #[test]
    fn test_write_dataset_size() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");

        let size = write_dataset(&path, &["a\n", "bb\n"]).unwrap();
        assert_eq!(size, 5);
        assert_eq!(fs::metadata(&path).unwrap().len(), 5);
    }

    #[test]
    fn test_write_dataset_unwritable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing_dir").join("out.txt");

        let err = write_dataset(&path, &["a\n"]).unwrap_err();
        assert!(matches!(err, ComboError::NotFound { .. }));
    }

    #[test]
    fn test_replace_dataset() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("source.txt");
        fs::write(&path, "old1\nold2\nold3\n").unwrap();

        let size = replace_dataset(&path, &["old3\n"]).unwrap();
        assert_eq!(size, 5);
        assert_eq!(fs::read_to_string(&path).unwrap(), "old3\n");
    }

    #[test]
    fn test_replace_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gone.txt");

        assert!(replace_dataset(&path, &["x\n"]).is_err());
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_replace_through_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.txt");
        let link = temp_dir.path().join("link.txt");
        fs::write(&target, "old\n").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        replace_dataset(&link, &["new\n"]).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&target).unwrap(), "new\n");
        assert_eq!(fs::read_to_string(&link).unwrap(), "new\n");
    }

    #[test]
    fn test_normalize_output_name() {
        assert_eq!(normalize_output_name("result"), "result.txt");
        assert_eq!(normalize_output_name(" result.txt "), "result.txt");
        assert_eq!(normalize_output_name("result.csv"), "result.csv.txt");
    }

    #[test]
    fn test_resolve_output_path() {
        let input = Path::new("/data/lists/combo.txt");
        assert_eq!(
            resolve_output_path(input, "head"),
            PathBuf::from("/data/lists/head.txt")
        );
        assert_eq!(
            resolve_output_path(input, "/tmp/out.txt"),
            PathBuf::from("/tmp/out.txt")
        );
        assert_eq!(
            resolve_output_path(input, "sub/out"),
            PathBuf::from("sub/out.txt")
        );
    }
}
