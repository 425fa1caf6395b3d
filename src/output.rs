//! Output management module
//!
//! Handles writing lines to output files with buffering, and the fixed set of
//! per-length bucket files.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::filter::{BUCKET_COUNT, MIN_WORD_LEN};

/// Default buffer size for file writing (1MB)
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Appended to the input path to name the cleaned list
pub const CLEANED_SUFFIX: &str = "-cleaned";

/// Appended to the input path to name the bucket directory
pub const SEPARATED_SUFFIX: &str = "-seperated";

/// Destination for output lines.
///
/// Lines are passed without terminator; every sink writes a single `\n`
/// after each one. `write_raw` passes bytes through untouched.
pub trait LineSink {
    fn write_line(&mut self, content: &[u8]) -> Result<()>;

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl LineSink for Vec<u8> {
    fn write_line(&mut self, content: &[u8]) -> Result<()> {
        self.extend_from_slice(content);
        self.push(b'\n');
        Ok(())
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Output file writer with buffering
pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines_written: u64,
    bytes_written: u64,
}

impl OutputWriter {
    /// Create (or truncate) an output file
    pub fn create(path: PathBuf, buffer_size: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| Error::CreateOutput {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            writer: BufWriter::with_capacity(buffer_size, file),
            path,
            lines_written: 0,
            bytes_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    fn write_error(&self, source: std::io::Error) -> Error {
        Error::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl LineSink for OutputWriter {
    fn write_line(&mut self, content: &[u8]) -> Result<()> {
        self.writer
            .write_all(content)
            .and_then(|()| self.writer.write_all(b"\n"))
            .map_err(|e| self.write_error(e))?;
        self.lines_written += 1;
        self.bytes_written += content.len() as u64 + 1;
        Ok(())
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer
            .write_all(bytes)
            .map_err(|e| self.write_error(e))?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| self.write_error(e))
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// One sink per word length, `MIN_WORD_LEN..=MAX_WORD_LEN`
pub struct BucketSet<S: LineSink> {
    sinks: Vec<S>,
}

impl BucketSet<OutputWriter> {
    /// Create every bucket file in `dir` up front, including the ones that
    /// will stay empty
    pub fn create(dir: &Path, buffer_size: usize) -> Result<Self> {
        let sinks = (0..BUCKET_COUNT)
            .map(|i| OutputWriter::create(dir.join(bucket_file_name(i + MIN_WORD_LEN)), buffer_size))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("Opened {} bucket files in {:?}", sinks.len(), dir);
        Ok(Self { sinks })
    }

    /// Output paths with their lengths, in ascending order
    pub fn paths(&self) -> Vec<(usize, &Path)> {
        self.iter().map(|(len, w)| (len, w.path())).collect()
    }
}

impl BucketSet<Vec<u8>> {
    /// Buckets backed by in-memory buffers
    pub fn in_memory() -> Self {
        Self {
            sinks: (0..BUCKET_COUNT).map(|_| Vec::new()).collect(),
        }
    }
}

impl<S: LineSink> BucketSet<S> {
    /// Write a line to the bucket for `length`. Lengths outside the bucket
    /// range are ignored.
    pub fn write_line(&mut self, length: usize, content: &[u8]) -> Result<()> {
        match self.get_mut(length) {
            Some(sink) => sink.write_line(content),
            None => Ok(()),
        }
    }

    /// Write bytes as-is to the bucket for `length`, without adding a
    /// terminator
    pub fn write_raw(&mut self, length: usize, bytes: &[u8]) -> Result<()> {
        match self.get_mut(length) {
            Some(sink) => sink.write_raw(bytes),
            None => Ok(()),
        }
    }

    pub fn get(&self, length: usize) -> Option<&S> {
        let index = length.checked_sub(MIN_WORD_LEN)?;
        self.sinks.get(index)
    }

    pub fn get_mut(&mut self, length: usize) -> Option<&mut S> {
        let index = length.checked_sub(MIN_WORD_LEN)?;
        self.sinks.get_mut(index)
    }

    /// Flush all buckets
    pub fn flush_all(&mut self) -> Result<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }

    /// Buckets with their lengths, in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &S)> {
        self.sinks
            .iter()
            .enumerate()
            .map(|(i, sink)| (i + MIN_WORD_LEN, sink))
    }
}

/// Path of the cleaned list written next to `input`
pub fn cleaned_path(input: &Path) -> PathBuf {
    with_suffix(input, CLEANED_SUFFIX)
}

/// Directory holding the bucket files for `input`
pub fn separated_dir(input: &Path) -> PathBuf {
    with_suffix(input, SEPARATED_SUFFIX)
}

/// File name of the bucket for `length`
pub fn bucket_file_name(length: usize) -> String {
    format!("list-{}", length)
}

fn with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Ensure output directory exists, reusing it if it does
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path).map_err(|source| Error::CreateDir {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::MAX_WORD_LEN;
    use tempfile::TempDir;

    #[test]
    fn test_output_writer() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.txt");

        let mut writer = OutputWriter::create(path.clone(), 1024).unwrap();
        writer.write_line(b"hello").unwrap();
        writer.write_line(b"world").unwrap();
        writer.flush().unwrap();

        assert_eq!(writer.lines_written(), 2);
        assert_eq!(writer.bytes_written(), 12);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "hello\nworld\n");
    }

    #[test]
    fn test_output_writer_raw_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.txt");

        let mut writer = OutputWriter::create(path.clone(), 1024).unwrap();
        writer.write_line(b"ab").unwrap();
        writer.write_raw(b"cat").unwrap();
        writer.flush().unwrap();

        assert_eq!(writer.lines_written(), 1);
        assert_eq!(writer.bytes_written(), 6);
        assert_eq!(fs::read(&path).unwrap(), b"ab\ncat");
    }

    #[test]
    fn test_output_writer_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.txt");
        fs::write(&path, "stale\ncontent\n").unwrap();

        let mut writer = OutputWriter::create(path.clone(), 1024).unwrap();
        writer.write_line(b"fresh").unwrap();
        drop(writer);

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_output_writer_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("test.txt");

        let result = OutputWriter::create(path, 1024);
        assert!(matches!(result, Err(Error::CreateOutput { .. })));
    }

    #[test]
    fn test_bucket_set_creates_all_files() {
        let temp_dir = TempDir::new().unwrap();

        let mut buckets = BucketSet::create(temp_dir.path(), 1024).unwrap();
        buckets.write_line(3, b"cat").unwrap();
        buckets.flush_all().unwrap();

        assert_eq!(buckets.iter().count(), BUCKET_COUNT);
        for length in MIN_WORD_LEN..=MAX_WORD_LEN {
            let path = temp_dir.path().join(bucket_file_name(length));
            assert!(path.is_file(), "missing {:?}", path);
        }
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("list-3")).unwrap(),
            "cat\n"
        );
        assert_eq!(buckets.paths()[0].0, 1);
    }

    #[test]
    fn test_bucket_set_ignores_out_of_range() {
        let mut buckets = BucketSet::in_memory();
        buckets.write_line(0, b"").unwrap();
        buckets.write_line(16, b"abcdefghijklmnop").unwrap();
        buckets.write_line(15, b"abcdefghijklmno").unwrap();

        assert!(buckets.get(0).is_none());
        assert!(buckets.get(16).is_none());
        assert_eq!(buckets.get(15).unwrap(), b"abcdefghijklmno\n");
        assert!(buckets.iter().filter(|(len, _)| *len != 15).all(|(_, b)| b.is_empty()));
    }

    #[test]
    fn test_output_paths() {
        let input = Path::new("/path/to/words.txt");
        assert_eq!(cleaned_path(input), PathBuf::from("/path/to/words.txt-cleaned"));
        assert_eq!(separated_dir(input), PathBuf::from("/path/to/words.txt-seperated"));
        assert_eq!(bucket_file_name(7), "list-7");
    }

    #[test]
    fn test_ensure_output_dir_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("words-seperated");

        ensure_output_dir(&dir).unwrap();
        ensure_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_ensure_output_dir_blocked_by_file() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("words-seperated");
        fs::write(&dir, "not a directory\n").unwrap();

        let result = ensure_output_dir(&dir);
        assert!(matches!(result, Err(Error::CreateDir { ref path, .. }) if *path == dir));
        assert!(dir.is_file());
    }
}
