//! Line scanning
//!
//! Reads input as raw bytes, one line at a time, keeping track of whether each
//! line carried a terminator. `\n`, `\r\n` and a lone `\r` all end a line.
//! No transcoding is done: lengths are counted in
//! UTF-8 characters, with each invalid byte sequence counting as one.

use bstr::io::BufReadExt;
use bstr::ByteSlice;
use std::io::BufRead;

use crate::error::{Error, Result};

/// A single input line, borrowed from the reader's buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    raw: &'a [u8],
}

impl<'a> Line<'a> {
    /// Wrap raw line bytes, terminator included if present
    pub fn new(raw: &'a [u8]) -> Self {
        Self { raw }
    }

    /// Line content without its `\n`, `\r\n` or `\r` terminator
    #[inline]
    pub fn content(&self) -> &'a [u8] {
        let stripped = self.raw.strip_suffix(b"\n").unwrap_or(self.raw);
        stripped.strip_suffix(b"\r").unwrap_or(stripped)
    }

    /// Whether the line ended with a terminator (only the last line of a
    /// file can be unterminated)
    #[inline]
    pub fn is_terminated(&self) -> bool {
        matches!(self.raw.last(), Some(b'\n' | b'\r'))
    }

    /// Content length in characters
    #[inline]
    pub fn char_len(&self) -> usize {
        let content = self.content();
        if content.is_ascii() {
            content.len()
        } else {
            content.chars().count()
        }
    }

    /// Number of bytes this line occupied in the input
    #[inline]
    pub fn raw_len(&self) -> usize {
        self.raw.len()
    }
}

/// Feed every line of `reader` to `on_line`, in order.
///
/// Stops at the first error returned by `on_line` and propagates it. Returns
/// the number of bytes consumed.
pub fn scan_lines<R, F>(mut reader: R, mut on_line: F) -> Result<u64>
where
    R: BufRead,
    F: FnMut(Line<'_>) -> Result<()>,
{
    let mut bytes = 0u64;
    let mut failure = None;

    reader
        .for_byte_line_with_terminator(|chunk| {
            // bstr splits on `\n` only; a lone `\r` inside the chunk ends a line too
            let mut rest = chunk;
            while !rest.is_empty() {
                let (raw, tail) = rest.split_at(line_end(rest));
                rest = tail;
                bytes += raw.len() as u64;
                if let Err(e) = on_line(Line::new(raw)) {
                    failure = Some(e);
                    return Ok(false);
                }
            }
            Ok(true)
        })
        .map_err(Error::Read)?;

    match failure {
        Some(e) => Err(e),
        None => Ok(bytes),
    }
}

/// Length of the first line in `bytes`, terminator included
fn line_end(bytes: &[u8]) -> usize {
    match bytes.find_byte(b'\r') {
        Some(i) if bytes.get(i + 1) != Some(&b'\n') => i + 1,
        _ => bytes.len(),
    }
}
