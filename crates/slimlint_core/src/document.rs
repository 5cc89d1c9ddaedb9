//! Host document abstraction and line indexing.

use std::path::PathBuf;

use crate::diagnostic::LineRange;

/// Language identifier of Slim templates.
pub const SLIM_LANGUAGE_ID: &str = "slim";

/// A text buffer owned by the host editor.
///
/// `text` must return the buffer's *current* contents on every call, or
/// `None` once the host has closed it. The engine calls it once before
/// starting the linter and once after it exits to detect edits and closes
/// made in between.
pub trait TextDocument: Send + Sync {
    /// Stable identity of the document (its URI).
    fn key(&self) -> &str;

    /// Declared language of the buffer.
    fn language_id(&self) -> &str;

    /// Absolute path on disk, or `None` for untitled and virtual buffers.
    fn file_path(&self) -> Option<PathBuf>;

    /// Current full text, or `None` if the document is no longer open.
    fn text(&self) -> Option<String>;

    /// Whether the buffer is backed by a real file.
    fn is_file_backed(&self) -> bool {
        self.file_path().is_some()
    }
}

/// Pre-computed metadata for a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineInfo {
    /// Byte offset of line start (inclusive).
    start: usize,
    /// Byte offset of end of line content, excluding the line terminator.
    end: usize,
    /// Byte length of leading whitespace.
    indent_bytes: usize,
}

/// Line-indexed view over a text snapshot.
///
/// Lines are separated by `\n` or `\r\n`. A trailing newline opens one more
/// (empty) line, so an empty text still has one line.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    lines: Vec<LineInfo>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;

        for raw in source.split('\n') {
            let content = raw.strip_suffix('\r').unwrap_or(raw);
            let indent_bytes = content.len() - content.trim_start().len();
            lines.push(LineInfo {
                start,
                end: start + content.len(),
                indent_bytes,
            });
            start += raw.len() + 1;
        }

        Self { source, lines }
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the text of a zero-based line, without its terminator.
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        let info = self.lines.get(line)?;
        Some(&self.source[info.start..info.end])
    }

    /// Range from the first non-whitespace character to the end of the line.
    ///
    /// A blank line yields an empty range at its end.
    pub fn content_range(&self, line: usize) -> Option<LineRange> {
        let info = self.lines.get(line)?;
        let text = &self.source[info.start..info.end];
        let indent = utf16_len(&text[..info.indent_bytes]);
        let end = utf16_len(text);
        Some(LineRange::new(indent, end))
    }
}

fn utf16_len(text: &str) -> u32 {
    text.chars().map(|c| c.len_utf16() as u32).sum()
}
