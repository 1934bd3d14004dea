//! Source files and line/column lookup.
//!
//! Lexers work on byte offsets. Reporting tools want `line:column`, so a
//! [`SourceFile`] keeps a precomputed table of line starts and answers the
//! conversion with a binary search.

use std::sync::Arc;

use crate::error::{SourceError, SourceResult};

/// A named text buffer with a line-start index.
///
/// Lines are separated by `\n` only; a `\r` before the newline stays part
/// of the line, exactly as the lexers see it.
///
/// # Examples
///
/// ```
/// use dtk_util::SourceFile;
///
/// let file = SourceFile::new("merge.txt", "create out\nmerge out a.wad");
/// assert_eq!(file.line_count(), 2);
/// assert_eq!(file.offset_to_line_col(11), (2, 1));
/// ```
#[derive(Clone)]
pub struct SourceFile {
    /// File name (path or display name)
    name: String,
    /// File content
    content: Arc<str>,
    /// Precomputed line start offsets
    line_starts: Arc<[usize]>,
}

impl SourceFile {
    /// Create a new source file
    ///
    /// # Arguments
    ///
    /// * `name` - File name or path
    /// * `content` - File content
    pub fn new(name: impl Into<String>, content: impl Into<Arc<str>>) -> Self {
        let content = content.into();
        let line_starts = Self::line_starts(&content);
        Self {
            name: name.into(),
            content,
            line_starts,
        }
    }

    /// Compute line start offsets from content
    fn line_starts(content: &str) -> Arc<[usize]> {
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        line_starts.into()
    }

    /// Get the file name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the file content
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the total number of lines
    ///
    /// An empty file and a file ending in `\n` both count the (empty) last
    /// line.
    ///
    /// # Examples
    ///
    /// ```
    /// use dtk_util::SourceFile;
    ///
    /// assert_eq!(SourceFile::new("a", "").line_count(), 1);
    /// assert_eq!(SourceFile::new("a", "x\n").line_count(), 2);
    /// ```
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the byte offset where a line starts (0-indexed line number)
    ///
    /// Returns `None` if the line number is out of bounds.
    #[inline]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Convert a byte offset to 1-indexed `(line, column)` coordinates
    ///
    /// The column counts characters, not bytes, from the start of the line.
    /// Offsets past the end clamp to the last line.
    pub fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insert_point) => insert_point.saturating_sub(1),
        };
        let line_start = self.line_starts[line];
        let end = offset.min(self.content.len());
        let column = self
            .content
            .get(line_start..end)
            .map_or(end.saturating_sub(line_start), |text| text.chars().count());
        (line + 1, column + 1)
    }

    /// Get a specific source line (1-indexed) without its `\n`
    ///
    /// # Examples
    ///
    /// ```
    /// use dtk_util::SourceFile;
    ///
    /// let file = SourceFile::new("a", "line1\nline2");
    /// assert_eq!(file.line_at(2).unwrap(), "line2");
    /// assert!(file.line_at(3).is_err());
    /// ```
    pub fn line_at(&self, line: usize) -> SourceResult<&str> {
        let invalid = || SourceError::InvalidLineNumber {
            line,
            max_lines: self.line_count(),
        };
        if line == 0 {
            return Err(invalid());
        }
        let start = self.line_start(line - 1).ok_or_else(invalid)?;
        let end = self
            .line_start(line)
            .map_or(self.content.len(), |next| next - 1);
        Ok(&self.content[start..end])
    }

    /// Iterates over `(line_start, line_text)` pairs, one per line.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.line_starts
            .iter()
            .copied()
            .zip(self.content.split('\n'))
    }

    /// Extract a substring from the file content with bounds checking
    ///
    /// # Arguments
    ///
    /// * `start` - Start byte offset (inclusive)
    /// * `end` - End byte offset (exclusive)
    pub fn extract_range(&self, start: usize, end: usize) -> SourceResult<&str> {
        if start > end {
            return Err(SourceError::InvalidRange { start, end });
        }
        if end > self.content.len() {
            return Err(SourceError::OutOfBounds {
                file_len: self.content.len(),
                start,
                end,
            });
        }
        self.content
            .get(start..end)
            .ok_or(SourceError::NotCharBoundary { start, end })
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("line_count", &self.line_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_starts() {
        let file = SourceFile::new("t", "ab\ncd\n\nef");
        assert_eq!(file.line_count(), 4);
        assert_eq!(file.line_start(0), Some(0));
        assert_eq!(file.line_start(1), Some(3));
        assert_eq!(file.line_start(2), Some(6));
        assert_eq!(file.line_start(3), Some(7));
        assert_eq!(file.line_start(4), None);
    }

    #[test]
    fn test_offset_to_line_col() {
        let file = SourceFile::new("t", "ab\ncd");
        assert_eq!(file.offset_to_line_col(0), (1, 1));
        assert_eq!(file.offset_to_line_col(1), (1, 2));
        assert_eq!(file.offset_to_line_col(3), (2, 1));
        assert_eq!(file.offset_to_line_col(4), (2, 2));
    }

    #[test]
    fn test_offset_to_line_col_counts_chars() {
        let file = SourceFile::new("t", "# é x");
        // 'x' is at byte 5 but character 4
        assert_eq!(file.offset_to_line_col(5), (1, 5));
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let file = SourceFile::new("t", "ab");
        assert_eq!(file.offset_to_line_col(10), (1, 3));
    }

    #[test]
    fn test_line_at_keeps_carriage_return() {
        let file = SourceFile::new("t", "one\r\ntwo");
        assert_eq!(file.line_at(1).unwrap(), "one\r");
        assert_eq!(file.line_at(2).unwrap(), "two");
    }

    #[test]
    fn test_line_at_invalid() {
        let file = SourceFile::new("t", "one");
        assert_eq!(
            file.line_at(0),
            Err(SourceError::InvalidLineNumber {
                line: 0,
                max_lines: 1
            })
        );
        assert!(file.line_at(2).is_err());
    }

    #[test]
    fn test_lines_match_split() {
        let file = SourceFile::new("t", "a\n\nbc\n");
        let lines: Vec<_> = file.lines().collect();
        assert_eq!(lines, vec![(0, "a"), (2, ""), (3, "bc"), (6, "")]);
    }

    #[test]
    fn test_extract_range() {
        let file = SourceFile::new("t", "héllo");
        assert_eq!(file.extract_range(0, 1).unwrap(), "h");
        assert_eq!(
            file.extract_range(2, 1),
            Err(SourceError::InvalidRange { start: 2, end: 1 })
        );
        assert!(matches!(
            file.extract_range(0, 99),
            Err(SourceError::OutOfBounds { .. })
        ));
        assert_eq!(
            file.extract_range(0, 2),
            Err(SourceError::NotCharBoundary { start: 0, end: 2 })
        );
    }

    #[test]
    fn test_error_display() {
        let err = SourceError::InvalidLineNumber {
            line: 9,
            max_lines: 3,
        };
        assert_eq!(err.to_string(), "Invalid line number: 9 (file has 3 lines)");
    }
}
