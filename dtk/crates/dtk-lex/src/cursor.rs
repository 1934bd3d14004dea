//! Character cursor for traversing a segment.
//!
//! The driver walks a segment one `char` at a time and needs the byte
//! position of each character. Every position the cursor reports lies on a
//! character boundary.

/// A cursor over a segment.
///
/// The cursor never moves backwards. Pushback in the state machines is
/// expressed by not advancing, so one character of lookahead is all a
/// lexer ever sees.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `source`.
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Returns the character at the cursor position, or `None` at the end.
    #[inline]
    pub(crate) fn current_char(&self) -> Option<char> {
        let b = *self.source.as_bytes().get(self.position)?;

        // Fast path for ASCII (most common case)
        if b < 128 {
            return Some(b as char);
        }

        self.source.get(self.position..)?.chars().next()
    }

    /// Advances past the current character. Does nothing at the end.
    #[inline]
    pub(crate) fn advance(&mut self) {
        if let Some(c) = self.current_char() {
            self.position += c.len_utf8();
        }
    }

    /// Returns the current byte position in the segment.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cursor() {
        let cursor = Cursor::new("state Ready");
        assert_eq!(cursor.current_char(), Some('s'));
        assert_eq!(cursor.position(), 0);
        assert_eq!(Cursor::new("").current_char(), None);
    }

    #[test]
    fn test_advance() {
        let mut cursor = Cursor::new("abc");
        assert_eq!(cursor.current_char(), Some('a'));
        cursor.advance();
        assert_eq!(cursor.current_char(), Some('b'));
        cursor.advance();
        assert_eq!(cursor.current_char(), Some('c'));
        cursor.advance();
        assert_eq!(cursor.current_char(), None);
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_advance_utf8() {
        let mut cursor = Cursor::new("αβ!");
        assert_eq!(cursor.current_char(), Some('α'));
        cursor.advance();
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.current_char(), Some('β'));
        cursor.advance();
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.current_char(), Some('!'));
    }

    #[test]
    fn test_advance_past_end_is_noop() {
        let mut cursor = Cursor::new("");
        cursor.advance();
        assert_eq!(cursor.position(), 0);
    }
}
