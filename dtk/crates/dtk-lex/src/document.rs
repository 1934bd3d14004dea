//! Incremental document cache.
//!
//! A [`Document`] keeps every line's tokens and the state each line starts
//! and ends in. An edit re-lexes from the edited line forward and stops as
//! soon as a line would start in the same state it was last lexed with,
//! since nothing after it can change.

use std::ops::Range;

use dtk_util::{SourceError, SourceResult};
use tracing::{debug, trace};

use crate::language::{AnyKind, Language, LineState};
use crate::token::Token;

#[derive(Debug, Clone)]
struct Line {
    text: String,
    start_state: LineState,
    end_state: LineState,
    /// Tokens with line-relative offsets.
    tokens: Vec<Token<AnyKind>>,
}

impl Line {
    fn lex(language: Language, text: String, start_state: LineState) -> Self {
        let (tokens, end_state) = language.tokenize(&text, start_state, 0).into_parts();
        Self {
            text,
            start_state,
            end_state,
            tokens,
        }
    }
}

/// A lexed document that can be edited line by line.
///
/// # Examples
///
/// ```
/// use dtk_lex::{Document, Language, LineState};
///
/// let mut doc = Document::new(Language::RookScript, "a\nb\nc");
/// assert_eq!(doc.state_after(1), Some(LineState::Neutral));
///
/// // Opening a comment re-lexes every following line.
/// assert_eq!(doc.replace_line(0, "/* a").unwrap(), 3);
/// assert_eq!(doc.state_after(2), Some(LineState::BlockComment));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    language: Language,
    lines: Vec<Line>,
    starts: Vec<usize>,
}

impl Document {
    /// Lexes `text` line by line. Lines are separated by `\n`.
    pub fn new(language: Language, text: &str) -> Self {
        let mut state = language.initial_state();
        let lines: Vec<Line> = text
            .split('\n')
            .map(|segment| {
                let line = Line::lex(language, segment.to_string(), state);
                state = line.end_state;
                line
            })
            .collect();
        debug!(
            "lexed {} document with {} lines",
            language.display_name(),
            lines.len()
        );
        let mut document = Self {
            language,
            lines,
            starts: Vec::new(),
        };
        document.index();
        document
    }

    /// The document's language.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Number of lines. Never zero.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of line `index`, without its line break.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|line| line.text.as_str())
    }

    /// The state line `index` ends in.
    pub fn state_after(&self, index: usize) -> Option<LineState> {
        self.lines.get(index).map(|line| line.end_state)
    }

    /// Document offset of the first character of line `index`.
    pub fn line_start(&self, index: usize) -> Option<usize> {
        self.starts.get(index).copied()
    }

    /// Tokens of line `index`, with document offsets.
    pub fn tokens(&self, index: usize) -> Option<Vec<Token<AnyKind>>> {
        let line = self.lines.get(index)?;
        let start = self.starts[index];
        Some(line.tokens.iter().map(|token| token.shifted(start)).collect())
    }

    /// Tokens that overlap the document byte range `range`, in order.
    ///
    /// An empty range selects the token containing `range.start`.
    pub fn tokens_in_range(&self, range: Range<usize>) -> Vec<Token<AnyKind>> {
        let end = range.end.max(range.start + 1);
        let first = self
            .starts
            .partition_point(|&start| start <= range.start)
            .saturating_sub(1);
        let mut found = Vec::new();
        for (index, line) in self.lines.iter().enumerate().skip(first) {
            let start = self.starts[index];
            if start >= end {
                break;
            }
            found.extend(
                line.tokens
                    .iter()
                    .map(|token| token.shifted(start))
                    .filter(|token| {
                        let span = token.document_range();
                        span.start < end && span.end > range.start
                    }),
            );
        }
        found
    }

    /// The whole text, lines joined with `\n`.
    pub fn text(&self) -> String {
        let lines: Vec<&str> = self.lines.iter().map(|line| line.text.as_str()).collect();
        lines.join("\n")
    }

    /// Replaces line `index` and returns how many lines were re-lexed.
    pub fn replace_line(&mut self, index: usize, text: &str) -> SourceResult<usize> {
        self.check(index, self.lines.len())?;
        self.lines[index].text = text.to_string();
        Ok(self.relex(index, true))
    }

    /// Inserts a line before `index` (or at the end when `index` equals the
    /// line count) and returns how many lines were re-lexed.
    pub fn insert_line(&mut self, index: usize, text: &str) -> SourceResult<usize> {
        self.check(index, self.lines.len() + 1)?;
        let start_state = self.state_before(index);
        self.lines
            .insert(index, Line::lex(self.language, text.to_string(), start_state));
        Ok(1 + self.relex(index + 1, false))
    }

    /// Removes line `index` and returns how many lines were re-lexed.
    ///
    /// The last remaining line is emptied instead of removed.
    pub fn remove_line(&mut self, index: usize) -> SourceResult<usize> {
        self.check(index, self.lines.len())?;
        if self.lines.len() == 1 {
            return self.replace_line(0, "");
        }
        self.lines.remove(index);
        if index == self.lines.len() {
            self.index();
            return Ok(0);
        }
        Ok(self.relex(index, false))
    }

    fn check(&self, index: usize, limit: usize) -> SourceResult<()> {
        if index < limit {
            Ok(())
        } else {
            Err(SourceError::InvalidLineNumber {
                line: index,
                max_lines: self.lines.len(),
            })
        }
    }

    fn state_before(&self, index: usize) -> LineState {
        match index {
            0 => self.language.initial_state(),
            _ => self.lines[index - 1].end_state,
        }
    }

    /// Re-lexes from line `first`. The first line is always re-lexed when
    /// `force` is set; later lines only while their start state changed.
    fn relex(&mut self, first: usize, force: bool) -> usize {
        let mut state = self.state_before(first);
        let mut count = 0;
        for index in first..self.lines.len() {
            let line = &mut self.lines[index];
            if line.start_state == state && !(force && index == first) {
                trace!("line {} starts in {}, stopping", index, state);
                break;
            }
            let text = std::mem::take(&mut line.text);
            *line = Line::lex(self.language, text, state);
            state = line.end_state;
            count += 1;
        }
        debug!(
            "re-lexed {} line(s) from line {} of {}",
            count,
            first,
            self.lines.len()
        );
        self.index();
        count
    }

    fn index(&mut self) {
        self.starts.clear();
        let mut offset = 0;
        for line in &self.lines {
            self.starts.push(offset);
            offset += line.text.len() + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Category, TokenKind};

    fn categories(doc: &Document, index: usize) -> Vec<Category> {
        doc.tokens(index)
            .unwrap_or_default()
            .iter()
            .map(|token| token.kind.category())
            .collect()
    }

    fn same_as_fresh(doc: &Document) {
        let fresh = Document::new(doc.language(), &doc.text());
        assert_eq!(fresh.line_count(), doc.line_count());
        for index in 0..doc.line_count() {
            assert_eq!(fresh.tokens(index), doc.tokens(index), "line {}", index);
            assert_eq!(fresh.state_after(index), doc.state_after(index));
        }
    }

    #[test]
    fn test_new_splits_lines() {
        let doc = Document::new(Language::DecoHack, "thing 1\n\nweapon 2\n");
        assert_eq!(doc.line_count(), 4);
        assert_eq!(doc.line(0), Some("thing 1"));
        assert_eq!(doc.line(1), Some(""));
        assert_eq!(doc.line(3), Some(""));
        assert_eq!(doc.line(4), None);
        assert_eq!(doc.text(), "thing 1\n\nweapon 2\n");
    }

    #[test]
    fn test_empty_text_has_one_line() {
        let doc = Document::new(Language::WadMerge, "");
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.tokens(0), Some(Vec::new()));
    }

    #[test]
    fn test_document_offsets() {
        let doc = Document::new(Language::WadMerge, "end\ncreate out");
        assert_eq!(doc.line_start(1), Some(4));
        let tokens = doc.tokens(1).unwrap();
        assert_eq!(tokens[0].document_offset, 4);
        assert_eq!(tokens[2].document_offset, 11);
        assert_eq!(tokens[2].start, 7);
    }

    #[test]
    fn test_state_flows_between_lines() {
        let doc = Document::new(Language::RookScript, "/* one\ntwo\nthree */ x");
        assert_eq!(doc.state_after(0), Some(LineState::BlockComment));
        assert_eq!(doc.state_after(1), Some(LineState::BlockComment));
        assert_eq!(doc.state_after(2), Some(LineState::Neutral));
        assert_eq!(categories(&doc, 1), vec![Category::Comment]);
    }

    #[test]
    fn test_replace_stops_when_states_match() {
        let mut doc = Document::new(Language::RookScript, "a\nb\nc\nd");
        assert_eq!(doc.replace_line(1, "x = 1").unwrap(), 1);
        same_as_fresh(&doc);
    }

    #[test]
    fn test_replace_opening_and_closing_comment() {
        let mut doc = Document::new(Language::DecoHack, "a\nb\nc\nd");
        assert_eq!(doc.replace_line(1, "/*").unwrap(), 3);
        assert_eq!(categories(&doc, 3), vec![Category::Comment]);
        same_as_fresh(&doc);

        assert_eq!(doc.replace_line(2, "*/").unwrap(), 2);
        assert_eq!(categories(&doc, 3), vec![Category::Identifier]);
        same_as_fresh(&doc);
    }

    #[test]
    fn test_insert_line() {
        let mut doc = Document::new(Language::WadScript, "a\nb");
        assert_eq!(doc.insert_line(1, "/** doc").unwrap(), 2);
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.state_after(2), Some(LineState::DocComment));
        same_as_fresh(&doc);

        assert_eq!(doc.insert_line(3, "*/").unwrap(), 1);
        assert_eq!(doc.state_after(3), Some(LineState::Neutral));
        same_as_fresh(&doc);
    }

    #[test]
    fn test_remove_line() {
        let mut doc = Document::new(Language::DoomMake, "/*\nx\ny\n*/\nz");
        assert_eq!(doc.remove_line(0).unwrap(), 3);
        assert_eq!(doc.line(0), Some("x"));
        same_as_fresh(&doc);

        assert_eq!(doc.remove_line(3).unwrap(), 0);
        assert_eq!(doc.line_count(), 3);
        same_as_fresh(&doc);
    }

    #[test]
    fn test_remove_last_remaining_line() {
        let mut doc = Document::new(Language::DefSwAni, "[FLATS]");
        assert_eq!(doc.remove_line(0).unwrap(), 1);
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.line(0), Some(""));
    }

    #[test]
    fn test_out_of_range_edits() {
        let mut doc = Document::new(Language::DeuTex, "A 1 1");
        assert_eq!(
            doc.replace_line(1, "x"),
            Err(SourceError::InvalidLineNumber {
                line: 1,
                max_lines: 1
            })
        );
        assert!(doc.remove_line(5).is_err());
        assert!(doc.insert_line(2, "x").is_err());
        assert_eq!(doc.insert_line(1, "B 2 2").unwrap(), 1);
    }

    #[test]
    fn test_tokens_in_range() {
        let doc = Document::new(Language::WadMerge, "create out\nsave out a.wad");
        let texts: Vec<usize> = doc
            .tokens_in_range(8..16)
            .iter()
            .map(|token| token.document_offset)
            .collect();
        // "out" at 7, "save" at 11, " " at 15.
        assert_eq!(texts, vec![7, 11, 15]);
        assert!(doc.tokens_in_range(100..200).is_empty());
    }
}
