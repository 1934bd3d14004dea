//! Core driver shared by every language.
//!
//! A language is a [`Machine`]: a per-character state handler plus an
//! end-of-segment policy. [`drive`] walks the segment with a [`Cursor`],
//! feeds each character to the machine and collects what the machine
//! emits through an [`Emitter`].
//!
//! A `\n` never reaches a machine. The driver ends the line there exactly as
//! if the segment had ended, emits the newline as whitespace and resumes the
//! machine in the returned continuation. Lexing a buffer in one call is
//! therefore the same as lexing its lines one by one.

use crate::cursor::Cursor;
use crate::hyperlink;
use crate::token::{Continuation, Token, TokenKind, TokenStream};

/// What a state handler did with the current character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// The character belongs to the current run; move on.
    Consume,
    /// The state changed and the same character must be seen again.
    ///
    /// A handler that rewinds always moves to a state that consumes the
    /// character next time, so pushback never exceeds one character.
    Rewind,
}

/// A language state machine.
pub(crate) trait Machine {
    /// The language's token kinds.
    type Kind: TokenKind;
    /// The language's continuation states.
    type State: Continuation;

    /// Kind used for the newline tokens the driver emits.
    fn whitespace() -> Self::Kind;

    /// Enters the scan state a line starting in `state` begins in.
    fn resume(&mut self, state: Self::State);

    /// Handles one character.
    fn step(&mut self, cx: &mut Emitter<'_, Self::Kind>, c: char) -> Step;

    /// Emits the pending run at the end of a line and returns the state the
    /// next line starts in.
    fn finish(&mut self, cx: &mut Emitter<'_, Self::Kind>) -> Self::State;
}

/// Collects the tokens of one segment.
///
/// The emitter tracks where the pending run started and the byte position
/// of the character being handled. Handlers emit the pending run either up
/// to (`emit`) or through (`emit_through`) the current character.
pub(crate) struct Emitter<'a, K> {
    segment: &'a str,
    document_offset: usize,
    token_start: usize,
    at: usize,
    tokens: Vec<Token<K>>,
}

impl<'a, K: TokenKind> Emitter<'a, K> {
    fn new(segment: &'a str, document_offset: usize) -> Self {
        Self {
            segment,
            document_offset,
            token_start: 0,
            at: 0,
            tokens: Vec::new(),
        }
    }

    fn seek(&mut self, at: usize) {
        self.at = at;
    }

    /// Text of the pending run, excluding the current character.
    pub(crate) fn pending(&self) -> &'a str {
        self.segment.get(self.token_start..self.at).unwrap_or("")
    }

    /// Emits the pending run, excluding the current character.
    ///
    /// An empty run emits nothing.
    pub(crate) fn emit(&mut self, kind: K) {
        let end = self.at;
        self.push(kind, end);
    }

    /// Emits the pending run including the current character `c`.
    pub(crate) fn emit_through(&mut self, kind: K, c: char) {
        let end = self.at + c.len_utf8();
        self.push(kind, end);
    }

    fn push(&mut self, kind: K, end: usize) {
        let start = self.token_start;
        self.token_start = end;
        if start >= end {
            return;
        }

        match kind.link_pattern() {
            Some(pattern) => {
                let text = self.segment.get(start..end).unwrap_or("");
                for piece in hyperlink::carve(text, pattern) {
                    self.push_span(
                        kind,
                        start + piece.range.start,
                        start + piece.range.end,
                        piece.hyperlink,
                    );
                }
            },
            None => self.push_span(kind, start, end, false),
        }
    }

    fn push_span(&mut self, kind: K, start: usize, end: usize, hyperlink: bool) {
        self.tokens.push(Token {
            kind,
            start,
            end: end - 1,
            document_offset: self.document_offset + start,
            hyperlink,
        });
    }

    fn into_tokens(self) -> Vec<Token<K>> {
        self.tokens
    }
}

/// Lexes `segment` with `machine`, starting in `initial`.
pub(crate) fn drive<M: Machine>(
    mut machine: M,
    segment: &str,
    initial: M::State,
    document_offset: usize,
) -> TokenStream<M::Kind, M::State> {
    let mut cursor = Cursor::new(segment);
    let mut cx = Emitter::new(segment, document_offset);
    machine.resume(initial);

    while let Some(c) = cursor.current_char() {
        cx.seek(cursor.position());
        if c == '\n' {
            let next = machine.finish(&mut cx);
            cx.emit_through(M::whitespace(), c);
            machine.resume(next);
            cursor.advance();
            continue;
        }
        match machine.step(&mut cx, c) {
            Step::Consume => cursor.advance(),
            Step::Rewind => {},
        }
    }

    cx.seek(segment.len());
    let next = machine.finish(&mut cx);
    TokenStream::new(cx.into_tokens(), next)
}
