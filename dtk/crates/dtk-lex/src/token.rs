//! Token model shared by every language.
//!
//! Each language defines its own closed kind enum and continuation enum and
//! implements [`TokenKind`] and [`Continuation`] for them. The types in this
//! module are generic over both, so a [`TokenStream`] produced by the
//! WadMerge lexer cannot be confused with one produced by the DecoHack lexer.

use std::fmt;
use std::hash::Hash;
use std::ops::Range;

use thiserror::Error;

use crate::hyperlink::LinkPattern;

/// The highlight class a token kind belongs to.
///
/// Every language-specific kind maps onto exactly one category. Rendering
/// and reporting code that does not care which language produced a token
/// works in terms of categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Spaces, tabs and line breaks.
    Whitespace,
    /// Line and block comments.
    Comment,
    /// Documentation comments (`/** ... */`).
    DocComment,
    /// `#` directives.
    Preprocessor,
    /// Keywords and section headers.
    ReservedWord,
    /// Plain names.
    Identifier,
    /// Names recognised as function references.
    Function,
    /// Known operator text.
    Operator,
    /// Brackets and punctuation that is not an operator.
    Separator,
    /// Numeric literals.
    Number,
    /// `true` and `false`.
    Boolean,
    /// String and backquoted literals.
    String,
    /// `$` arguments.
    Variable,
    /// Anything malformed.
    Error,
}

impl Category {
    /// Lower-case name used in reports and JSON output.
    pub fn name(self) -> &'static str {
        match self {
            Category::Whitespace => "whitespace",
            Category::Comment => "comment",
            Category::DocComment => "doc-comment",
            Category::Preprocessor => "preprocessor",
            Category::ReservedWord => "reserved-word",
            Category::Identifier => "identifier",
            Category::Function => "function",
            Category::Operator => "operator",
            Category::Separator => "separator",
            Category::Number => "number",
            Category::Boolean => "boolean",
            Category::String => "string",
            Category::Variable => "variable",
            Category::Error => "error",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an ERROR-kind token stands for.
///
/// Lexing never fails: these values describe error tokens after the fact,
/// for tools that want to report them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexError {
    /// A numeric literal with characters that cannot belong to it.
    #[error("malformed number")]
    MalformedNumber,

    /// A single-line string that reached the end of its line.
    #[error("unterminated string")]
    UnterminatedString,

    /// A character that cannot start or continue a name.
    #[error("unrecognized identifier character")]
    UnterminatedIdentifierChar,

    /// A `\x` or `\u` escape without the required hex digits.
    #[error("bad escape sequence")]
    BadEscapeSequence,
}

/// A closed, per-language token kind enumeration.
///
/// Codes are stable: each language owns a reserved range of one hundred
/// codes and existing kinds are never renumbered.
pub trait TokenKind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Stable numeric code.
    fn code(self) -> u16;

    /// Kind name, as used in token dumps.
    fn name(self) -> &'static str;

    /// Highlight class.
    fn category(self) -> Category;

    /// The lexical error this kind reports, if it is an error kind.
    fn error(self) -> Option<LexError> {
        None
    }

    /// The hyperlink pattern finished tokens of this kind are scanned with.
    fn link_pattern(self) -> Option<LinkPattern> {
        None
    }

    /// Returns `true` for ERROR-kind tokens.
    fn is_error(self) -> bool {
        self.category() == Category::Error
    }
}

/// Lexer state carried from the end of one line to the start of the next.
///
/// `Default` is always the neutral state.
pub trait Continuation: Copy + Eq + Hash + Default + fmt::Debug + Send + Sync + 'static {
    /// State name, as used in token dumps.
    fn name(self) -> &'static str;

    /// Returns `true` if the next line starts fresh.
    fn is_neutral(self) -> bool {
        self == Self::default()
    }
}

/// A classified, contiguous span of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<K> {
    /// The token kind.
    pub kind: K,
    /// Byte offset of the first character within the segment.
    pub start: usize,
    /// Byte offset of the last byte of the last character (inclusive).
    pub end: usize,
    /// Absolute document offset of the first character.
    pub document_offset: usize,
    /// Whether this piece is a hyperlink carved out of a larger token.
    pub hyperlink: bool,
}

impl<K: TokenKind> Token<K> {
    /// Half-open byte range within the segment.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end + 1
    }

    /// Half-open byte range within the document.
    #[inline]
    pub fn document_range(&self) -> Range<usize> {
        self.document_offset..self.document_offset + self.len()
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// Tokens always cover at least one character.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The token's text, given the segment it was produced from.
    ///
    /// Returns an empty string if `segment` is not the token's segment.
    pub fn text<'a>(&self, segment: &'a str) -> &'a str {
        segment.get(self.range()).unwrap_or("")
    }

    /// Shifts the token by `delta` bytes in the document.
    pub fn shifted(self, delta: usize) -> Self {
        Self {
            document_offset: self.document_offset + delta,
            ..self
        }
    }

    /// Returns the same token with its kind converted.
    pub fn map_kind<J>(self, f: impl FnOnce(K) -> J) -> Token<J> {
        Token {
            kind: f(self.kind),
            start: self.start,
            end: self.end,
            document_offset: self.document_offset,
            hyperlink: self.hyperlink,
        }
    }
}

/// The ordered tokens of one segment plus the state the next segment must
/// start in.
///
/// Iteration ends with `None` after the last token; there is no sentinel
/// token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream<K, S> {
    tokens: Vec<Token<K>>,
    next_state: S,
}

impl<K: TokenKind, S: Continuation> TokenStream<K, S> {
    /// Creates a stream.
    pub fn new(tokens: Vec<Token<K>>, next_state: S) -> Self {
        Self { tokens, next_state }
    }

    /// The tokens in order.
    pub fn tokens(&self) -> &[Token<K>] {
        &self.tokens
    }

    /// The continuation state for the following segment.
    pub fn next_state(&self) -> S {
        self.next_state
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the segment produced no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over the tokens.
    pub fn iter(&self) -> std::slice::Iter<'_, Token<K>> {
        self.tokens.iter()
    }

    /// The kind of the last token, if any.
    pub fn last_kind(&self) -> Option<K> {
        self.tokens.last().map(|token| token.kind)
    }

    /// Splits the stream into its parts.
    pub fn into_parts(self) -> (Vec<Token<K>>, S) {
        (self.tokens, self.next_state)
    }

    /// Converts kinds and state into another representation.
    pub fn map<J: TokenKind, T: Continuation>(
        self,
        mut kind: impl FnMut(K) -> J,
        state: impl FnOnce(S) -> T,
    ) -> TokenStream<J, T> {
        TokenStream {
            tokens: self
                .tokens
                .into_iter()
                .map(|token| token.map_kind(&mut kind))
                .collect(),
            next_state: state(self.next_state),
        }
    }
}

impl<K, S> IntoIterator for TokenStream<K, S> {
    type Item = Token<K>;
    type IntoIter = std::vec::IntoIter<Token<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a, K, S> IntoIterator for &'a TokenStream<K, S> {
    type Item = &'a Token<K>;
    type IntoIter = std::slice::Iter<'a, Token<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
