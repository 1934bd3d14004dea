//! DecoHack lexer.
//!
//! DecoHack patches describe things, weapons and state tables with a small
//! C-like syntax. Unknown identifiers starting with `a_` are action
//! function references (`A_WeaponReady`, `a_fire`).

use dtk_util::{Alphabet, CasePolicy, WordMap};
use once_cell::sync::Lazy;

use super::brace::{BraceMachine, BraceState, BraceTables, Class, Dialect};
use super::core::drive;
use super::Tokenizer;
use crate::hyperlink::LinkPattern;
use crate::token::{Category, LexError, TokenKind, TokenStream};

/// Continuation state of the DecoHack lexer.
pub type DecoHackState = BraceState;

/// DecoHack token kinds. Codes 100-199.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum DecoHackKind {
    /// Spaces, tabs and line breaks.
    Whitespace = 100,
    /// `// ...`
    CommentEol = 101,
    /// `/* ... */`
    CommentMultiline = 102,
    /// `/** ... */`
    CommentDoc = 103,
    /// `#include "file"` and friends.
    Preprocessor = 104,
    /// Keywords.
    ReservedWord = 105,
    /// Names.
    Identifier = 106,
    /// Action function references.
    Function = 107,
    /// `+`, `-` and `|`.
    Operator = 108,
    /// Brackets and other punctuation.
    Separator = 109,
    /// Decimal integers and `null`.
    NumberDecimal = 110,
    /// `0x` integers.
    NumberHex = 111,
    /// Decimal fractions.
    NumberFloat = 112,
    /// `true` and `false`.
    Boolean = 113,
    /// Double-quoted strings.
    String = 114,
    /// Backquoted strings.
    Backquote = 115,
    /// Malformed numbers.
    ErrorNumber = 116,
    /// Strings left open at the end of the line.
    ErrorString = 117,
    /// Strings containing a bad `\x` escape.
    ErrorEscape = 118,
    /// Names starting with an invalid character sequence.
    ErrorIdentifier = 119,
}

impl DecoHackKind {
    /// Every kind, in code order.
    pub const ALL: [DecoHackKind; 20] = [
        DecoHackKind::Whitespace,
        DecoHackKind::CommentEol,
        DecoHackKind::CommentMultiline,
        DecoHackKind::CommentDoc,
        DecoHackKind::Preprocessor,
        DecoHackKind::ReservedWord,
        DecoHackKind::Identifier,
        DecoHackKind::Function,
        DecoHackKind::Operator,
        DecoHackKind::Separator,
        DecoHackKind::NumberDecimal,
        DecoHackKind::NumberHex,
        DecoHackKind::NumberFloat,
        DecoHackKind::Boolean,
        DecoHackKind::String,
        DecoHackKind::Backquote,
        DecoHackKind::ErrorNumber,
        DecoHackKind::ErrorString,
        DecoHackKind::ErrorEscape,
        DecoHackKind::ErrorIdentifier,
    ];
}

impl TokenKind for DecoHackKind {
    fn code(self) -> u16 {
        self as u16
    }

    fn name(self) -> &'static str {
        match self {
            DecoHackKind::Whitespace => "Whitespace",
            DecoHackKind::CommentEol => "CommentEol",
            DecoHackKind::CommentMultiline => "CommentMultiline",
            DecoHackKind::CommentDoc => "CommentDoc",
            DecoHackKind::Preprocessor => "Preprocessor",
            DecoHackKind::ReservedWord => "ReservedWord",
            DecoHackKind::Identifier => "Identifier",
            DecoHackKind::Function => "Function",
            DecoHackKind::Operator => "Operator",
            DecoHackKind::Separator => "Separator",
            DecoHackKind::NumberDecimal => "NumberDecimal",
            DecoHackKind::NumberHex => "NumberHex",
            DecoHackKind::NumberFloat => "NumberFloat",
            DecoHackKind::Boolean => "Boolean",
            DecoHackKind::String => "String",
            DecoHackKind::Backquote => "Backquote",
            DecoHackKind::ErrorNumber => "ErrorNumber",
            DecoHackKind::ErrorString => "ErrorString",
            DecoHackKind::ErrorEscape => "ErrorEscape",
            DecoHackKind::ErrorIdentifier => "ErrorIdentifier",
        }
    }

    fn category(self) -> Category {
        match self {
            DecoHackKind::Whitespace => Category::Whitespace,
            DecoHackKind::CommentEol | DecoHackKind::CommentMultiline => Category::Comment,
            DecoHackKind::CommentDoc => Category::DocComment,
            DecoHackKind::Preprocessor => Category::Preprocessor,
            DecoHackKind::ReservedWord => Category::ReservedWord,
            DecoHackKind::Identifier => Category::Identifier,
            DecoHackKind::Function => Category::Function,
            DecoHackKind::Operator => Category::Operator,
            DecoHackKind::Separator => Category::Separator,
            DecoHackKind::NumberDecimal | DecoHackKind::NumberHex | DecoHackKind::NumberFloat => {
                Category::Number
            },
            DecoHackKind::Boolean => Category::Boolean,
            DecoHackKind::String | DecoHackKind::Backquote => Category::String,
            DecoHackKind::ErrorNumber
            | DecoHackKind::ErrorString
            | DecoHackKind::ErrorEscape
            | DecoHackKind::ErrorIdentifier => Category::Error,
        }
    }

    fn error(self) -> Option<LexError> {
        match self {
            DecoHackKind::ErrorNumber => Some(LexError::MalformedNumber),
            DecoHackKind::ErrorString => Some(LexError::UnterminatedString),
            DecoHackKind::ErrorEscape => Some(LexError::BadEscapeSequence),
            DecoHackKind::ErrorIdentifier => Some(LexError::UnterminatedIdentifierChar),
            _ => None,
        }
    }

    fn link_pattern(self) -> Option<LinkPattern> {
        match self {
            DecoHackKind::Preprocessor => Some(LinkPattern::QuotedPath),
            DecoHackKind::CommentEol
            | DecoHackKind::CommentMultiline
            | DecoHackKind::CommentDoc
            | DecoHackKind::String
            | DecoHackKind::Backquote => Some(LinkPattern::Url),
            _ => None,
        }
    }
}

const KEYWORDS: &[&str] = &[
    "using", "misc", "pars", "state", "sound", "strings", "weapon", "thing", "custom", "auto",
    "fill", "alias", "clear", "properties", "sounds", "states", "goto", "loop", "wait", "stop",
    "free", "protect", "unprotect", "each", "in", "to", "from", "with", "swap",
];

static TABLES: Lazy<BraceTables<DecoHackKind>> = Lazy::new(|| BraceTables {
    separators: Alphabet::new("{}()"),
    delimiters: Alphabet::new("{}(),.+-|:\"`/"),
    operators: ["+", "-", "|"].into_iter().collect(),
    words: WordMap::build(
        CasePolicy::Insensitive,
        KEYWORDS
            .iter()
            .map(|word| (*word, DecoHackKind::ReservedWord))
            .chain([
                ("null", DecoHackKind::NumberDecimal),
                ("true", DecoHackKind::Boolean),
                ("false", DecoHackKind::Boolean),
            ]),
    ),
});

/// Tokenizer for DecoHack patches.
///
/// # Example
///
/// ```
/// use dtk_lex::{DecoHackKind, DecoHackLexer, DecoHackState, Tokenizer};
///
/// let stream = DecoHackLexer.tokenize("goto A_Ready", DecoHackState::Neutral, 0);
/// let kinds: Vec<_> = stream.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [DecoHackKind::ReservedWord, DecoHackKind::Whitespace, DecoHackKind::Function]
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DecoHackLexer;

impl Dialect for DecoHackLexer {
    type Kind = DecoHackKind;

    const EXPONENTS: bool = false;
    const UNICODE_ESCAPES: bool = false;
    const FUNCTION_PREFIX: Option<&'static str> = Some("a_");

    fn tables() -> &'static BraceTables<DecoHackKind> {
        &TABLES
    }

    fn kind(class: Class) -> DecoHackKind {
        match class {
            Class::Whitespace => DecoHackKind::Whitespace,
            Class::Preprocessor => DecoHackKind::Preprocessor,
            Class::CommentEol => DecoHackKind::CommentEol,
            Class::CommentBlock => DecoHackKind::CommentMultiline,
            Class::CommentDoc => DecoHackKind::CommentDoc,
            Class::String => DecoHackKind::String,
            Class::Backquote => DecoHackKind::Backquote,
            Class::ErrorString => DecoHackKind::ErrorString,
            Class::ErrorEscape => DecoHackKind::ErrorEscape,
            Class::Separator => DecoHackKind::Separator,
            Class::Operator => DecoHackKind::Operator,
            Class::Decimal => DecoHackKind::NumberDecimal,
            Class::Hex => DecoHackKind::NumberHex,
            Class::Float => DecoHackKind::NumberFloat,
            Class::ErrorNumber => DecoHackKind::ErrorNumber,
            Class::ErrorIdentifier => DecoHackKind::ErrorIdentifier,
            Class::Identifier => DecoHackKind::Identifier,
            Class::Function => DecoHackKind::Function,
        }
    }
}

impl Tokenizer for DecoHackLexer {
    type Kind = DecoHackKind;
    type State = DecoHackState;

    fn tokenize(
        &self,
        segment: &str,
        initial: DecoHackState,
        document_offset: usize,
    ) -> TokenStream<DecoHackKind, DecoHackState> {
        drive(BraceMachine::<DecoHackLexer>::new(), segment, initial, document_offset)
    }

    fn words(&self) -> &'static WordMap<DecoHackKind> {
        &TABLES.words
    }
}
