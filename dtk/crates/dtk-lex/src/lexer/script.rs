//! Script lexer.
//!
//! RookScript, WadScript and DoomMake scripts share one grammar and one
//! lexer. Compared to DecoHack the operator set is much larger, numbers may
//! carry an exponent and strings accept `\u` escapes.

use dtk_util::{Alphabet, CasePolicy, WordMap};
use once_cell::sync::Lazy;

use super::brace::{BraceMachine, BraceState, BraceTables, Class, Dialect};
use super::core::drive;
use super::Tokenizer;
use crate::hyperlink::LinkPattern;
use crate::token::{Category, LexError, TokenKind, TokenStream};

/// Continuation state of the script lexer.
pub type ScriptState = BraceState;

/// Script token kinds. Codes 200-299.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum ScriptKind {
    /// Spaces, tabs and line breaks.
    Whitespace = 200,
    /// `// ...`
    CommentEol = 201,
    /// `/* ... */`
    CommentMultiline = 202,
    /// `/** ... */`
    CommentDoc = 203,
    /// `#` directives.
    Preprocessor = 204,
    /// Keywords.
    ReservedWord = 205,
    /// Names.
    Identifier = 206,
    /// Known operators.
    Operator = 207,
    /// Brackets and punctuation runs that are not operators.
    Separator = 208,
    /// Decimal integers and `null`.
    NumberDecimal = 209,
    /// `0x` integers.
    NumberHex = 210,
    /// Fractions, exponents, `infinity` and `nan`.
    NumberFloat = 211,
    /// `true` and `false`.
    Boolean = 212,
    /// Double-quoted strings.
    String = 213,
    /// Backquoted strings.
    Backquote = 214,
    /// Malformed numbers.
    ErrorNumber = 215,
    /// Strings left open at the end of the line.
    ErrorString = 216,
    /// Strings containing a bad `\x` or `\u` escape.
    ErrorEscape = 217,
    /// Names starting with an invalid character sequence.
    ErrorIdentifier = 218,
}

impl ScriptKind {
    /// Every kind, in code order.
    pub const ALL: [ScriptKind; 19] = [
        ScriptKind::Whitespace,
        ScriptKind::CommentEol,
        ScriptKind::CommentMultiline,
        ScriptKind::CommentDoc,
        ScriptKind::Preprocessor,
        ScriptKind::ReservedWord,
        ScriptKind::Identifier,
        ScriptKind::Operator,
        ScriptKind::Separator,
        ScriptKind::NumberDecimal,
        ScriptKind::NumberHex,
        ScriptKind::NumberFloat,
        ScriptKind::Boolean,
        ScriptKind::String,
        ScriptKind::Backquote,
        ScriptKind::ErrorNumber,
        ScriptKind::ErrorString,
        ScriptKind::ErrorEscape,
        ScriptKind::ErrorIdentifier,
    ];
}

impl TokenKind for ScriptKind {
    fn code(self) -> u16 {
        self as u16
    }

    fn name(self) -> &'static str {
        match self {
            ScriptKind::Whitespace => "Whitespace",
            ScriptKind::CommentEol => "CommentEol",
            ScriptKind::CommentMultiline => "CommentMultiline",
            ScriptKind::CommentDoc => "CommentDoc",
            ScriptKind::Preprocessor => "Preprocessor",
            ScriptKind::ReservedWord => "ReservedWord",
            ScriptKind::Identifier => "Identifier",
            ScriptKind::Operator => "Operator",
            ScriptKind::Separator => "Separator",
            ScriptKind::NumberDecimal => "NumberDecimal",
            ScriptKind::NumberHex => "NumberHex",
            ScriptKind::NumberFloat => "NumberFloat",
            ScriptKind::Boolean => "Boolean",
            ScriptKind::String => "String",
            ScriptKind::Backquote => "Backquote",
            ScriptKind::ErrorNumber => "ErrorNumber",
            ScriptKind::ErrorString => "ErrorString",
            ScriptKind::ErrorEscape => "ErrorEscape",
            ScriptKind::ErrorIdentifier => "ErrorIdentifier",
        }
    }

    fn category(self) -> Category {
        match self {
            ScriptKind::Whitespace => Category::Whitespace,
            ScriptKind::CommentEol | ScriptKind::CommentMultiline => Category::Comment,
            ScriptKind::CommentDoc => Category::DocComment,
            ScriptKind::Preprocessor => Category::Preprocessor,
            ScriptKind::ReservedWord => Category::ReservedWord,
            ScriptKind::Identifier => Category::Identifier,
            ScriptKind::Operator => Category::Operator,
            ScriptKind::Separator => Category::Separator,
            ScriptKind::NumberDecimal | ScriptKind::NumberHex | ScriptKind::NumberFloat => {
                Category::Number
            },
            ScriptKind::Boolean => Category::Boolean,
            ScriptKind::String | ScriptKind::Backquote => Category::String,
            ScriptKind::ErrorNumber
            | ScriptKind::ErrorString
            | ScriptKind::ErrorEscape
            | ScriptKind::ErrorIdentifier => Category::Error,
        }
    }

    fn error(self) -> Option<LexError> {
        match self {
            ScriptKind::ErrorNumber => Some(LexError::MalformedNumber),
            ScriptKind::ErrorString => Some(LexError::UnterminatedString),
            ScriptKind::ErrorEscape => Some(LexError::BadEscapeSequence),
            ScriptKind::ErrorIdentifier => Some(LexError::UnterminatedIdentifierChar),
            _ => None,
        }
    }

    fn link_pattern(self) -> Option<LinkPattern> {
        match self {
            ScriptKind::Preprocessor => Some(LinkPattern::QuotedPath),
            ScriptKind::CommentEol
            | ScriptKind::CommentMultiline
            | ScriptKind::CommentDoc
            | ScriptKind::String
            | ScriptKind::Backquote => Some(LinkPattern::Url),
            _ => None,
        }
    }
}

const KEYWORDS: &[&str] = &[
    "if", "else", "return", "while", "for", "each", "entry", "function", "break", "continue",
    "check",
];

const OPERATORS: &[&str] = &[
    "+", "-", "!", "~", "*", "/", "%", "&", "&&", "|", "||", "^", "=", "==", "!=", "===", "!==",
    "<", ">", "<<", ">>", ">>>", "?", ":", "?:", "??", "+=", "-=", "*=", "/=", "%=", "&=", "|=",
    ">>=", "<<=", ">>>=", ";", "::", "->", ",", ".",
];

static TABLES: Lazy<BraceTables<ScriptKind>> = Lazy::new(|| BraceTables {
    separators: Alphabet::new("[]{}()"),
    delimiters: Alphabet::new("[]{}(),.!~+-*/%&|^=<>\"`:;?"),
    operators: OPERATORS.iter().copied().collect(),
    words: WordMap::build(
        CasePolicy::Insensitive,
        KEYWORDS
            .iter()
            .map(|word| (*word, ScriptKind::ReservedWord))
            .chain([
                ("null", ScriptKind::NumberDecimal),
                ("true", ScriptKind::Boolean),
                ("false", ScriptKind::Boolean),
                ("infinity", ScriptKind::NumberFloat),
                ("nan", ScriptKind::NumberFloat),
            ]),
    ),
});

/// Tokenizer for RookScript, WadScript and DoomMake scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptLexer;

impl Dialect for ScriptLexer {
    type Kind = ScriptKind;

    const EXPONENTS: bool = true;
    const UNICODE_ESCAPES: bool = true;
    const FUNCTION_PREFIX: Option<&'static str> = None;

    fn tables() -> &'static BraceTables<ScriptKind> {
        &TABLES
    }

    fn kind(class: Class) -> ScriptKind {
        match class {
            Class::Whitespace => ScriptKind::Whitespace,
            Class::Preprocessor => ScriptKind::Preprocessor,
            Class::CommentEol => ScriptKind::CommentEol,
            Class::CommentBlock => ScriptKind::CommentMultiline,
            Class::CommentDoc => ScriptKind::CommentDoc,
            Class::String => ScriptKind::String,
            Class::Backquote => ScriptKind::Backquote,
            Class::ErrorString => ScriptKind::ErrorString,
            Class::ErrorEscape => ScriptKind::ErrorEscape,
            Class::Separator => ScriptKind::Separator,
            Class::Operator => ScriptKind::Operator,
            Class::Decimal => ScriptKind::NumberDecimal,
            Class::Hex => ScriptKind::NumberHex,
            Class::Float => ScriptKind::NumberFloat,
            Class::ErrorNumber => ScriptKind::ErrorNumber,
            Class::ErrorIdentifier => ScriptKind::ErrorIdentifier,
            // scripts have no function-name heuristic
            Class::Identifier | Class::Function => ScriptKind::Identifier,
        }
    }
}

impl Tokenizer for ScriptLexer {
    type Kind = ScriptKind;
    type State = ScriptState;

    fn tokenize(
        &self,
        segment: &str,
        initial: ScriptState,
        document_offset: usize,
    ) -> TokenStream<ScriptKind, ScriptState> {
        drive(BraceMachine::<ScriptLexer>::new(), segment, initial, document_offset)
    }

    fn words(&self) -> &'static WordMap<ScriptKind> {
        &TABLES.words
    }
}
