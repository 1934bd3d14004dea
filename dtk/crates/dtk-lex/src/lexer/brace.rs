//! State machine for the C-like languages.
//!
//! DecoHack and the script languages share one scanner: `//`, `/* */` and
//! `/** */` comments, `#` preprocessor lines with backslash continuation,
//! double-quoted strings with hex escapes, backquoted strings, numbers with
//! a `0x` prefix and punctuation runs that resolve to operators or
//! separators. A [`Dialect`] supplies the tables and switches the optional
//! features (exponents, `\u` escapes, function-name prefix).

use std::marker::PhantomData;

use dtk_util::{Alphabet, FxHashSet, WordMap};
use once_cell::sync::Lazy;

use super::core::{Emitter, Machine, Step};
use crate::token::{Continuation, TokenKind};

pub(crate) static HEX_DIGITS: Lazy<Alphabet> =
    Lazy::new(|| Alphabet::new("0123456789abcdefABCDEF"));

/// Where a brace-language line starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BraceState {
    /// Nothing open.
    #[default]
    Neutral,
    /// The previous line was a preprocessor line ending in `\`.
    Preprocessor,
    /// Inside a backquoted string.
    Backquote,
    /// Inside a `/* */` comment.
    BlockComment,
    /// Inside a `/** */` comment.
    DocComment,
}

impl Continuation for BraceState {
    fn name(self) -> &'static str {
        match self {
            BraceState::Neutral => "Neutral",
            BraceState::Preprocessor => "Preprocessor",
            BraceState::Backquote => "Backquote",
            BraceState::BlockComment => "BlockComment",
            BraceState::DocComment => "DocComment",
        }
    }
}

/// Language-independent token classes a brace dialect maps onto its kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Class {
    Whitespace,
    Preprocessor,
    CommentEol,
    CommentBlock,
    CommentDoc,
    String,
    Backquote,
    ErrorString,
    ErrorEscape,
    Separator,
    Operator,
    Decimal,
    Hex,
    Float,
    ErrorNumber,
    ErrorIdentifier,
    Identifier,
    Function,
}

/// Immutable per-dialect tables.
pub(crate) struct BraceTables<K> {
    /// Single-character separators, emitted on sight.
    pub separators: Alphabet,
    /// Characters that end identifiers and numbers.
    pub delimiters: Alphabet,
    /// Punctuation runs that are operators rather than separators.
    pub operators: FxHashSet<&'static str>,
    /// Reserved words and literal constants.
    pub words: WordMap<K>,
}

pub(crate) trait Dialect {
    type Kind: TokenKind;

    /// Whether numbers take an `e` exponent.
    const EXPONENTS: bool;
    /// Whether strings accept `\u` escapes.
    const UNICODE_ESCAPES: bool;
    /// Case-insensitive prefix marking unknown identifiers as functions.
    const FUNCTION_PREFIX: Option<&'static str>;

    fn tables() -> &'static BraceTables<Self::Kind>;

    fn kind(class: Class) -> Self::Kind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Neutral,
    Whitespace,
    Preprocessor,
    PreprocessorContinued,
    Backquote,
    MaybeComment,
    CommentEol,
    MaybeDoc,
    Block,
    BlockStar,
    Doc,
    DocStar,
    String,
    Escape,
    EscapeDigits(u8),
    ErrorString,
    ErrorStringEscape,
    MaybeDelimiter,
    MaybeNumeric,
    HexPrefix,
    Decimal,
    Hex,
    Float,
    ExponentMark,
    ExponentSign,
    Exponent,
    ErrorNumber,
    ErrorIdentifier,
    Identifier,
}

pub(crate) struct BraceMachine<D> {
    scan: Scan,
    dialect: PhantomData<D>,
}

impl<D: Dialect> BraceMachine<D> {
    pub(crate) fn new() -> Self {
        Self {
            scan: Scan::Neutral,
            dialect: PhantomData,
        }
    }

    fn is_break(c: char) -> bool {
        c.is_whitespace() || D::tables().delimiters.contains(c)
    }

    /// Moves to `scan` and consumes the character.
    fn to(&mut self, scan: Scan) -> Step {
        self.scan = scan;
        Step::Consume
    }

    /// Emits the pending run and sees the character again from neutral.
    fn cut(&mut self, cx: &mut Emitter<'_, D::Kind>) -> Step {
        let kind = self.resolve(cx.pending());
        cx.emit(kind);
        self.scan = Scan::Neutral;
        Step::Rewind
    }

    /// Emits the pending run including `c` and returns to neutral.
    fn close(&mut self, cx: &mut Emitter<'_, D::Kind>, class: Class, c: char) -> Step {
        cx.emit_through(D::kind(class), c);
        self.scan = Scan::Neutral;
        Step::Consume
    }

    /// The kind of the pending run if it were cut in the current state.
    fn resolve(&self, text: &str) -> D::Kind {
        let class = match self.scan {
            Scan::Neutral | Scan::Whitespace => Class::Whitespace,
            Scan::Preprocessor | Scan::PreprocessorContinued => Class::Preprocessor,
            Scan::Backquote => Class::Backquote,
            Scan::MaybeComment => Class::Operator,
            Scan::CommentEol => Class::CommentEol,
            Scan::MaybeDoc | Scan::Block | Scan::BlockStar => Class::CommentBlock,
            Scan::Doc | Scan::DocStar => Class::CommentDoc,
            Scan::String | Scan::Escape | Scan::EscapeDigits(_) => Class::ErrorString,
            Scan::ErrorString | Scan::ErrorStringEscape => Class::ErrorEscape,
            Scan::MaybeDelimiter if D::tables().operators.contains(text) => Class::Operator,
            Scan::MaybeDelimiter => Class::Separator,
            Scan::MaybeNumeric | Scan::Decimal => Class::Decimal,
            Scan::Hex => Class::Hex,
            Scan::Float | Scan::Exponent => Class::Float,
            Scan::HexPrefix | Scan::ExponentMark | Scan::ExponentSign | Scan::ErrorNumber => {
                Class::ErrorNumber
            },
            Scan::ErrorIdentifier => Class::ErrorIdentifier,
            Scan::Identifier => return Self::identifier(text),
        };
        D::kind(class)
    }

    fn identifier(text: &str) -> D::Kind {
        if let Some(kind) = D::tables().words.get(text) {
            return kind;
        }
        let is_function = D::FUNCTION_PREFIX.is_some_and(|prefix| {
            text.get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        });
        D::kind(if is_function {
            Class::Function
        } else {
            Class::Identifier
        })
    }

    fn neutral(&mut self, cx: &mut Emitter<'_, D::Kind>, c: char) -> Step {
        let tables = D::tables();
        let scan = match c {
            '#' => Scan::Preprocessor,
            c if c.is_whitespace() => Scan::Whitespace,
            '"' => Scan::String,
            '`' => Scan::Backquote,
            '/' => Scan::MaybeComment,
            c if tables.separators.contains(c) => return self.close(cx, Class::Separator, c),
            c if tables.delimiters.contains(c) => Scan::MaybeDelimiter,
            '0' => Scan::MaybeNumeric,
            c if c.is_ascii_digit() => Scan::Decimal,
            _ => Scan::Identifier,
        };
        self.to(scan)
    }

    /// Shared tail of the number states. A break ends the number and any
    /// other non-digit spoils it.
    fn number(
        &mut self,
        cx: &mut Emitter<'_, D::Kind>,
        c: char,
        digits: fn(char) -> bool,
    ) -> Step {
        if digits(c) {
            Step::Consume
        } else if Self::is_break(c) {
            self.cut(cx)
        } else {
            self.to(Scan::ErrorNumber)
        }
    }

    fn exponent_start(c: char) -> bool {
        D::EXPONENTS && matches!(c, 'e' | 'E')
    }
}

impl<D: Dialect> Machine for BraceMachine<D> {
    type Kind = D::Kind;
    type State = BraceState;

    fn whitespace() -> D::Kind {
        D::kind(Class::Whitespace)
    }

    fn resume(&mut self, state: BraceState) {
        self.scan = match state {
            BraceState::Neutral => Scan::Neutral,
            BraceState::Preprocessor => Scan::Preprocessor,
            BraceState::Backquote => Scan::Backquote,
            BraceState::BlockComment => Scan::Block,
            BraceState::DocComment => Scan::Doc,
        };
    }

    fn step(&mut self, cx: &mut Emitter<'_, D::Kind>, c: char) -> Step {
        match self.scan {
            Scan::Neutral => self.neutral(cx, c),

            Scan::Whitespace if c.is_whitespace() => Step::Consume,
            Scan::Whitespace => self.cut(cx),

            Scan::Preprocessor if c == '\\' => self.to(Scan::PreprocessorContinued),
            Scan::Preprocessor => Step::Consume,
            Scan::PreprocessorContinued if c.is_whitespace() => Step::Consume,
            Scan::PreprocessorContinued => self.to(Scan::Preprocessor),

            Scan::Backquote if c == '`' => self.close(cx, Class::Backquote, c),
            Scan::Backquote => Step::Consume,

            Scan::MaybeComment => match c {
                '*' => self.to(Scan::MaybeDoc),
                '/' => self.to(Scan::CommentEol),
                _ => self.cut(cx),
            },
            Scan::CommentEol => Step::Consume,
            Scan::MaybeDoc if c == '*' => self.to(Scan::DocStar),
            Scan::MaybeDoc => self.to(Scan::Block),
            Scan::Block if c == '*' => self.to(Scan::BlockStar),
            Scan::Block => Step::Consume,
            Scan::BlockStar => match c {
                '/' => self.close(cx, Class::CommentBlock, c),
                '*' => Step::Consume,
                _ => self.to(Scan::Block),
            },
            Scan::Doc if c == '*' => self.to(Scan::DocStar),
            Scan::Doc => Step::Consume,
            Scan::DocStar => match c {
                '/' => self.close(cx, Class::CommentDoc, c),
                '*' => Step::Consume,
                _ => self.to(Scan::Doc),
            },

            Scan::String => match c {
                '\\' => self.to(Scan::Escape),
                '"' => self.close(cx, Class::String, c),
                _ => Step::Consume,
            },
            Scan::Escape => match c {
                'x' | 'X' => self.to(Scan::EscapeDigits(2)),
                'u' | 'U' if D::UNICODE_ESCAPES => self.to(Scan::EscapeDigits(4)),
                _ => self.to(Scan::String),
            },
            Scan::EscapeDigits(left) if HEX_DIGITS.contains(c) => {
                self.to(if left > 1 {
                    Scan::EscapeDigits(left - 1)
                } else {
                    Scan::String
                })
            },
            Scan::EscapeDigits(_) => {
                self.scan = Scan::ErrorString;
                Step::Rewind
            },
            Scan::ErrorString => match c {
                '"' => self.close(cx, Class::ErrorEscape, c),
                '\\' => self.to(Scan::ErrorStringEscape),
                _ => Step::Consume,
            },
            Scan::ErrorStringEscape => self.to(Scan::ErrorString),

            Scan::MaybeDelimiter => {
                let tables = D::tables();
                let extends = tables.delimiters.contains(c)
                    && !tables.separators.contains(c)
                    && !matches!(c, '"' | '`' | '/');
                if extends {
                    Step::Consume
                } else {
                    self.cut(cx)
                }
            },

            Scan::MaybeNumeric => match c {
                'x' | 'X' => self.to(Scan::HexPrefix),
                '.' => self.to(Scan::Float),
                c if Self::is_break(c) => self.cut(cx),
                c if c.is_ascii_digit() => self.to(Scan::Decimal),
                _ => self.to(Scan::ErrorIdentifier),
            },
            Scan::HexPrefix if HEX_DIGITS.contains(c) => self.to(Scan::Hex),
            Scan::HexPrefix => self.number(cx, c, |_| false),
            Scan::Decimal if Self::exponent_start(c) => self.to(Scan::ExponentMark),
            Scan::Decimal if c == '.' => self.to(Scan::Float),
            Scan::Decimal => self.number(cx, c, |c| c.is_ascii_digit()),
            Scan::Hex => self.number(cx, c, |c| HEX_DIGITS.contains(c)),
            Scan::Float if Self::exponent_start(c) => self.to(Scan::ExponentMark),
            Scan::Float => self.number(cx, c, |c| c.is_ascii_digit()),
            Scan::ExponentMark if matches!(c, '+' | '-') => self.to(Scan::ExponentSign),
            Scan::ExponentMark | Scan::ExponentSign if c.is_ascii_digit() => {
                self.to(Scan::Exponent)
            },
            Scan::ExponentMark | Scan::ExponentSign => self.number(cx, c, |_| false),
            Scan::Exponent => self.number(cx, c, |c| c.is_ascii_digit()),

            Scan::ErrorNumber | Scan::ErrorIdentifier | Scan::Identifier => {
                if Self::is_break(c) {
                    self.cut(cx)
                } else {
                    Step::Consume
                }
            },
        }
    }

    fn finish(&mut self, cx: &mut Emitter<'_, D::Kind>) -> BraceState {
        let next = match self.scan {
            Scan::PreprocessorContinued => BraceState::Preprocessor,
            Scan::Backquote => BraceState::Backquote,
            Scan::MaybeDoc | Scan::Block | Scan::BlockStar => BraceState::BlockComment,
            Scan::Doc | Scan::DocStar => BraceState::DocComment,
            _ => BraceState::Neutral,
        };
        let kind = self.resolve(cx.pending());
        cx.emit(kind);
        self.scan = Scan::Neutral;
        next
    }
}
