//! WadMerge lexer.
//!
//! WadMerge scripts are one command per line: a command name followed by
//! whitespace-separated arguments. Script arguments (`$1`, `$name`) can
//! appear anywhere, including inside words and double-quoted strings, and
//! are split out as separate `Variable` tokens.

use dtk_util::{CasePolicy, WordMap};
use once_cell::sync::Lazy;

use super::brace::HEX_DIGITS;
use super::core::{drive, Emitter, Machine, Step};
use super::Tokenizer;
use crate::hyperlink::LinkPattern;
use crate::token::{Category, Continuation, LexError, TokenKind, TokenStream};

/// WadMerge token kinds. Codes 300-399.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum WadMergeKind {
    /// Spaces, tabs and line breaks.
    Whitespace = 300,
    /// `# ...`
    CommentEol = 301,
    /// Command names.
    ReservedWord = 302,
    /// Plain words: paths, symbols, lump names.
    Identifier = 303,
    /// `$1`, `$name`.
    Variable = 304,
    /// Digit runs.
    NumberDecimal = 305,
    /// Double-quoted strings, or the pieces of one around a variable.
    String = 306,
    /// Strings left open at the end of the line.
    ErrorString = 307,
    /// Strings containing a bad `\x` or `\u` escape.
    ErrorEscape = 308,
}

impl WadMergeKind {
    /// Every kind, in code order.
    pub const ALL: [WadMergeKind; 9] = [
        WadMergeKind::Whitespace,
        WadMergeKind::CommentEol,
        WadMergeKind::ReservedWord,
        WadMergeKind::Identifier,
        WadMergeKind::Variable,
        WadMergeKind::NumberDecimal,
        WadMergeKind::String,
        WadMergeKind::ErrorString,
        WadMergeKind::ErrorEscape,
    ];
}

impl TokenKind for WadMergeKind {
    fn code(self) -> u16 {
        self as u16
    }

    fn name(self) -> &'static str {
        match self {
            WadMergeKind::Whitespace => "Whitespace",
            WadMergeKind::CommentEol => "CommentEol",
            WadMergeKind::ReservedWord => "ReservedWord",
            WadMergeKind::Identifier => "Identifier",
            WadMergeKind::Variable => "Variable",
            WadMergeKind::NumberDecimal => "NumberDecimal",
            WadMergeKind::String => "String",
            WadMergeKind::ErrorString => "ErrorString",
            WadMergeKind::ErrorEscape => "ErrorEscape",
        }
    }

    fn category(self) -> Category {
        match self {
            WadMergeKind::Whitespace => Category::Whitespace,
            WadMergeKind::CommentEol => Category::Comment,
            WadMergeKind::ReservedWord => Category::ReservedWord,
            WadMergeKind::Identifier => Category::Identifier,
            WadMergeKind::Variable => Category::Variable,
            WadMergeKind::NumberDecimal => Category::Number,
            WadMergeKind::String => Category::String,
            WadMergeKind::ErrorString | WadMergeKind::ErrorEscape => Category::Error,
        }
    }

    fn error(self) -> Option<LexError> {
        match self {
            WadMergeKind::ErrorString => Some(LexError::UnterminatedString),
            WadMergeKind::ErrorEscape => Some(LexError::BadEscapeSequence),
            _ => None,
        }
    }

    fn link_pattern(self) -> Option<LinkPattern> {
        match self {
            WadMergeKind::CommentEol | WadMergeKind::String => Some(LinkPattern::Url),
            _ => None,
        }
    }
}

/// Continuation state of the WadMerge lexer.
///
/// WadMerge has no multi-line constructs, so every line starts neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WadMergeState {
    /// Nothing open.
    #[default]
    Neutral,
}

impl Continuation for WadMergeState {
    fn name(self) -> &'static str {
        "Neutral"
    }
}

const COMMANDS: &[&str] = &[
    "END",
    "CREATE",
    "CREATEFILE",
    "CLEAR",
    "DISCARD",
    "SAVE",
    "LOAD",
    "FINISH",
    "VALID",
    "MARKER",
    "DATEMARKER",
    "MERGE",
    "MERGEWAD",
    "MERGEFILE",
    "MERGEMAP",
    "MERGEMAPFILE",
    "MERGEDIR",
    "MERGESWANTBLS",
    "MERGEDEUTEXFILE",
    "MERGETEXTUREDIR",
];

static WORDS: Lazy<WordMap<WadMergeKind>> = Lazy::new(|| {
    WordMap::build(
        CasePolicy::Insensitive,
        COMMANDS.iter().map(|word| (*word, WadMergeKind::ReservedWord)),
    )
});

/// What an argument returns to once it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Host {
    Word,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arg {
    /// Just the `$`.
    Sigil,
    /// `$` and digits.
    Positional,
    /// `$` and a name.
    Named,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Neutral,
    Whitespace,
    Comment,
    Identifier,
    Decimal,
    String,
    Escape,
    EscapeDigits(u8),
    ErrorString,
    ErrorStringEscape,
    Argument(Host, Arg),
}

struct WadMergeMachine {
    scan: Scan,
}

impl WadMergeMachine {
    fn to(&mut self, scan: Scan) -> Step {
        self.scan = scan;
        Step::Consume
    }

    fn resolve(&self, text: &str) -> WadMergeKind {
        match self.scan {
            Scan::Neutral | Scan::Whitespace => WadMergeKind::Whitespace,
            Scan::Comment => WadMergeKind::CommentEol,
            Scan::Identifier => WORDS.get(text).unwrap_or(WadMergeKind::Identifier),
            Scan::Decimal => WadMergeKind::NumberDecimal,
            Scan::String | Scan::Escape | Scan::EscapeDigits(_) => WadMergeKind::ErrorString,
            Scan::ErrorString | Scan::ErrorStringEscape => WadMergeKind::ErrorEscape,
            Scan::Argument(..) => WadMergeKind::Variable,
        }
    }

    fn cut(&mut self, cx: &mut Emitter<'_, WadMergeKind>, then: Scan) -> Step {
        let kind = self.resolve(cx.pending());
        cx.emit(kind);
        self.scan = then;
        Step::Rewind
    }

    /// Ends the current run at a `$` and starts an argument there.
    ///
    /// The part of a string before the `$` is a finished piece, not an
    /// open string.
    fn split(&mut self, cx: &mut Emitter<'_, WadMergeKind>, host: Host) -> Step {
        let kind = match host {
            Host::String => WadMergeKind::String,
            Host::Word => self.resolve(cx.pending()),
        };
        cx.emit(kind);
        self.to(Scan::Argument(host, Arg::Sigil))
    }

    fn argument(
        &mut self,
        cx: &mut Emitter<'_, WadMergeKind>,
        host: Host,
        arg: Arg,
        c: char,
    ) -> Step {
        let next = match arg {
            Arg::Sigil if c.is_ascii_digit() => Some(Arg::Positional),
            Arg::Sigil if c.is_alphabetic() || c == '_' => Some(Arg::Named),
            Arg::Positional if c.is_ascii_digit() => Some(Arg::Positional),
            Arg::Named if c.is_alphanumeric() || c == '_' => Some(Arg::Named),
            _ => None,
        };
        if let Some(arg) = next {
            return self.to(Scan::Argument(host, arg));
        }

        let then = match host {
            Host::String => Scan::String,
            Host::Word if c.is_whitespace() => Scan::Neutral,
            Host::Word => Scan::Identifier,
        };
        self.cut(cx, then)
    }
}

impl Machine for WadMergeMachine {
    type Kind = WadMergeKind;
    type State = WadMergeState;

    fn whitespace() -> WadMergeKind {
        WadMergeKind::Whitespace
    }

    fn resume(&mut self, _state: WadMergeState) {
        self.scan = Scan::Neutral;
    }

    fn step(&mut self, cx: &mut Emitter<'_, WadMergeKind>, c: char) -> Step {
        match self.scan {
            Scan::Neutral => self.to(match c {
                '#' => Scan::Comment,
                c if c.is_whitespace() => Scan::Whitespace,
                '"' => Scan::String,
                '$' => Scan::Argument(Host::Word, Arg::Sigil),
                c if c.is_ascii_digit() => Scan::Decimal,
                _ => Scan::Identifier,
            }),

            Scan::Whitespace if c.is_whitespace() => Step::Consume,
            Scan::Whitespace => self.cut(cx, Scan::Neutral),

            Scan::Comment => Step::Consume,

            Scan::Identifier | Scan::Decimal if c.is_whitespace() => self.cut(cx, Scan::Neutral),
            Scan::Identifier | Scan::Decimal if c == '$' => self.split(cx, Host::Word),
            Scan::Identifier => Step::Consume,
            Scan::Decimal if c.is_ascii_digit() => Step::Consume,
            Scan::Decimal => self.to(Scan::Identifier),

            Scan::String => match c {
                '\\' => self.to(Scan::Escape),
                '"' => {
                    cx.emit_through(WadMergeKind::String, c);
                    self.to(Scan::Neutral)
                },
                '$' => self.split(cx, Host::String),
                _ => Step::Consume,
            },
            Scan::Escape => match c {
                'x' | 'X' => self.to(Scan::EscapeDigits(2)),
                'u' | 'U' => self.to(Scan::EscapeDigits(4)),
                _ => self.to(Scan::String),
            },
            Scan::EscapeDigits(left) if HEX_DIGITS.contains(c) => self.to(if left > 1 {
                Scan::EscapeDigits(left - 1)
            } else {
                Scan::String
            }),
            Scan::EscapeDigits(_) => {
                self.scan = Scan::ErrorString;
                Step::Rewind
            },
            Scan::ErrorString => match c {
                '"' => {
                    cx.emit_through(WadMergeKind::ErrorEscape, c);
                    self.to(Scan::Neutral)
                },
                '\\' => self.to(Scan::ErrorStringEscape),
                _ => Step::Consume,
            },
            Scan::ErrorStringEscape => self.to(Scan::ErrorString),

            Scan::Argument(host, arg) => self.argument(cx, host, arg, c),
        }
    }

    fn finish(&mut self, cx: &mut Emitter<'_, WadMergeKind>) -> WadMergeState {
        // An argument that ends the line inside a string leaves the string open.
        let kind = match self.scan {
            Scan::Argument(Host::String, _) => WadMergeKind::ErrorString,
            _ => self.resolve(cx.pending()),
        };
        cx.emit(kind);
        self.scan = Scan::Neutral;
        WadMergeState::Neutral
    }
}

/// Tokenizer for WadMerge scripts.
///
/// # Example
///
/// ```
/// use dtk_lex::{Tokenizer, WadMergeKind, WadMergeLexer, WadMergeState};
///
/// let text = "mergewad out $1";
/// let stream = WadMergeLexer.tokenize(text, WadMergeState::Neutral, 0);
/// let last = stream.tokens().last().unwrap();
/// assert_eq!(last.kind, WadMergeKind::Variable);
/// assert_eq!(last.text(text), "$1");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WadMergeLexer;

impl Tokenizer for WadMergeLexer {
    type Kind = WadMergeKind;
    type State = WadMergeState;

    fn tokenize(
        &self,
        segment: &str,
        initial: WadMergeState,
        document_offset: usize,
    ) -> TokenStream<WadMergeKind, WadMergeState> {
        let machine = WadMergeMachine {
            scan: Scan::Neutral,
        };
        drive(machine, segment, initial, document_offset)
    }

    fn words(&self) -> &'static WordMap<WadMergeKind> {
        &WORDS
    }
}
