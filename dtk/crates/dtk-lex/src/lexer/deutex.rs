//! DEUTex texture definition lexer.
//!
//! A texture line names a texture and its size; the patch lines under it
//! start with `*` and name a patch and its offsets:
//!
//! ```text
//! ; comment
//! AASTINKY        24      72
//! *       AASHITTY        0       0
//! ```

use dtk_util::{Alphabet, CasePolicy, WordMap};
use once_cell::sync::Lazy;

use super::core::{drive, Emitter, Machine, Step};
use super::Tokenizer;
use crate::hyperlink::LinkPattern;
use crate::token::{Category, Continuation, LexError, TokenKind, TokenStream};

/// DEUTex token kinds. Codes 400-499.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum DeuTexKind {
    /// Spaces, tabs and line breaks.
    Whitespace = 400,
    /// `; ...`
    CommentEol = 401,
    /// The leading `*` of a patch line.
    PatchMarker = 402,
    /// Sizes and offsets.
    NumberDecimal = 403,
    /// A name on a texture line.
    TextureName = 404,
    /// A name on a patch line.
    PatchName = 405,
    /// Digits followed by something that is not a name character.
    ErrorNumber = 406,
    /// Anything else.
    ErrorIdentifier = 407,
}

impl DeuTexKind {
    /// Every kind, in code order.
    pub const ALL: [DeuTexKind; 8] = [
        DeuTexKind::Whitespace,
        DeuTexKind::CommentEol,
        DeuTexKind::PatchMarker,
        DeuTexKind::NumberDecimal,
        DeuTexKind::TextureName,
        DeuTexKind::PatchName,
        DeuTexKind::ErrorNumber,
        DeuTexKind::ErrorIdentifier,
    ];
}

impl TokenKind for DeuTexKind {
    fn code(self) -> u16 {
        self as u16
    }

    fn name(self) -> &'static str {
        match self {
            DeuTexKind::Whitespace => "Whitespace",
            DeuTexKind::CommentEol => "CommentEol",
            DeuTexKind::PatchMarker => "PatchMarker",
            DeuTexKind::NumberDecimal => "NumberDecimal",
            DeuTexKind::TextureName => "TextureName",
            DeuTexKind::PatchName => "PatchName",
            DeuTexKind::ErrorNumber => "ErrorNumber",
            DeuTexKind::ErrorIdentifier => "ErrorIdentifier",
        }
    }

    fn category(self) -> Category {
        match self {
            DeuTexKind::Whitespace => Category::Whitespace,
            DeuTexKind::CommentEol => Category::Comment,
            DeuTexKind::PatchMarker => Category::Operator,
            DeuTexKind::NumberDecimal => Category::Number,
            DeuTexKind::TextureName | DeuTexKind::PatchName => Category::Identifier,
            DeuTexKind::ErrorNumber | DeuTexKind::ErrorIdentifier => Category::Error,
        }
    }

    fn error(self) -> Option<LexError> {
        match self {
            DeuTexKind::ErrorNumber => Some(LexError::MalformedNumber),
            DeuTexKind::ErrorIdentifier => Some(LexError::UnterminatedIdentifierChar),
            _ => None,
        }
    }

    fn link_pattern(self) -> Option<LinkPattern> {
        (self == DeuTexKind::CommentEol).then_some(LinkPattern::Url)
    }
}

/// Continuation state of the DEUTex lexer. Every line starts neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeuTexState {
    /// Nothing open.
    #[default]
    Neutral,
}

impl Continuation for DeuTexState {
    fn name(self) -> &'static str {
        "Neutral"
    }
}

static NAME_CHARS: Lazy<Alphabet> =
    Lazy::new(|| Alphabet::new("0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^+-_"));

static WORDS: Lazy<WordMap<DeuTexKind>> = Lazy::new(|| WordMap::empty(CasePolicy::Insensitive));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Neutral,
    Whitespace,
    Comment,
    PatchMarker,
    Decimal,
    Name,
    ErrorNumber,
    ErrorIdentifier,
}

struct DeuTexMachine {
    scan: Scan,
    patch_line: bool,
}

impl DeuTexMachine {
    fn to(&mut self, scan: Scan) -> Step {
        self.scan = scan;
        Step::Consume
    }

    fn resolve(&self) -> DeuTexKind {
        match self.scan {
            Scan::Neutral | Scan::Whitespace => DeuTexKind::Whitespace,
            Scan::Comment => DeuTexKind::CommentEol,
            Scan::PatchMarker => DeuTexKind::PatchMarker,
            Scan::Decimal => DeuTexKind::NumberDecimal,
            Scan::Name if self.patch_line => DeuTexKind::PatchName,
            Scan::Name => DeuTexKind::TextureName,
            Scan::ErrorNumber => DeuTexKind::ErrorNumber,
            Scan::ErrorIdentifier => DeuTexKind::ErrorIdentifier,
        }
    }

    fn cut(&mut self, cx: &mut Emitter<'_, DeuTexKind>) -> Step {
        cx.emit(self.resolve());
        self.scan = Scan::Neutral;
        Step::Rewind
    }
}

impl Machine for DeuTexMachine {
    type Kind = DeuTexKind;
    type State = DeuTexState;

    fn whitespace() -> DeuTexKind {
        DeuTexKind::Whitespace
    }

    fn resume(&mut self, _state: DeuTexState) {
        self.scan = Scan::Neutral;
        self.patch_line = false;
    }

    fn step(&mut self, cx: &mut Emitter<'_, DeuTexKind>, c: char) -> Step {
        let space = c.is_whitespace();
        match self.scan {
            Scan::Neutral => match c {
                ';' => self.to(Scan::Comment),
                '*' => {
                    self.patch_line = true;
                    self.to(Scan::PatchMarker)
                },
                c if c.is_whitespace() => self.to(Scan::Whitespace),
                c if c.is_ascii_digit() => self.to(Scan::Decimal),
                c if NAME_CHARS.contains(c) => self.to(Scan::Name),
                _ => self.to(Scan::ErrorIdentifier),
            },
            Scan::Whitespace if space => Step::Consume,
            Scan::Whitespace => self.cut(cx),
            Scan::Comment => Step::Consume,
            Scan::PatchMarker if space => self.cut(cx),
            Scan::PatchMarker => self.to(Scan::ErrorIdentifier),
            Scan::Decimal if space => self.cut(cx),
            Scan::Decimal if c.is_ascii_digit() => Step::Consume,
            Scan::Decimal if NAME_CHARS.contains(c) => self.to(Scan::Name),
            Scan::Decimal => self.to(Scan::ErrorNumber),
            Scan::Name if space || !NAME_CHARS.contains(c) => self.cut(cx),
            Scan::Name => Step::Consume,
            Scan::ErrorNumber | Scan::ErrorIdentifier if space => self.cut(cx),
            Scan::ErrorNumber | Scan::ErrorIdentifier => Step::Consume,
        }
    }

    fn finish(&mut self, cx: &mut Emitter<'_, DeuTexKind>) -> DeuTexState {
        cx.emit(self.resolve());
        self.scan = Scan::Neutral;
        self.patch_line = false;
        DeuTexState::Neutral
    }
}

/// Tokenizer for DEUTex texture definition files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeuTexLexer;

impl Tokenizer for DeuTexLexer {
    type Kind = DeuTexKind;
    type State = DeuTexState;

    fn tokenize(
        &self,
        segment: &str,
        initial: DeuTexState,
        document_offset: usize,
    ) -> TokenStream<DeuTexKind, DeuTexState> {
        let machine = DeuTexMachine {
            scan: Scan::Neutral,
            patch_line: false,
        };
        drive(machine, segment, initial, document_offset)
    }

    fn words(&self) -> &'static WordMap<DeuTexKind> {
        &WORDS
    }
}
