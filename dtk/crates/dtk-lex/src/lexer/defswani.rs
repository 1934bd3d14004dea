//! DEFSWANI lexer.
//!
//! Switch and animation lists are bracketed section headers followed by
//! whitespace-separated entries, one per line.

use dtk_util::{CasePolicy, WordMap};
use once_cell::sync::Lazy;

use super::core::{drive, Emitter, Machine, Step};
use super::Tokenizer;
use crate::hyperlink::LinkPattern;
use crate::token::{Category, Continuation, TokenKind, TokenStream};

/// DEFSWANI token kinds. Codes 500-599.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum DefSwAniKind {
    /// Spaces, tabs and line breaks.
    Whitespace = 500,
    /// `# ...`
    CommentEol = 501,
    /// Section headers.
    ReservedWord = 502,
    /// Texture, flat and game names.
    Identifier = 503,
    /// Tic counts.
    NumberDecimal = 504,
}

impl DefSwAniKind {
    /// Every kind, in code order.
    pub const ALL: [DefSwAniKind; 5] = [
        DefSwAniKind::Whitespace,
        DefSwAniKind::CommentEol,
        DefSwAniKind::ReservedWord,
        DefSwAniKind::Identifier,
        DefSwAniKind::NumberDecimal,
    ];
}

impl TokenKind for DefSwAniKind {
    fn code(self) -> u16 {
        self as u16
    }

    fn name(self) -> &'static str {
        match self {
            DefSwAniKind::Whitespace => "Whitespace",
            DefSwAniKind::CommentEol => "CommentEol",
            DefSwAniKind::ReservedWord => "ReservedWord",
            DefSwAniKind::Identifier => "Identifier",
            DefSwAniKind::NumberDecimal => "NumberDecimal",
        }
    }

    fn category(self) -> Category {
        match self {
            DefSwAniKind::Whitespace => Category::Whitespace,
            DefSwAniKind::CommentEol => Category::Comment,
            DefSwAniKind::ReservedWord => Category::ReservedWord,
            DefSwAniKind::Identifier => Category::Identifier,
            DefSwAniKind::NumberDecimal => Category::Number,
        }
    }

    fn link_pattern(self) -> Option<LinkPattern> {
        (self == DefSwAniKind::CommentEol).then_some(LinkPattern::Url)
    }
}

/// Continuation state of the DEFSWANI lexer. Every line starts neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DefSwAniState {
    /// Nothing open.
    #[default]
    Neutral,
}

impl Continuation for DefSwAniState {
    fn name(self) -> &'static str {
        "Neutral"
    }
}

static WORDS: Lazy<WordMap<DefSwAniKind>> = Lazy::new(|| {
    WordMap::build(
        CasePolicy::Insensitive,
        ["[SWITCHES]", "[FLATS]", "[TEXTURES]"]
            .into_iter()
            .map(|word| (word, DefSwAniKind::ReservedWord)),
    )
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Neutral,
    Whitespace,
    Comment,
    Decimal,
    Identifier,
}

struct DefSwAniMachine {
    scan: Scan,
}

impl DefSwAniMachine {
    fn resolve(&self, text: &str) -> DefSwAniKind {
        match self.scan {
            Scan::Neutral | Scan::Whitespace => DefSwAniKind::Whitespace,
            Scan::Comment => DefSwAniKind::CommentEol,
            Scan::Decimal => DefSwAniKind::NumberDecimal,
            Scan::Identifier => WORDS.get(text).unwrap_or(DefSwAniKind::Identifier),
        }
    }
}

impl Machine for DefSwAniMachine {
    type Kind = DefSwAniKind;
    type State = DefSwAniState;

    fn whitespace() -> DefSwAniKind {
        DefSwAniKind::Whitespace
    }

    fn resume(&mut self, _state: DefSwAniState) {
        self.scan = Scan::Neutral;
    }

    fn step(&mut self, cx: &mut Emitter<'_, DefSwAniKind>, c: char) -> Step {
        let space = c.is_whitespace();
        self.scan = match self.scan {
            Scan::Neutral if c == '#' => Scan::Comment,
            Scan::Neutral if space => Scan::Whitespace,
            Scan::Neutral if c.is_ascii_digit() => Scan::Decimal,
            Scan::Neutral => Scan::Identifier,
            Scan::Comment => Scan::Comment,
            Scan::Whitespace if space => Scan::Whitespace,
            Scan::Decimal if c.is_ascii_digit() => Scan::Decimal,
            Scan::Decimal | Scan::Identifier if !space => Scan::Identifier,
            Scan::Whitespace | Scan::Decimal | Scan::Identifier => {
                let kind = self.resolve(cx.pending());
                cx.emit(kind);
                self.scan = Scan::Neutral;
                return Step::Rewind;
            },
        };
        Step::Consume
    }

    fn finish(&mut self, cx: &mut Emitter<'_, DefSwAniKind>) -> DefSwAniState {
        let kind = self.resolve(cx.pending());
        cx.emit(kind);
        self.scan = Scan::Neutral;
        DefSwAniState::Neutral
    }
}

/// Tokenizer for DEFSWANI switch and animation lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefSwAniLexer;

impl Tokenizer for DefSwAniLexer {
    type Kind = DefSwAniKind;
    type State = DefSwAniState;

    fn tokenize(
        &self,
        segment: &str,
        initial: DefSwAniState,
        document_offset: usize,
    ) -> TokenStream<DefSwAniKind, DefSwAniState> {
        let machine = DefSwAniMachine {
            scan: Scan::Neutral,
        };
        drive(machine, segment, initial, document_offset)
    }

    fn words(&self) -> &'static WordMap<DefSwAniKind> {
        &WORDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DefSwAniKind::*;

    fn lex(text: &str) -> Vec<(DefSwAniKind, &str)> {
        DefSwAniLexer
            .tokenize(text, DefSwAniState::Neutral, 0)
            .iter()
            .map(|t| (t.kind, t.text(text)))
            .collect()
    }

    #[test]
    fn test_sections() {
        assert_eq!(lex("[SWITCHES]"), vec![(ReservedWord, "[SWITCHES]")]);
        assert_eq!(lex("[flats]"), vec![(ReservedWord, "[flats]")]);
        assert_eq!(lex("[Textures]"), vec![(ReservedWord, "[Textures]")]);
        assert_eq!(lex("[OTHER]"), vec![(Identifier, "[OTHER]")]);
    }

    #[test]
    fn test_animation_entry() {
        assert_eq!(
            lex("8 NUKAGE3 NUKAGE1"),
            vec![
                (NumberDecimal, "8"),
                (Whitespace, " "),
                (Identifier, "NUKAGE3"),
                (Whitespace, " "),
                (Identifier, "NUKAGE1"),
            ]
        );
    }

    #[test]
    fn test_digits_then_letters() {
        assert_eq!(lex("1SW"), vec![(Identifier, "1SW")]);
    }

    #[test]
    fn test_identifier_runs_to_whitespace() {
        assert_eq!(lex("SW1#2 x"), vec![
            (Identifier, "SW1#2"),
            (Whitespace, " "),
            (Identifier, "x"),
        ]);
    }

    #[test]
    fn test_comment() {
        assert_eq!(
            lex("3 # shareware"),
            vec![
                (NumberDecimal, "3"),
                (Whitespace, " "),
                (CommentEol, "# shareware"),
            ]
        );
    }

    #[test]
    fn test_codes_are_stable() {
        for (i, kind) in DefSwAniKind::ALL.iter().enumerate() {
            assert_eq!(kind.code(), 500 + i as u16);
        }
    }
}
