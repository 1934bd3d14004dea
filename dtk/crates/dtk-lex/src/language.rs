//! Language registry.
//!
//! [`Language`] names every supported language and maps file names and
//! extensions onto it. [`Language::tokenize`] is a type-erased entry point
//! for callers that pick the language at run time: kinds come back as
//! [`AnyKind`] and continuation states as [`LineState`].

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::hyperlink::LinkPattern;
use crate::lexer::{
    BraceState, DecoHackKind, DecoHackLexer, DefSwAniKind, DefSwAniLexer, DefSwAniState,
    DeuTexKind, DeuTexLexer, DeuTexState, ScriptKind, ScriptLexer, Tokenizer, WadMergeKind,
    WadMergeLexer, WadMergeState,
};
use crate::token::{Category, Continuation, LexError, TokenKind, TokenStream};

/// Error returned when a language name is not recognised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LanguageError {
    /// No language has this name or alias.
    #[error("unknown language '{0}'")]
    Unknown(String),
}

/// A supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    /// DECOHack patch files.
    DecoHack,
    /// RookScript.
    RookScript,
    /// WadScript.
    WadScript,
    /// DoomMake build scripts.
    DoomMake,
    /// WadMerge command scripts.
    WadMerge,
    /// DEUTex texture definitions.
    DeuTex,
    /// DEFSWANI switch and animation lists.
    DefSwAni,
}

impl Language {
    /// Every language, in registry order.
    pub const ALL: [Language; 7] = [
        Language::DecoHack,
        Language::RookScript,
        Language::WadScript,
        Language::DoomMake,
        Language::WadMerge,
        Language::DeuTex,
        Language::DefSwAni,
    ];

    /// Short lower-case name, accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Language::DecoHack => "decohack",
            Language::RookScript => "rookscript",
            Language::WadScript => "wadscript",
            Language::DoomMake => "doommake",
            Language::WadMerge => "wadmerge",
            Language::DeuTex => "deutex",
            Language::DefSwAni => "defswani",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::DecoHack => "DECOHack",
            Language::RookScript => "RookScript",
            Language::WadScript => "WadScript",
            Language::DoomMake => "DoomMake",
            Language::WadMerge => "WadMerge",
            Language::DeuTex => "DEUTex",
            Language::DefSwAni => "DefSwAni",
        }
    }

    /// Editor style key.
    pub fn style(self) -> &'static str {
        match self {
            Language::DecoHack => "text/decohack",
            Language::RookScript => "text/rookscript",
            Language::WadScript => "text/wadscript",
            Language::DoomMake => "text/doommake",
            Language::WadMerge => "text/wadmerge",
            Language::DeuTex => "text/deutex",
            Language::DefSwAni => "text/defswani",
        }
    }

    /// File extensions, without the dot.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Language::DecoHack => &["dh"],
            Language::RookScript => &["rscript"],
            Language::WadScript => &["wscr", "wscript", "wsx"],
            Language::DoomMake => &["script"],
            Language::WadMerge => &["wadmerge", "wadm"],
            Language::DeuTex | Language::DefSwAni => &[],
        }
    }

    /// Well-known file names.
    pub fn file_names(self) -> &'static [&'static str] {
        match self {
            Language::DoomMake => &[
                "doommake.script",
                "doommake-lib.script",
                "doommake-init.script",
            ],
            _ => &[],
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Language::DecoHack => &["dh", "deh"],
            Language::RookScript => &["rook", "rscript"],
            Language::WadScript => &["wscript", "wsx"],
            Language::DoomMake => &["make"],
            Language::WadMerge => &["wadm"],
            Language::DeuTex => &["texture", "textures"],
            Language::DefSwAni => &["swanim", "swantbls"],
        }
    }

    /// Looks a language up by file extension, ignoring case.
    pub fn from_extension(extension: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|language| {
            language
                .extensions()
                .iter()
                .any(|known| known.eq_ignore_ascii_case(extension))
        })
    }

    /// Looks a language up by well-known file name, ignoring case.
    pub fn from_file_name(file_name: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|language| {
            language
                .file_names()
                .iter()
                .any(|known| known.eq_ignore_ascii_case(file_name))
        })
    }

    /// Looks a language up by path: file name first, then extension.
    pub fn from_path(path: &Path) -> Option<Language> {
        let by_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(Language::from_file_name);
        by_name.or_else(|| {
            path.extension()
                .and_then(|extension| extension.to_str())
                .and_then(Language::from_extension)
        })
    }

    /// The state every document starts in.
    pub fn initial_state(self) -> LineState {
        LineState::Neutral
    }

    /// Every token kind this language produces, in code order.
    pub fn kinds(self) -> Vec<AnyKind> {
        match self {
            Language::DecoHack => erase_all(self, &DecoHackKind::ALL),
            Language::RookScript | Language::WadScript | Language::DoomMake => {
                erase_all(self, &ScriptKind::ALL)
            },
            Language::WadMerge => erase_all(self, &WadMergeKind::ALL),
            Language::DeuTex => erase_all(self, &DeuTexKind::ALL),
            Language::DefSwAni => erase_all(self, &DefSwAniKind::ALL),
        }
    }

    /// The word table, sorted by word.
    pub fn words(self) -> Vec<(&'static str, AnyKind)> {
        let mut words = match self {
            Language::DecoHack => erase_words(self, &DecoHackLexer),
            Language::RookScript | Language::WadScript | Language::DoomMake => {
                erase_words(self, &ScriptLexer)
            },
            Language::WadMerge => erase_words(self, &WadMergeLexer),
            Language::DeuTex => erase_words(self, &DeuTexLexer),
            Language::DefSwAni => erase_words(self, &DefSwAniLexer),
        };
        words.sort_unstable_by_key(|(word, _)| *word);
        words
    }

    /// Reserved words only, sorted.
    pub fn keywords(self) -> Vec<&'static str> {
        self.words()
            .into_iter()
            .filter(|(_, kind)| kind.category() == Category::ReservedWord)
            .map(|(word, _)| word)
            .collect()
    }

    /// Lexes `segment` with this language's tokenizer.
    ///
    /// A state that this language cannot be in is treated as neutral.
    ///
    /// ```
    /// use dtk_lex::{Language, LineState};
    ///
    /// let stream = Language::RookScript.tokenize("/* open", LineState::Neutral, 0);
    /// assert_eq!(stream.next_state(), LineState::BlockComment);
    ///
    /// let stream = Language::WadMerge.tokenize("x", LineState::BlockComment, 0);
    /// assert_eq!(stream.next_state(), LineState::Neutral);
    /// ```
    pub fn tokenize(
        self,
        segment: &str,
        initial: LineState,
        document_offset: usize,
    ) -> TokenStream<AnyKind, LineState> {
        match self {
            Language::DecoHack => erase(self, &DecoHackLexer, segment, initial, document_offset),
            Language::RookScript | Language::WadScript | Language::DoomMake => {
                erase(self, &ScriptLexer, segment, initial, document_offset)
            },
            Language::WadMerge => erase(self, &WadMergeLexer, segment, initial, document_offset),
            Language::DeuTex => erase(self, &DeuTexLexer, segment, initial, document_offset),
            Language::DefSwAni => erase(self, &DefSwAniLexer, segment, initial, document_offset),
        }
    }
}

fn erase<T>(
    language: Language,
    lexer: &T,
    segment: &str,
    initial: LineState,
    document_offset: usize,
) -> TokenStream<AnyKind, LineState>
where
    T: Tokenizer,
    T::State: From<LineState> + Into<LineState>,
{
    lexer
        .tokenize(segment, T::State::from(initial), document_offset)
        .map(|kind| AnyKind::of(language, kind), Into::into)
}

fn erase_all<K: TokenKind>(language: Language, kinds: &[K]) -> Vec<AnyKind> {
    kinds.iter().map(|&kind| AnyKind::of(language, kind)).collect()
}

fn erase_words<T: Tokenizer>(language: Language, lexer: &T) -> Vec<(&'static str, AnyKind)> {
    lexer
        .words()
        .iter()
        .map(|(word, kind)| (word, AnyKind::of(language, kind)))
        .collect()
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .into_iter()
            .find(|language| {
                language.name().eq_ignore_ascii_case(wanted)
                    || language.display_name().eq_ignore_ascii_case(wanted)
                    || language
                        .aliases()
                        .iter()
                        .any(|alias| alias.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| LanguageError::Unknown(s.to_string()))
    }
}

/// A token kind of any language.
///
/// Carries everything [`TokenKind`] exposes so reporting code does not need
/// to know the concrete enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnyKind {
    language: Language,
    code: u16,
    name: &'static str,
    category: Category,
    error: Option<LexError>,
    link: Option<LinkPattern>,
}

impl AnyKind {
    /// Erases a concrete kind.
    pub fn of<K: TokenKind>(language: Language, kind: K) -> Self {
        Self {
            language,
            code: kind.code(),
            name: kind.name(),
            category: kind.category(),
            error: kind.error(),
            link: kind.link_pattern(),
        }
    }

    /// The language the kind belongs to.
    pub fn language(self) -> Language {
        self.language
    }
}

impl TokenKind for AnyKind {
    fn code(self) -> u16 {
        self.code
    }

    fn name(self) -> &'static str {
        self.name
    }

    fn category(self) -> Category {
        self.category
    }

    fn error(self) -> Option<LexError> {
        self.error
    }

    fn link_pattern(self) -> Option<LinkPattern> {
        self.link
    }
}

impl fmt::Display for AnyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Continuation state of any language.
///
/// The variants are the union of every language's states. Languages that
/// only know `Neutral` read every other variant as `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineState {
    /// Nothing open.
    #[default]
    Neutral,
    /// Inside a continued preprocessor line.
    Preprocessor,
    /// Inside a backquoted string.
    Backquote,
    /// Inside a block comment.
    BlockComment,
    /// Inside a documentation comment.
    DocComment,
}

impl Continuation for LineState {
    fn name(self) -> &'static str {
        match self {
            LineState::Neutral => "Neutral",
            LineState::Preprocessor => "Preprocessor",
            LineState::Backquote => "Backquote",
            LineState::BlockComment => "BlockComment",
            LineState::DocComment => "DocComment",
        }
    }
}

impl fmt::Display for LineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Continuation::name(*self))
    }
}

impl From<BraceState> for LineState {
    fn from(state: BraceState) -> Self {
        match state {
            BraceState::Neutral => LineState::Neutral,
            BraceState::Preprocessor => LineState::Preprocessor,
            BraceState::Backquote => LineState::Backquote,
            BraceState::BlockComment => LineState::BlockComment,
            BraceState::DocComment => LineState::DocComment,
        }
    }
}

impl From<LineState> for BraceState {
    fn from(state: LineState) -> Self {
        match state {
            LineState::Neutral => BraceState::Neutral,
            LineState::Preprocessor => BraceState::Preprocessor,
            LineState::Backquote => BraceState::Backquote,
            LineState::BlockComment => BraceState::BlockComment,
            LineState::DocComment => BraceState::DocComment,
        }
    }
}

macro_rules! neutral_only {
    ($($state:ident),* $(,)?) => {
        $(
            impl From<$state> for LineState {
                fn from(_: $state) -> Self {
                    LineState::Neutral
                }
            }

            impl From<LineState> for $state {
                fn from(_: LineState) -> Self {
                    $state::Neutral
                }
            }
        )*
    };
}

neutral_only!(WadMergeState, DeuTexState, DefSwAniState);
