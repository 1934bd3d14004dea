//! Lexer module.
//!
//! This module organizes the lexers into smaller, focused components:
//! - `core` - Driver, emitter and the `Machine` contract
//! - `brace` - State machine shared by the C-like languages
//! - `decohack` - DecoHack patch files
//! - `script` - RookScript, WadScript and DoomMake scripts
//! - `wadmerge` - WadMerge command scripts
//! - `deutex` - DEUTex texture definitions
//! - `defswani` - DEFSWANI switch and animation lists

mod brace;
mod core;
mod decohack;
mod defswani;
mod deutex;
mod script;
mod wadmerge;

use dtk_util::WordMap;

use crate::token::{Continuation, TokenKind, TokenStream};

pub use brace::BraceState;
pub use decohack::{DecoHackKind, DecoHackLexer, DecoHackState};
pub use defswani::{DefSwAniKind, DefSwAniLexer, DefSwAniState};
pub use deutex::{DeuTexKind, DeuTexLexer, DeuTexState};
pub use script::{ScriptKind, ScriptLexer, ScriptState};
pub use wadmerge::{WadMergeKind, WadMergeLexer, WadMergeState};

/// A language tokenizer.
///
/// Tokenizers are stateless values over immutable tables; one instance can
/// lex any number of segments from any number of threads.
pub trait Tokenizer {
    /// The language's token kinds.
    type Kind: TokenKind;
    /// The language's continuation states.
    type State: Continuation;

    /// Lexes `segment`, starting in `initial`.
    ///
    /// `document_offset` is the absolute offset of the segment's first
    /// character and only affects [`Token::document_offset`].
    ///
    /// [`Token::document_offset`]: crate::token::Token::document_offset
    fn tokenize(
        &self,
        segment: &str,
        initial: Self::State,
        document_offset: usize,
    ) -> TokenStream<Self::Kind, Self::State>;

    /// The language's word table.
    fn words(&self) -> &'static WordMap<Self::Kind>;
}
