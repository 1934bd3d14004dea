//! dtk-lex - Incremental Lexers for the DoomTools Languages
//!
//! This crate classifies lines of text into flat token streams for syntax
//! highlighting. It does not build trees; every lexer is a character-driven
//! state machine that never fails and carries a small continuation state
//! from one line to the next.
//!
//! # Example Usage
//!
//! ```
//! use dtk_lex::{Language, LineState, TokenKind};
//!
//! let line = "goto A_Ready";
//! let stream = Language::DecoHack.tokenize(line, LineState::Neutral, 0);
//!
//! let kinds: Vec<_> = stream.iter().map(|t| t.kind.name()).collect();
//! assert_eq!(kinds, ["ReservedWord", "Whitespace", "Function"]);
//! assert_eq!(stream.next_state(), LineState::Neutral);
//! ```
//!
//! # Module Structure
//!
//! - [`token`] - Token, token stream and the kind/state traits
//! - [`lexer`] - The shared driver and one state machine per language
//! - [`hyperlink`] - Carving URLs and quoted paths out of finished tokens
//! - [`language`] - Registry and the type-erased entry point
//! - [`document`] - Line cache that re-lexes only what an edit affects
//!
//! # Languages
//!
//! | Language | Kinds | Multi-line constructs |
//! |----------|-------|------------------------|
//! | DECOHack | [`DecoHackKind`] (100-199) | block/doc comments, `\` preprocessor, backquotes |
//! | RookScript, WadScript, DoomMake | [`ScriptKind`] (200-299) | same as DECOHack |
//! | WadMerge | [`WadMergeKind`] (300-399) | none |
//! | DEUTex | [`DeuTexKind`] (400-499) | none |
//! | DEFSWANI | [`DefSwAniKind`] (500-599) | none |
//!
//! # Guarantees
//!
//! - Tokens of a segment are contiguous and cover it exactly.
//! - Lexing line by line with the carried state gives the same tokens as
//!   lexing the joined lines in one call.
//! - Malformed input produces ERROR-category tokens, never a panic.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cursor;
pub mod document;
pub mod hyperlink;
pub mod language;
pub mod lexer;
pub mod token;

#[cfg(test)]
mod edge_cases;

// Re-export main types for convenience
pub use document::Document;
pub use hyperlink::LinkPattern;
pub use language::{AnyKind, Language, LanguageError, LineState};
pub use lexer::{
    BraceState, DecoHackKind, DecoHackLexer, DecoHackState, DefSwAniKind, DefSwAniLexer,
    DefSwAniState, DeuTexKind, DeuTexLexer, DeuTexState, ScriptKind, ScriptLexer, ScriptState,
    Tokenizer, WadMergeKind, WadMergeLexer, WadMergeState,
};
pub use token::{Category, Continuation, LexError, Token, TokenKind, TokenStream};
