//! dtk-util - Shared Tables and Source Utilities
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate holds the small, immutable building blocks the DoomTools
//! lexers share:
//!
//! - [`Alphabet`]: a sorted character table queried by binary search. Every
//!   character class a lexer tests (separators, delimiter-break characters,
//!   hex digits, patch-name characters) is one of these.
//! - [`WordMap`]: a word table from literal text to a token kind, with a
//!   [`CasePolicy`] deciding whether lookups fold ASCII case.
//! - [`SourceFile`]: a named buffer with a line-start index for turning byte
//!   offsets into `line:column` pairs in reports.
//!
//! DESIGN PRINCIPLES:
//! ------------------
//! 1. BUILD ONCE, READ FOREVER
//!    Tables are constructed a single time (usually behind a lazy static)
//!    and never mutated afterwards, so they can be shared freely between
//!    threads lexing different documents.
//!
//! 2. NO ALLOCATION ON THE HOT PATH
//!    Membership tests and word lookups borrow their input. Case folding
//!    only allocates when the word actually contains upper-case ASCII.
//
// ============================================================================
// CHARACTER TABLES
// ============================================================================
//
// The lexers classify one character at a time. A sorted table plus binary
// search keeps each test at O(log n) for tables of a dozen or so entries,
// which is as fast as a match statement and keeps the table itself as data:
//
// ```
// "{}()"  ->  ['(', ')', '{', '}']
//               0    1    2    3
// contains('{')  ->  binary_search  ->  Ok(2)
// ```
//
// ============================================================================
// WORD TABLES
// ============================================================================
//
// Words are stored folded according to the table's case policy. A lookup
// folds the probe the same way and hits a rustc-hash map, which beats the
// default SipHash for the short keys lexers deal in.

pub mod alphabet;
pub mod error;
pub mod source;
pub mod word_map;

pub use alphabet::Alphabet;
pub use error::{SourceError, SourceResult};
pub use source::SourceFile;
pub use word_map::{CasePolicy, WordMap};

pub use rustc_hash::{FxHashMap, FxHashSet};
