//! Command modules for the dtkt CLI.
//!
//! Each subcommand lives in its own file: an `XArgs` struct, an `XCommand`
//! handler implementing the [`traits`] and a `run_x` entry point.

pub mod common;
pub mod traits;

pub mod check;
pub mod init;
pub mod languages;
pub mod stats;
pub mod tokens;

// Re-export command types and functions
pub use check::{run_check, CheckArgs};
pub use init::{run_init, InitArgs};
pub use languages::{run_languages, LanguagesArgs};
pub use stats::{run_stats, StatsArgs};
pub use tokens::{run_tokens, TokensArgs};
