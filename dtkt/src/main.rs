//! dtkt - command-line front end for the DoomTools lexers.
//!
//! This is the main entry point for the dtkt CLI application.
//! It uses clap for argument parsing and dispatches to the command
//! handlers in [`commands`].

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    run_check, run_init, run_languages, run_stats, run_tokens, CheckArgs, InitArgs,
    LanguagesArgs, StatsArgs, TokensArgs,
};
use config::Config;
use error::{DtktError, Result};

/// dtkt - inspect DoomTools sources through their lexers
///
/// Lexes DECOHack, RookScript, WadScript, DoomMake, WadMerge, DEUTex and
/// DefSwAni files the way an editor highlights them.
#[derive(Parser, Debug)]
#[command(name = "dtkt")]
#[command(author = "DoomTools Lexer Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect DoomTools sources through their lexers", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "DTKT_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "DTKT_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "DTKT_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the dtkt CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Dump the token stream of source files
    ///
    /// Prints every token per line with its kind, category, column,
    /// document offset and hyperlink flag, plus each line's end state.
    Tokens(TokensCommand),

    /// Report lexical errors in source files
    ///
    /// Lexes files in parallel and prints each error token as
    /// path:line:column: message: text. Fails if any were found.
    Check(CheckCommand),

    /// Count tokens per kind
    Stats(StatsCommand),

    /// List supported languages
    Languages(LanguagesCommand),

    /// Write a default dtkt.toml
    Init(InitCommand),
}

/// Arguments for the tokens subcommand.
#[derive(Parser, Debug)]
struct TokensCommand {
    /// Files to dump
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Language (default: detected from the file name)
    #[arg(short, long)]
    language: Option<String>,

    /// Output format (text, json)
    #[arg(short = 'F', long)]
    format: Option<String>,

    /// Only dump this line (1-based)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    line: Option<u64>,

    /// Include whitespace tokens
    #[arg(short = 'w', long)]
    show_whitespace: bool,
}

/// Arguments for the check subcommand.
#[derive(Parser, Debug)]
struct CheckCommand {
    /// Files or directories to check
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Language (default: detected from the file name)
    #[arg(short, long)]
    language: Option<String>,

    /// Number of parallel jobs
    #[arg(short, long)]
    jobs: Option<u32>,

    /// Output format (text, json)
    #[arg(short = 'F', long)]
    format: Option<String>,
}

/// Arguments for the stats subcommand.
#[derive(Parser, Debug)]
struct StatsCommand {
    /// Files to count
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Language (default: detected from the file name)
    #[arg(short, long)]
    language: Option<String>,

    /// Output format (text, json)
    #[arg(short = 'F', long)]
    format: Option<String>,
}

/// Arguments for the languages subcommand.
#[derive(Parser, Debug)]
struct LanguagesCommand {
    /// Also list reserved words
    #[arg(short, long)]
    keywords: bool,

    /// Output format (text, json)
    #[arg(short = 'F', long)]
    format: Option<String>,
}

/// Arguments for the init subcommand.
#[derive(Parser, Debug)]
struct InitCommand {
    /// Directory to write dtkt.toml into (default: current directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Overwrite an existing dtkt.toml
    #[arg(short, long)]
    force: bool,
}

/// Main entry point for the dtkt CLI.
///
/// Parses command-line arguments, initializes logging, loads configuration,
/// and dispatches to the appropriate command handler.
fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color)?;

    let config = load_config(cli.config.as_deref())?;
    let verbose = cli.verbose || config.verbose;

    execute_command(cli.command, verbose, config)
}

/// Initialize the logging system.
///
/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| DtktError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Execute the selected command.
fn execute_command(command: Commands, verbose: bool, config: Config) -> Result<()> {
    match command {
        Commands::Tokens(args) => execute_tokens(args, config),
        Commands::Check(args) => execute_check(args, config),
        Commands::Stats(args) => execute_stats(args, config),
        Commands::Languages(args) => execute_languages(args, config),
        Commands::Init(args) => execute_init(args, verbose),
    }
}

/// Execute the tokens command.
fn execute_tokens(args: TokensCommand, config: Config) -> Result<()> {
    let line = args
        .line
        .map(usize::try_from)
        .transpose()
        .map_err(|e| DtktError::Validation(format!("Invalid line: {}", e)))?;
    let tokens_args = TokensArgs {
        files: args.files,
        language: args.language,
        format: args.format,
        line,
        show_whitespace: args.show_whitespace,
        config,
    };
    run_tokens(tokens_args)
}

/// Execute the check command.
fn execute_check(args: CheckCommand, config: Config) -> Result<()> {
    let check_args = CheckArgs {
        paths: args.paths,
        language: args.language,
        jobs: args.jobs,
        format: args.format,
        config,
    };
    run_check(check_args)
}

/// Execute the stats command.
fn execute_stats(args: StatsCommand, config: Config) -> Result<()> {
    let stats_args = StatsArgs {
        files: args.files,
        language: args.language,
        format: args.format,
        config,
    };
    run_stats(stats_args)
}

/// Execute the languages command.
fn execute_languages(args: LanguagesCommand, config: Config) -> Result<()> {
    let languages_args = LanguagesArgs {
        keywords: args.keywords,
        format: args.format,
        config,
    };
    run_languages(languages_args)
}

/// Execute the init command.
fn execute_init(args: InitCommand, verbose: bool) -> Result<()> {
    let init_args = InitArgs {
        verbose,
        force: args.force,
        path: args.path,
    };
    run_init(init_args)
}
