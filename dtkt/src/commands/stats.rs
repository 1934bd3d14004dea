//! Stats command implementation.
//!
//! Counts tokens per kind, in the order each kind first appears.

use std::io::{self, Write};
use std::path::PathBuf;

use dtk_lex::{Document, TokenKind};
use indexmap::IndexMap;
use serde::Serialize;

use crate::commands::common::{error_messages, read_source, resolve_language, OutputFormat};
use crate::commands::traits::{Command, CommandDescription};
use crate::config::Config;
use crate::error::{DtktError, Result};

/// Arguments for the stats command.
#[derive(Debug, Clone, Default)]
pub struct StatsArgs {
    /// Files to count.
    pub files: Vec<PathBuf>,
    /// Language name overriding detection.
    pub language: Option<String>,
    /// Output format name overriding the configured one.
    pub format: Option<String>,
    /// Loaded configuration.
    pub config: Config,
}

/// Token counts for one file.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileStats {
    /// Path as given.
    pub file: String,
    /// Language short name.
    pub language: &'static str,
    /// Lines in the file.
    pub lines: usize,
    /// Tokens in the file.
    pub tokens: usize,
    /// Tokens per kind name, in first occurrence order.
    pub kinds: IndexMap<&'static str, usize>,
}

/// Stats command handler.
pub struct StatsCommand {
    args: StatsArgs,
}

impl StatsCommand {
    /// Create a new StatsCommand.
    pub fn new(args: StatsArgs) -> Self {
        Self { args }
    }

    /// Execute the command, writing to stdout.
    pub fn run(&self) -> Result<()> {
        let stats = self.collect()?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.render(&stats, &mut out)
    }

    /// Counts every input file.
    pub fn collect(&self) -> Result<Vec<FileStats>> {
        if self.args.files.is_empty() {
            return Err(DtktError::Validation(
                error_messages::NO_INPUT_FILES.to_string(),
            ));
        }

        let mut all = Vec::with_capacity(self.args.files.len());
        for path in &self.args.files {
            let language =
                resolve_language(self.args.language.as_deref(), path, &self.args.config.lex)?;
            let source = read_source(path)?;
            let document = Document::new(language, &source);

            let mut kinds: IndexMap<&'static str, usize> = IndexMap::new();
            for index in 0..document.line_count() {
                for token in document.tokens(index).unwrap_or_default() {
                    *kinds.entry(token.kind.name()).or_insert(0) += 1;
                }
            }

            all.push(FileStats {
                file: path.display().to_string(),
                language: language.name(),
                lines: document.line_count(),
                tokens: kinds.values().sum(),
                kinds,
            });
        }
        Ok(all)
    }

    /// Writes the counts in the selected format.
    pub fn render(&self, stats: &[FileStats], out: &mut impl Write) -> Result<()> {
        let format = OutputFormat::resolve(
            self.args.format.as_deref(),
            &self.args.config.output.format,
        )?;

        match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, stats)?;
                writeln!(out)?;
            },
            OutputFormat::Text => {
                for file in stats {
                    writeln!(
                        out,
                        "{} ({}): {} line(s), {} token(s)",
                        file.file, file.language, file.lines, file.tokens
                    )?;
                    for (kind, count) in &file.kinds {
                        writeln!(out, "  {:<24} {:>8}", kind, count)?;
                    }
                }
            },
        }
        Ok(())
    }
}

impl Command for StatsCommand {
    type Args = StatsArgs;
    type Output = Vec<FileStats>;

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.collect()
    }

    fn name() -> &'static str {
        "stats"
    }
}

impl CommandDescription for StatsCommand {
    fn description() -> &'static str {
        "Count tokens per kind"
    }

    fn help() -> &'static str {
        "Lexes each file and prints how many tokens of each kind it holds, \
         listing kinds in the order they first appear."
    }
}

/// Run the stats command.
pub fn run_stats(args: StatsArgs) -> Result<()> {
    StatsCommand::new(args).run()
}
