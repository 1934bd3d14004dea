//! Tokens command implementation.
//!
//! Dumps the token stream of each file line by line, as text or JSON.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use dtk_lex::{Category, Continuation, Document, Language, TokenKind};
use serde::Serialize;
use tracing::debug;

use crate::commands::common::{
    error_messages, read_source, resolve_language, OutputFormat,
};
use crate::commands::traits::{Command, CommandDescription};
use crate::config::Config;
use crate::error::{DtktError, Result};

/// Arguments for the tokens command.
#[derive(Debug, Clone, Default)]
pub struct TokensArgs {
    /// Files to dump.
    pub files: Vec<PathBuf>,
    /// Language name overriding detection.
    pub language: Option<String>,
    /// Output format name overriding the configured one.
    pub format: Option<String>,
    /// Only dump this 1-based line.
    pub line: Option<usize>,
    /// List whitespace tokens too.
    pub show_whitespace: bool,
    /// Loaded configuration.
    pub config: Config,
}

/// One token in a dump.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TokenRecord {
    /// Kind name.
    pub kind: &'static str,
    /// Highlight category name.
    pub category: &'static str,
    /// Token text.
    pub text: String,
    /// 1-based byte column of the first character.
    pub column: usize,
    /// Absolute byte offset in the file.
    pub offset: usize,
    /// Whether the token was carved out as a hyperlink.
    pub hyperlink: bool,
}

/// One line in a dump.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineRecord {
    /// 1-based line number.
    pub line: usize,
    /// The state the next line starts in.
    pub end_state: &'static str,
    /// Tokens on the line.
    pub tokens: Vec<TokenRecord>,
}

/// The dump of one file.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileRecord {
    /// Path as given.
    pub file: String,
    /// Language short name.
    pub language: &'static str,
    /// Dumped lines.
    pub lines: Vec<LineRecord>,
}

/// Tokens command handler.
pub struct TokensCommand {
    args: TokensArgs,
}

impl TokensCommand {
    /// Create a new TokensCommand.
    pub fn new(args: TokensArgs) -> Self {
        Self { args }
    }

    /// Execute the command, writing to stdout.
    pub fn run(&self) -> Result<()> {
        let records = self.collect()?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.render(&records, &mut out)
    }

    /// Lexes every input file.
    pub fn collect(&self) -> Result<Vec<FileRecord>> {
        if self.args.files.is_empty() {
            return Err(DtktError::Validation(
                error_messages::NO_INPUT_FILES.to_string(),
            ));
        }

        self.args
            .files
            .iter()
            .map(|path| {
                let language =
                    resolve_language(self.args.language.as_deref(), path, &self.args.config.lex)?;
                let source = read_source(path)?;
                self.dump(path, language, &source)
            })
            .collect()
    }

    fn dump(&self, path: &Path, language: Language, source: &str) -> Result<FileRecord> {
        let document = Document::new(language, source);
        debug!(
            "{}: {} line(s) as {}",
            path.display(),
            document.line_count(),
            language
        );

        let range = match self.args.line {
            Some(line) if line == 0 || line > document.line_count() => {
                return Err(DtktError::Validation(format!(
                    "{} {} ({} has {} line(s))",
                    error_messages::LINE_OUT_OF_RANGE,
                    line,
                    path.display(),
                    document.line_count()
                )));
            },
            Some(line) => line - 1..line,
            None => 0..document.line_count(),
        };

        let show_whitespace = self.args.show_whitespace || self.args.config.output.show_whitespace;
        let mut lines = Vec::with_capacity(range.len());
        for index in range {
            let text = document.line(index).unwrap_or("");
            let tokens = document
                .tokens(index)
                .unwrap_or_default()
                .into_iter()
                .filter(|token| show_whitespace || token.kind.category() != Category::Whitespace)
                .map(|token| TokenRecord {
                    kind: token.kind.name(),
                    category: token.kind.category().name(),
                    text: token.text(text).to_string(),
                    column: token.start + 1,
                    offset: token.document_offset,
                    hyperlink: token.hyperlink,
                })
                .collect();
            lines.push(LineRecord {
                line: index + 1,
                end_state: document.state_after(index).unwrap_or_default().name(),
                tokens,
            });
        }

        Ok(FileRecord {
            file: path.display().to_string(),
            language: language.name(),
            lines,
        })
    }

    /// Writes the records in the selected format.
    pub fn render(&self, records: &[FileRecord], out: &mut impl Write) -> Result<()> {
        let format = OutputFormat::resolve(
            self.args.format.as_deref(),
            &self.args.config.output.format,
        )?;

        match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, records)?;
                writeln!(out)?;
            },
            OutputFormat::Text => {
                for record in records {
                    writeln!(out, "== {} ({}) ==", record.file, record.language)?;
                    for line in &record.lines {
                        writeln!(out, "{:>5} | {}", line.line, line.end_state)?;
                        for token in &line.tokens {
                            writeln!(
                                out,
                                "      {:>4}  {:<24} {:<14} {:?}{}",
                                token.column,
                                token.kind,
                                token.category,
                                token.text,
                                if token.hyperlink { "  [link]" } else { "" }
                            )?;
                        }
                    }
                }
            },
        }

        Ok(())
    }
}

impl Command for TokensCommand {
    type Args = TokensArgs;
    type Output = Vec<FileRecord>;

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.collect()
    }

    fn name() -> &'static str {
        "tokens"
    }
}

impl CommandDescription for TokensCommand {
    fn description() -> &'static str {
        "Dump the token stream of source files"
    }

    fn help() -> &'static str {
        "Lexes each file line by line and prints every token with its kind, \
         category, column, document offset and hyperlink flag, plus the state \
         each line hands to the next."
    }
}

/// Run the tokens command.
pub fn run_tokens(args: TokensArgs) -> Result<()> {
    TokensCommand::new(args).run()
}
