//! Check command implementation.
//!
//! Lexes every input file in parallel and reports each error token with
//! its position. The command fails when any error token was found.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use dtk_lex::{Document, TokenKind};
use dtk_util::SourceFile;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::commands::common::{collect_files, read_source, resolve_language, OutputFormat};
use crate::commands::traits::{Command, CommandDescription};
use crate::config::Config;
use crate::error::{DtktError, Result};

/// Arguments for the check command.
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    /// Files and directories to check.
    pub paths: Vec<PathBuf>,
    /// Language name overriding detection.
    pub language: Option<String>,
    /// Number of parallel jobs (default: from config).
    pub jobs: Option<u32>,
    /// Output format name overriding the configured one.
    pub format: Option<String>,
    /// Loaded configuration.
    pub config: Config,
}

/// One error token.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Diagnostic {
    /// 1-based line.
    pub line: usize,
    /// 1-based character column.
    pub column: usize,
    /// What the error token stands for.
    pub message: String,
    /// The offending text.
    pub text: String,
}

/// The outcome of checking one file.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileReport {
    /// Path as found.
    pub file: String,
    /// Language short name.
    pub language: &'static str,
    /// Reported error tokens, capped at `max_errors_per_file`.
    pub diagnostics: Vec<Diagnostic>,
    /// Error tokens found, including unreported ones.
    pub error_count: usize,
}

/// Totals over a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Files lexed.
    pub files: usize,
    /// Files that could not be read or resolved.
    pub failed: usize,
    /// Error tokens over all files.
    pub errors: usize,
}

/// Check command handler.
pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new CheckCommand.
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    /// Execute the command, writing reports to stdout.
    pub fn run(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let summary = self.check_into(&mut out)?;
        Self::conclude(&summary)
    }

    /// Turns a summary into the command outcome.
    pub fn conclude(summary: &CheckSummary) -> Result<()> {
        if summary.errors > 0 || summary.failed > 0 {
            return Err(DtktError::CommandExecution(format!(
                "{} error token(s) in {} file(s), {} file(s) failed",
                summary.errors, summary.files, summary.failed
            )));
        }
        Ok(())
    }

    /// Checks every input and writes the reports to `out`.
    pub fn check_into(&self, out: &mut impl Write) -> Result<CheckSummary> {
        let start_time = Instant::now();
        let format = OutputFormat::resolve(
            self.args.format.as_deref(),
            &self.args.config.output.format,
        )?;
        let files = collect_files(&self.args.paths, &self.args.config.lex)?;
        let results = self.check_files(&files)?;

        let mut summary = CheckSummary::default();
        let mut reports = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(report) => {
                    summary.files += 1;
                    summary.errors += report.error_count;
                    reports.push(report);
                },
                Err(e) => {
                    summary.failed += 1;
                    warn!("{:#}", e);
                },
            }
        }

        match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &reports)?;
                writeln!(out)?;
            },
            OutputFormat::Text => {
                for report in &reports {
                    Self::write_text(report, out)?;
                }
            },
        }

        info!(
            "Checked {} file(s) in {:.2}s: {} error token(s)",
            summary.files,
            start_time.elapsed().as_secs_f64(),
            summary.errors
        );
        Ok(summary)
    }

    fn write_text(report: &FileReport, out: &mut impl Write) -> Result<()> {
        for diagnostic in &report.diagnostics {
            writeln!(
                out,
                "{}:{}:{}: {}: {}",
                report.file, diagnostic.line, diagnostic.column, diagnostic.message, diagnostic.text
            )?;
        }
        let hidden = report.error_count - report.diagnostics.len();
        if hidden > 0 {
            writeln!(out, "{}: {} more error token(s)", report.file, hidden)?;
        }
        Ok(())
    }

    fn check_files(&self, files: &[PathBuf]) -> Result<Vec<anyhow::Result<FileReport>>> {
        let jobs = self.args.jobs.unwrap_or(self.args.config.check.jobs).max(1);
        debug!("Checking {} file(s) with {} job(s)", files.len(), jobs);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs as usize)
            .build()
            .map_err(|e| {
                DtktError::CommandExecution(format!("Failed to start worker pool: {}", e))
            })?;

        Ok(pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    self.check_file(path)
                        .with_context(|| format!("checking {}", path.display()))
                })
                .collect()
        }))
    }

    fn check_file(&self, path: &Path) -> Result<FileReport> {
        let language =
            resolve_language(self.args.language.as_deref(), path, &self.args.config.lex)?;
        let source = read_source(path)?;
        let file = SourceFile::new(path.display().to_string(), source.as_str());
        let document = Document::new(language, &source);
        let limit = self.args.config.check.max_errors_per_file;

        let mut diagnostics = Vec::new();
        let mut error_count = 0;
        for index in 0..document.line_count() {
            let text = document.line(index).unwrap_or("");
            for token in document.tokens(index).unwrap_or_default() {
                let Some(error) = token.kind.error() else {
                    continue;
                };
                error_count += 1;
                if diagnostics.len() < limit {
                    let (line, column) = file.offset_to_line_col(token.document_offset);
                    diagnostics.push(Diagnostic {
                        line,
                        column,
                        message: error.to_string(),
                        text: token.text(text).to_string(),
                    });
                }
            }
        }

        Ok(FileReport {
            file: file.name().to_string(),
            language: language.name(),
            diagnostics,
            error_count,
        })
    }
}

impl Command for CheckCommand {
    type Args = CheckArgs;
    type Output = CheckSummary;

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.check_into(&mut io::sink())
    }

    fn name() -> &'static str {
        "check"
    }
}

impl CommandDescription for CheckCommand {
    fn description() -> &'static str {
        "Report lexical errors in source files"
    }

    fn help() -> &'static str {
        "Lexes every file (directories are searched one level deep for known \
         extensions) in parallel and prints each error token as \
         path:line:column: message: text. Exits with failure if any were found."
    }
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<()> {
    CheckCommand::new(args).run()
}
