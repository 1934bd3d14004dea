//! Languages command implementation.
//!
//! Lists the language registry.

use std::io::{self, Write};

use dtk_lex::Language;
use serde::Serialize;

use crate::commands::common::OutputFormat;
use crate::commands::traits::{Command, CommandDescription};
use crate::config::Config;
use crate::error::Result;

/// Arguments for the languages command.
#[derive(Debug, Clone, Default)]
pub struct LanguagesArgs {
    /// Also list reserved words.
    pub keywords: bool,
    /// Output format name overriding the configured one.
    pub format: Option<String>,
    /// Loaded configuration.
    pub config: Config,
}

/// One registry entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LanguageInfo {
    /// Short name.
    pub name: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Editor style key.
    pub style: &'static str,
    /// Registered extensions.
    pub extensions: Vec<&'static str>,
    /// Well-known file names.
    pub file_names: Vec<&'static str>,
    /// Extensions mapped here by the configuration.
    pub configured_extensions: Vec<String>,
    /// Number of token kinds.
    pub kinds: usize,
    /// Reserved words, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<&'static str>>,
}

/// Languages command handler.
pub struct LanguagesCommand {
    args: LanguagesArgs,
}

impl LanguagesCommand {
    /// Create a new LanguagesCommand.
    pub fn new(args: LanguagesArgs) -> Self {
        Self { args }
    }

    /// Execute the command, writing to stdout.
    pub fn run(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.render(&self.collect(), &mut out)
    }

    /// Describes every registered language.
    pub fn collect(&self) -> Vec<LanguageInfo> {
        Language::ALL
            .into_iter()
            .map(|language| {
                let configured_extensions = self
                    .args
                    .config
                    .lex
                    .extensions
                    .iter()
                    .filter(|(_, name)| {
                        name.parse::<Language>().is_ok_and(|named| named == language)
                    })
                    .map(|(ext, _)| ext.clone())
                    .collect();

                LanguageInfo {
                    name: language.name(),
                    display_name: language.display_name(),
                    style: language.style(),
                    extensions: language.extensions().to_vec(),
                    file_names: language.file_names().to_vec(),
                    configured_extensions,
                    kinds: language.kinds().len(),
                    keywords: self.args.keywords.then(|| language.keywords()),
                }
            })
            .collect()
    }

    /// Writes the registry in the selected format.
    pub fn render(&self, infos: &[LanguageInfo], out: &mut impl Write) -> Result<()> {
        let format = OutputFormat::resolve(
            self.args.format.as_deref(),
            &self.args.config.output.format,
        )?;

        match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, infos)?;
                writeln!(out)?;
            },
            OutputFormat::Text => {
                for info in infos {
                    let mut patterns: Vec<String> =
                        info.extensions.iter().map(|ext| format!("*.{}", ext)).collect();
                    patterns.extend(info.file_names.iter().map(|name| name.to_string()));
                    patterns.extend(
                        info.configured_extensions
                            .iter()
                            .map(|ext| format!("*.{} (config)", ext)),
                    );
                    writeln!(
                        out,
                        "{:<12} {:<12} {:>3} kinds  {}",
                        info.name,
                        info.display_name,
                        info.kinds,
                        patterns.join(", ")
                    )?;
                    if let Some(keywords) = &info.keywords {
                        writeln!(out, "    {}", keywords.join(" "))?;
                    }
                }
            },
        }
        Ok(())
    }
}

impl Command for LanguagesCommand {
    type Args = LanguagesArgs;
    type Output = Vec<LanguageInfo>;

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<Self::Output> {
        Ok(self.collect())
    }

    fn name() -> &'static str {
        "languages"
    }
}

impl CommandDescription for LanguagesCommand {
    fn description() -> &'static str {
        "List supported languages"
    }

    fn help() -> &'static str {
        "Prints every registered language with its extensions, well-known \
         file names and number of token kinds."
    }
}

/// Run the languages command.
pub fn run_languages(args: LanguagesArgs) -> Result<()> {
    LanguagesCommand::new(args).run()
}
