//! Common types and utilities for dtkt commands.
//!
//! Output formats, language resolution and input collection shared by
//! every command that reads source files.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use dtk_lex::Language;
use tracing::debug;

use crate::config::LexConfig;
use crate::error::{DtktError, Result};

// ============================================================================
// Output Format
// ============================================================================

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON document on stdout
    Json,
}

impl OutputFormat {
    /// The format flag wins over the configured default.
    pub fn resolve(flag: Option<&str>, configured: &str) -> Result<Self> {
        flag.unwrap_or(configured).parse()
    }
}

impl FromStr for OutputFormat {
    type Err = DtktError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(DtktError::Validation(format!(
                "{} {}",
                error_messages::UNKNOWN_FORMAT,
                s
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

// ============================================================================
// Language Resolution
// ============================================================================

/// Picks the language for `path`.
///
/// Order: the explicit flag, the configured extension overrides, the
/// registry's file name and extension tables, the configured default.
pub fn resolve_language(
    flag: Option<&str>,
    path: &Path,
    lex: &LexConfig,
) -> Result<Language> {
    if let Some(name) = flag {
        return name
            .parse()
            .map_err(|e| DtktError::Validation(format!("{}", e)));
    }

    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        if let Some(language) = lex.language_for_extension(ext)? {
            return Ok(language);
        }
    }

    if let Some(language) = Language::from_path(path) {
        return Ok(language);
    }

    lex.default_language()?.ok_or_else(|| {
        DtktError::Validation(format!(
            "{} {}",
            error_messages::UNKNOWN_LANGUAGE_FOR,
            path.display()
        ))
    })
}

// ============================================================================
// Input Collection
// ============================================================================

/// Expands the command line inputs into a sorted, de-duplicated file list.
///
/// Files are taken as given. Directories contribute their direct children
/// that some language claims, either through the registry or through an
/// extension override.
pub fn collect_files(inputs: &[PathBuf], lex: &LexConfig) -> Result<Vec<PathBuf>> {
    if inputs.is_empty() {
        return Err(DtktError::Validation(
            error_messages::NO_INPUT_FILES.to_string(),
        ));
    }

    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let before = files.len();
            for entry in std::fs::read_dir(input)? {
                let path = entry?.path();
                if path.is_file() && is_known_source(&path, lex) {
                    files.push(path);
                }
            }
            debug!(
                "{}: {} candidate file(s)",
                input.display(),
                files.len() - before
            );
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(DtktError::FileOperation(format!(
                "{} {}",
                error_messages::INPUT_PATH_NOT_EXIST,
                input.display()
            )));
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn is_known_source(path: &Path, lex: &LexConfig) -> bool {
    let overridden = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(lex.language_for_extension(ext), Ok(Some(_))));
    overridden || Language::from_path(path).is_some()
}

/// Reads a source file as UTF-8.
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        DtktError::FileOperation(format!("Failed to read {}: {}", path.display(), e))
    })
}

// ============================================================================
// Error Messages
// ============================================================================

/// Standard error message templates.
pub mod error_messages {
    /// Error when no input files are specified.
    pub const NO_INPUT_FILES: &str = "No input files specified";

    /// Error when an input path does not exist.
    pub const INPUT_PATH_NOT_EXIST: &str = "Input path does not exist:";

    /// Error when the init target is not a directory.
    pub const TARGET_NOT_DIR: &str = "Target path is not a directory:";

    /// Error when a configuration file would be overwritten.
    pub const CONFIG_EXISTS: &str = "Configuration file already exists (use --force):";

    /// Error when an unknown report format is specified.
    pub const UNKNOWN_FORMAT: &str = "Unknown format:";

    /// Error when no language can be chosen for a file.
    pub const UNKNOWN_LANGUAGE_FOR: &str = "Cannot determine language for";

    /// Error when `--line` is outside the file.
    pub const LINE_OUT_OF_RANGE: &str = "Line out of range:";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn overrides(pairs: &[(&str, &str)]) -> LexConfig {
        let extensions: BTreeMap<String, String> = pairs
            .iter()
            .map(|(ext, lang)| (ext.to_string(), lang.to_string()))
            .collect();
        LexConfig {
            default_language: None,
            extensions,
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_flag_wins() {
        assert_eq!(
            OutputFormat::resolve(Some("json"), "text").unwrap(),
            OutputFormat::Json
        );
        assert_eq!(OutputFormat::resolve(None, "text").unwrap(), OutputFormat::Text);
    }

    #[test]
    fn test_resolve_language_flag_first() {
        let lex = overrides(&[("dh", "wadmerge")]);
        let language = resolve_language(Some("rookscript"), Path::new("a.dh"), &lex).unwrap();
        assert_eq!(language, Language::RookScript);
    }

    #[test]
    fn test_resolve_language_override_before_registry() {
        let lex = overrides(&[("dh", "wadmerge")]);
        let language = resolve_language(None, Path::new("a.dh"), &lex).unwrap();
        assert_eq!(language, Language::WadMerge);
    }

    #[test]
    fn test_resolve_language_registry() {
        let language = resolve_language(None, Path::new("a.dh"), &LexConfig::default()).unwrap();
        assert_eq!(language, Language::DecoHack);
    }

    #[test]
    fn test_resolve_language_default_then_failure() {
        let mut lex = LexConfig::default();
        let path = Path::new("notes.unknown");
        assert!(matches!(
            resolve_language(None, path, &lex),
            Err(DtktError::Validation(_))
        ));

        lex.default_language = Some("deutex".to_string());
        assert_eq!(resolve_language(None, path, &lex).unwrap(), Language::DeuTex);
    }

    #[test]
    fn test_resolve_language_bad_flag() {
        let result = resolve_language(Some("cobol"), Path::new("a.dh"), &LexConfig::default());
        assert!(matches!(result, Err(DtktError::Validation(_))));
    }

    #[test]
    fn test_collect_files_walks_one_level() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::write(root.join("b.dh"), "thing").unwrap();
        std::fs::write(root.join("a.rscript"), "x").unwrap();
        std::fs::write(root.join("readme.md"), "#").unwrap();
        std::fs::create_dir(root.join("nested")).unwrap();
        std::fs::write(root.join("nested").join("c.dh"), "thing").unwrap();

        let files = collect_files(&[root.to_path_buf()], &LexConfig::default()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.rscript", "b.dh"]);
    }

    #[test]
    fn test_collect_files_honors_overrides() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("anim.lmp"), "[FLATS]").unwrap();

        let lex = overrides(&[("lmp", "defswani")]);
        let files = collect_files(&[temp_dir.path().to_path_buf()], &lex).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_collect_files_missing_input() {
        let result = collect_files(&[PathBuf::from("/nonexistent/x.dh")], &LexConfig::default());
        assert!(matches!(result, Err(DtktError::FileOperation(_))));
    }

    #[test]
    fn test_collect_files_requires_input() {
        assert!(matches!(
            collect_files(&[], &LexConfig::default()),
            Err(DtktError::Validation(_))
        ));
    }
}
