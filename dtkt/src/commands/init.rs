//! Init command implementation.
//!
//! Writes a default `dtkt.toml` so the lexing defaults can be edited.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::commands::common::error_messages;
use crate::commands::traits::{Command, CommandDescription};
use crate::config::{Config, CONFIG_FILE_NAME};
use crate::error::{DtktError, Result};

/// Arguments for the init command.
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Enable verbose output.
    pub verbose: bool,
    /// Overwrite an existing configuration file.
    pub force: bool,
    /// Directory to initialize (default: current directory).
    pub path: Option<PathBuf>,
}

/// Init command handler.
pub struct InitCommand {
    args: InitArgs,
}

impl InitCommand {
    /// Create a new InitCommand.
    pub fn new(args: InitArgs) -> Self {
        Self { args }
    }

    /// Execute the command, returning the written file.
    pub fn run(&self) -> Result<PathBuf> {
        let target_path = self.get_target_path();
        self.validate_directory(&target_path)?;

        let config_path = target_path.join(CONFIG_FILE_NAME);
        if config_path.exists() && !self.args.force {
            return Err(DtktError::Validation(format!(
                "{} {}",
                error_messages::CONFIG_EXISTS,
                config_path.display()
            )));
        }

        Config::default().save_to_path(&config_path)?;
        info!("Created {}", config_path.display());
        Ok(config_path)
    }

    fn get_target_path(&self) -> PathBuf {
        self.args
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Creates the directory if needed; refuses non-directories.
    fn validate_directory(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            if self.args.verbose {
                eprintln!("Creating directory: {}", path.display());
            }
            std::fs::create_dir_all(path).map_err(|e| {
                DtktError::FileOperation(format!(
                    "Failed to create directory {}: {}",
                    path.display(),
                    e
                ))
            })?;
            return Ok(());
        }

        if !path.is_dir() {
            return Err(DtktError::Validation(format!(
                "{} {}",
                error_messages::TARGET_NOT_DIR,
                path.display()
            )));
        }

        Ok(())
    }
}

impl Command for InitCommand {
    type Args = InitArgs;
    type Output = PathBuf;

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "init"
    }
}

impl CommandDescription for InitCommand {
    fn description() -> &'static str {
        "Write a default dtkt.toml"
    }

    fn help() -> &'static str {
        "Creates a dtkt.toml with every setting at its default value in the \
         specified or current directory. An existing file is kept unless \
         --force is given."
    }
}

/// Run the init command.
pub fn run_init(args: InitArgs) -> Result<()> {
    InitCommand::new(args).run().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args_in(dir: &Path, force: bool) -> InitArgs {
        InitArgs {
            path: Some(dir.to_path_buf()),
            verbose: false,
            force,
        }
    }

    #[test]
    fn test_init_args_default() {
        let args = InitArgs::default();
        assert!(!args.verbose);
        assert!(!args.force);
        assert!(args.path.is_none());
    }

    #[test]
    fn test_init_command_name() {
        assert_eq!(<InitCommand as Command>::name(), "init");
        assert_eq!(
            <InitCommand as CommandDescription>::description(),
            "Write a default dtkt.toml"
        );
    }

    #[test]
    fn test_init_writes_loadable_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let written = InitCommand::new(args_in(temp_dir.path(), false)).run().unwrap();

        assert_eq!(written, temp_dir.path().join(CONFIG_FILE_NAME));
        let loaded = Config::load_from_path(&written).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_init_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("a").join("b");

        assert!(run_init(args_in(&target, false)).is_ok());
        assert!(target.join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_init_refuses_existing_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "verbose = true\n").unwrap();

        let result = InitCommand::new(args_in(temp_dir.path(), false)).run();
        assert!(matches!(result, Err(DtktError::Validation(msg)) if msg.contains("--force")));
        assert_eq!(std::fs::read_to_string(&config_path).unwrap(), "verbose = true\n");
    }

    #[test]
    fn test_init_overwrites_with_force() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "verbose = true\n").unwrap();

        InitCommand::new(args_in(temp_dir.path(), true)).run().unwrap();
        assert!(!Config::load_from_path(&config_path).unwrap().verbose);
    }

    #[test]
    fn test_init_target_is_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain");
        std::fs::write(&file, "").unwrap();

        let result = InitCommand::new(args_in(&file, false)).run();
        assert!(matches!(result, Err(DtktError::Validation(_))));
    }
}
