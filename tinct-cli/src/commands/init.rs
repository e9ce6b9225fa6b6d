//! `init` command: write the effective configuration as `tinct.toml`.
//!
//! The written file holds every setting with its current value, so it
//! doubles as documentation of what can be configured.

use std::io::Write;
use std::path::PathBuf;

use crate::commands::traits::Command;
use crate::config::{Config, CONFIG_FILE_NAME};
use crate::error::{Result, TinctError};

/// Arguments for the init command.
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Target file; `tinct.toml` in the current directory when absent.
    pub path: Option<PathBuf>,
    /// Overwrite an existing file.
    pub force: bool,
    /// Print to stdout instead of writing a file.
    pub print: bool,
    pub config: Config,
}

/// Init command handler.
pub struct InitCommand {
    args: InitArgs,
}

impl InitCommand {
    fn target_path(&self) -> PathBuf {
        self.args
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Returns the written path, or `None` when printing.
    pub fn run(&self) -> Result<Option<PathBuf>> {
        if self.args.print {
            let mut out = std::io::stdout().lock();
            out.write_all(self.args.config.to_toml()?.as_bytes())?;
            return Ok(None);
        }

        let path = self.target_path();
        if path.exists() && !self.args.force {
            return Err(TinctError::FileOperation(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }

        self.args.config.save_to_path(&path)?;
        writeln!(std::io::stdout().lock(), "Wrote {}", path.display())?;
        Ok(Some(path))
    }
}

impl Command for InitCommand {
    type Args = InitArgs;
    type Output = Option<PathBuf>;

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

/// Run the init command.
pub fn run_init(args: InitArgs) -> Result<Option<PathBuf>> {
    let written = InitCommand::new(args).execute()?;
    tracing::debug!(command = InitCommand::name(), "done");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tinct.toml");
        let mut config = Config::default();
        config.scan.emit_whitespace = false;

        let written = run_init(InitArgs {
            path: Some(path.clone()),
            config: config.clone(),
            ..InitArgs::default()
        })
        .unwrap();

        assert_eq!(written, Some(path.clone()));
        assert_eq!(Config::load_from_path(&path).unwrap(), config);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tinct.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        let args = InitArgs {
            path: Some(path.clone()),
            ..InitArgs::default()
        };
        assert!(matches!(run_init(args.clone()), Err(TinctError::FileOperation(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        run_init(InitArgs { force: true, ..args }).unwrap();
        assert!(Config::load_from_path(&path).is_ok());
    }

    #[test]
    fn test_init_print_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tinct.toml");
        let written = run_init(InitArgs {
            path: Some(path.clone()),
            print: true,
            ..InitArgs::default()
        })
        .unwrap();

        assert_eq!(written, None);
        assert!(!path.exists());
    }
}
