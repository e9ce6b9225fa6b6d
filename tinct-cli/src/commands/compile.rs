//! `compile` command: write compiled `.lang` files for every language.

use std::io::Write;
use std::path::PathBuf;

use tinct_lang::{LanguageManager, ManagerConfig};

use crate::commands::traits::Command;
use crate::error::{Result, TinctError};

/// Arguments for the compile command.
#[derive(Debug, Clone)]
pub struct CompileArgs {
    /// Output directory, created if missing.
    pub out: PathBuf,
    /// Worker threads.
    pub jobs: usize,
    pub manager: ManagerConfig,
}

/// Compile command handler.
pub struct CompileCommand {
    args: CompileArgs,
}

impl CompileCommand {
    pub fn run(&self) -> Result<Vec<PathBuf>> {
        if self.args.out.exists() && !self.args.out.is_dir() {
            return Err(TinctError::Validation(format!(
                "Output path is not a directory: {}",
                self.args.out.display()
            )));
        }

        // Compiled files are an output here, never an input.
        let config = ManagerConfig {
            compiled_dir: None,
            ..self.args.manager.clone()
        };
        let manager = LanguageManager::new(config);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.args.jobs.max(1))
            .build()
            .map_err(|e| TinctError::Config(format!("Failed to start worker threads: {}", e)))?;
        let paths = pool.install(|| manager.compile_all(&self.args.out))?;

        let mut out = std::io::stdout().lock();
        for path in &paths {
            writeln!(out, "{}", path.display())?;
        }
        writeln!(
            out,
            "Compiled {} language(s) into {}",
            paths.len(),
            self.args.out.display()
        )?;
        Ok(paths)
    }
}

impl Command for CompileCommand {
    type Args = CompileArgs;
    type Output = Vec<PathBuf>;

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "compile"
    }
}

/// Run the compile command.
pub fn run_compile(args: CompileArgs) -> Result<Vec<PathBuf>> {
    let paths = CompileCommand::new(args).execute()?;
    tracing::debug!(command = CompileCommand::name(), files = paths.len(), "done");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tinct_lang::load_compiled;

    #[test]
    fn test_compile_bundled() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("compiled");
        let paths = run_compile(CompileArgs {
            out: out.clone(),
            jobs: 2,
            manager: ManagerConfig::default(),
        })
        .unwrap();

        assert_eq!(paths.len(), LanguageManager::bundled().languages().len());
        let rust = load_compiled(&out.join("rust.lang")).unwrap();
        assert_eq!(rust.name(), "Rust");
    }

    #[test]
    fn test_output_must_be_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file");
        std::fs::write(&file, "x").unwrap();
        let result = run_compile(CompileArgs {
            out: file,
            jobs: 1,
            manager: ManagerConfig::default(),
        });
        assert!(matches!(result, Err(TinctError::Validation(_))));
    }
}
