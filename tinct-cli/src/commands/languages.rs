//! `languages` command: list known languages.

use std::io::Write;

use tinct_lang::{LanguageManager, LanguageSummary, ManagerConfig};

use crate::commands::traits::Command;
use crate::error::Result;

/// Arguments for the languages command.
#[derive(Debug, Clone, Default)]
pub struct LanguagesArgs {
    pub manager: ManagerConfig,
}

/// Languages command handler.
pub struct LanguagesCommand {
    args: LanguagesArgs,
}

/// One listing line: name, then extensions.
pub fn format_summary(summary: &LanguageSummary) -> String {
    format!("{:<12} {}", summary.name, summary.extensions.join(" "))
}

impl LanguagesCommand {
    pub fn run(&self) -> Result<Vec<LanguageSummary>> {
        let manager = LanguageManager::new(self.args.manager.clone());
        let languages = manager.languages();

        let mut out = std::io::stdout().lock();
        for summary in &languages {
            writeln!(out, "{}", format_summary(summary))?;
        }
        Ok(languages)
    }
}

impl Command for LanguagesCommand {
    type Args = LanguagesArgs;
    type Output = Vec<LanguageSummary>;

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "languages"
    }
}

/// Run the languages command.
pub fn run_languages(args: LanguagesArgs) -> Result<Vec<LanguageSummary>> {
    let languages = LanguagesCommand::new(args).execute()?;
    tracing::debug!(command = LanguagesCommand::name(), count = languages.len(), "done");
    Ok(languages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_summary() {
        let summary = LanguageSummary {
            name: "C".to_string(),
            extensions: vec![".c".to_string(), ".h".to_string()],
        };
        assert_eq!(format_summary(&summary), "C            .c .h");
    }

    #[test]
    fn test_bundled_languages_listed() {
        let languages = run_languages(LanguagesArgs::default()).unwrap();
        assert!(languages.iter().any(|l| l.name == "Rust"));
        assert!(languages.iter().all(|l| !l.extensions.is_empty()));
    }
}
