//! `rebuild-map` command: regenerate the extension map from the language
//! source.

use std::io::Write;
use std::path::PathBuf;

use tinct_lang::{ExtensionMap, LanguageManager, ManagerConfig};

use crate::commands::traits::Command;
use crate::error::Result;

/// Arguments for the rebuild-map command.
#[derive(Debug, Clone)]
pub struct RebuildArgs {
    /// Where to write the map; the configured path when absent, stdout
    /// when neither is set.
    pub out: Option<PathBuf>,
    pub manager: ManagerConfig,
}

/// Rebuild-map command handler.
pub struct RebuildCommand {
    args: RebuildArgs,
}

impl RebuildCommand {
    pub fn run(&self) -> Result<ExtensionMap> {
        let mut config = self.args.manager.clone();
        if let Some(out) = &self.args.out {
            config = config.with_extension_map(out);
        }
        let destination = config.extension_map.clone();

        let manager = LanguageManager::new(config);
        let map = manager.rebuild_dictionary()?;

        let mut out = std::io::stdout().lock();
        match destination {
            Some(path) => writeln!(out, "Wrote {} extension(s) to {}", map.len(), path.display())?,
            None => writeln!(out, "{}", serde_json::to_string_pretty(&map)?)?,
        }
        Ok(map)
    }
}

impl Command for RebuildCommand {
    type Args = RebuildArgs;
    type Output = ExtensionMap;

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "rebuild-map"
    }
}

/// Run the rebuild-map command.
pub fn run_rebuild(args: RebuildArgs) -> Result<ExtensionMap> {
    let map = RebuildCommand::new(args).execute()?;
    tracing::debug!(command = RebuildCommand::name(), entries = map.len(), "done");
    Ok(map)
}
