//! tinct CLI - data-driven syntax highlighting on the command line.
//!
//! Parses arguments with clap, sets up logging, loads `tinct.toml` and
//! dispatches to the command handlers.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    run_compile, run_highlight, run_init, run_languages, run_rebuild, run_tokens, CompileArgs,
    HighlightArgs, InitArgs, LanguagesArgs, RebuildArgs, TokensArgs,
};
use config::Config;
use error::{Result, TinctError};

/// tinct - tokenize and colour source files
///
/// Language rules come from a TOML language source (a bundled one by
/// default); no language is hard-coded.
#[derive(Parser, Debug)]
#[command(name = "tinct")]
#[command(author = "Tinct Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tokenize and colour source files", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "TINCT_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "TINCT_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "TINCT_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the tinct CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the token stream of a file
    ///
    /// One token per line: line:column, offset, length, kind and text.
    Tokens(TokensCommand),

    /// Print a file with 24-bit ANSI colours
    Highlight(HighlightCommand),

    /// Write compiled .lang files for every language
    Compile(CompileCommand),

    /// Regenerate the extension map from the language source
    RebuildMap(RebuildMapCommand),

    /// List known languages and their extensions
    Languages(LanguagesCommand),

    /// Write the effective configuration to tinct.toml
    Init(InitCommand),
}

/// Arguments for the tokens subcommand.
#[derive(Parser, Debug)]
struct TokensCommand {
    /// File to scan
    file: PathBuf,

    /// Language extension or name (default: from the file extension)
    #[arg(short, long)]
    lang: Option<String>,

    /// Skip whitespace tokens
    #[arg(long)]
    no_whitespace: bool,

    /// Lines to scan, 1-based and inclusive (A:B, A:, :B or A)
    #[arg(long)]
    lines: Option<String>,

    /// Print one JSON object per token
    #[arg(long)]
    json: bool,
}

/// Arguments for the highlight subcommand.
#[derive(Parser, Debug)]
struct HighlightCommand {
    /// File to print
    file: PathBuf,

    /// Language extension or name (default: from the file extension)
    #[arg(short, long)]
    lang: Option<String>,

    /// Lines to print, 1-based and inclusive (A:B, A:, :B or A)
    #[arg(long)]
    lines: Option<String>,
}

/// Arguments for the compile subcommand.
#[derive(Parser, Debug)]
struct CompileCommand {
    /// Output directory
    #[arg(short, long)]
    out: PathBuf,

    /// Language source TOML (default: from config, else bundled)
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Number of parallel jobs
    #[arg(short, long)]
    jobs: Option<usize>,
}

/// Arguments for the rebuild-map subcommand.
#[derive(Parser, Debug)]
struct RebuildMapCommand {
    /// Language source TOML (default: from config, else bundled)
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Where to write the map (default: from config, else stdout)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// Arguments for the languages subcommand.
#[derive(Parser, Debug)]
struct LanguagesCommand {
    /// Language source TOML (default: from config, else bundled)
    #[arg(short, long)]
    source: Option<PathBuf>,
}

/// Arguments for the init subcommand.
#[derive(Parser, Debug)]
struct InitCommand {
    /// Target file (default: ./tinct.toml)
    path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(short, long)]
    force: bool,

    /// Print the configuration instead of writing it
    #[arg(long, conflicts_with = "force")]
    print: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color)?;

    let config = load_config(cli.config.as_deref())?;

    execute_command(cli.command, cli.no_color, config)
}

/// Initialize the logging system.
///
/// Events go to stderr so they never mix with command output.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| TinctError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

fn execute_command(command: Commands, no_color: bool, config: Config) -> Result<()> {
    match command {
        Commands::Tokens(args) => execute_tokens(args, config),
        Commands::Highlight(args) => execute_highlight(args, no_color, config),
        Commands::Compile(args) => execute_compile(args, config),
        Commands::RebuildMap(args) => execute_rebuild(args, config),
        Commands::Languages(args) => execute_languages(args, config),
        Commands::Init(args) => execute_init(args, config),
    }
}

fn execute_tokens(args: TokensCommand, config: Config) -> Result<()> {
    let tokens_args = TokensArgs {
        file: args.file,
        lang: args.lang,
        lines: args.lines,
        json: args.json,
        emit_whitespace: config.scan.emit_whitespace && !args.no_whitespace,
        manager: config.manager_config(None),
    };
    run_tokens(tokens_args).map(|_| ())
}

fn execute_highlight(args: HighlightCommand, no_color: bool, config: Config) -> Result<()> {
    let highlight_args = HighlightArgs {
        file: args.file,
        lang: args.lang,
        lines: args.lines,
        color: !no_color,
        manager: config.manager_config(None),
        palette: config.palette,
    };
    run_highlight(highlight_args)
}

fn execute_compile(args: CompileCommand, config: Config) -> Result<()> {
    let compile_args = CompileArgs {
        out: args.out,
        jobs: args.jobs.unwrap_or(config.compile.jobs),
        manager: config.manager_config(args.source.as_deref()),
    };
    run_compile(compile_args).map(|_| ())
}

fn execute_rebuild(args: RebuildMapCommand, config: Config) -> Result<()> {
    let rebuild_args = RebuildArgs {
        out: args.out,
        manager: config.manager_config(args.source.as_deref()),
    };
    run_rebuild(rebuild_args).map(|_| ())
}

fn execute_languages(args: LanguagesCommand, config: Config) -> Result<()> {
    let languages_args = LanguagesArgs {
        manager: config.manager_config(args.source.as_deref()),
    };
    run_languages(languages_args).map(|_| ())
}

fn execute_init(args: InitCommand, config: Config) -> Result<()> {
    let init_args = InitArgs {
        path: args.path,
        force: args.force,
        print: args.print,
        config,
    };
    run_init(init_args).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_tokens() {
        let cli = Cli::parse_from(["tinct", "tokens", "main.c"]);
        if let Commands::Tokens(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("main.c"));
            assert!(!args.json);
            assert!(!args.no_whitespace);
        } else {
            panic!("Expected Tokens command");
        }
    }

    #[test]
    fn test_cli_parse_tokens_options() {
        let cli = Cli::parse_from([
            "tinct",
            "tokens",
            "main.c",
            "--lang",
            "rs",
            "--lines",
            "2:4",
            "--json",
            "--no-whitespace",
        ]);
        if let Commands::Tokens(args) = cli.command {
            assert_eq!(args.lang, Some("rs".to_string()));
            assert_eq!(args.lines, Some("2:4".to_string()));
            assert!(args.json);
            assert!(args.no_whitespace);
        } else {
            panic!("Expected Tokens command");
        }
    }

    #[test]
    fn test_cli_parse_highlight() {
        let cli = Cli::parse_from(["tinct", "highlight", "a.py", "--lines", "3"]);
        if let Commands::Highlight(args) = cli.command {
            assert_eq!(args.lines, Some("3".to_string()));
        } else {
            panic!("Expected Highlight command");
        }
    }

    #[test]
    fn test_cli_parse_compile() {
        let cli = Cli::parse_from(["tinct", "compile", "--out", "/tmp/langs", "--jobs", "3"]);
        if let Commands::Compile(args) = cli.command {
            assert_eq!(args.out, PathBuf::from("/tmp/langs"));
            assert_eq!(args.jobs, Some(3));
            assert_eq!(args.source, None);
        } else {
            panic!("Expected Compile command");
        }
    }

    #[test]
    fn test_cli_compile_requires_out() {
        assert!(Cli::try_parse_from(["tinct", "compile"]).is_err());
    }

    #[test]
    fn test_cli_parse_rebuild_map() {
        let cli = Cli::parse_from(["tinct", "rebuild-map", "--source", "langs.toml"]);
        if let Commands::RebuildMap(args) = cli.command {
            assert_eq!(args.source, Some(PathBuf::from("langs.toml")));
            assert_eq!(args.out, None);
        } else {
            panic!("Expected RebuildMap command");
        }
    }

    #[test]
    fn test_cli_parse_languages() {
        let cli = Cli::parse_from(["tinct", "languages"]);
        assert!(matches!(cli.command, Commands::Languages(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["tinct", "init", "conf/tinct.toml", "--force"]);
        if let Commands::Init(args) = cli.command {
            assert_eq!(args.path, Some(PathBuf::from("conf/tinct.toml")));
            assert!(args.force);
            assert!(!args.print);
        } else {
            panic!("Expected Init command");
        }
        assert!(Cli::try_parse_from(["tinct", "init", "--force", "--print"]).is_err());
    }

    #[test]
    fn test_cli_parse_global_flags() {
        let cli = Cli::parse_from([
            "tinct",
            "--verbose",
            "--no-color",
            "--config",
            "/path/to/tinct.toml",
            "languages",
        ]);
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/tinct.toml")));
    }
}
