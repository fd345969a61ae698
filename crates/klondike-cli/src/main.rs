use std::io;
use std::path::PathBuf;

use clap::Parser;

use klondike_cli::config::PlayConfig;
use klondike_cli::logging::init_logging;
use klondike_cli::repl::Repl;
use klondike_core::AppInfo;
use klondike_core::game::session::GameSession;

/// Klondike solitaire played from the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "klondike",
    author,
    version,
    about = "Klondike solitaire with hints and undo"
)]
struct Cli {
    /// Path to an optional YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Deal seed; the same seed always gives the same deal.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override how many levels the hint search explores (1-32).
    #[arg(long, value_name = "DEPTH")]
    hint_depth: Option<usize>,

    /// Override the tracing level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Write structured JSON logs to this file.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Exit after validating the configuration (no game is started).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => PlayConfig::from_path(path)?,
        None => PlayConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    if let Some(depth) = cli.hint_depth {
        config.hint.max_depth = depth;
    }

    if let Some(level) = cli.log_level {
        config.logging.tracing_level = level;
    }

    if let Some(path) = cli.log_file {
        config.logging.log_path = path;
        config.logging.enable_structured = true;
    }

    config.validate()?;

    if cli.validate_only {
        println!("Configuration is valid.");
        return Ok(());
    }

    let _logging_guard = init_logging(&config.logging)?;
    let session = GameSession::with_config(config.seed, config.hint.to_hint_config());
    println!(
        "{} {} ({}), seed {}. Type 'help' for commands.",
        AppInfo::name(),
        AppInfo::version(),
        AppInfo::codename(),
        session.seed()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut repl = Repl::new(session, stdin.lock(), stdout.lock());
    repl.run()
}
