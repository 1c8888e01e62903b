use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use supamem::{Config, Error, Memory, config, runner};

/// supamem - add one memory to a Supabase-backed store and search it back
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Emit debug logs to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ if verbose => EnvFilter::new("supamem=debug"),
        _ => EnvFilter::new("warn"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run() -> Result<(), Error> {
    println!("[memory] Initializing memory client with Supabase vector store...");
    let config = Config::load()?;
    for warning in config.warnings() {
        println!("[WARN] {warning}");
    }

    let mut memory = Memory::from_config(&config)?;

    let mut stdout = std::io::stdout().lock();
    runner::run_round_trip(&mut memory, &config.user_id, &mut stdout)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    // RUST_LOG may come from .env.
    let dotenv = config::load_dotenv();
    init_tracing(cli.verbose);
    match dotenv {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "loaded .env file"),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "ignoring malformed .env file"),
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_config() => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::debug!(error = ?e, "memory round trip failed");
            eprintln!("[ERROR] Unexpected error while running memory round trip: {e}");
            ExitCode::FAILURE
        }
    }
}
