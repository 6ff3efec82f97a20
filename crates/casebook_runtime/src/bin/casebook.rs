//! Casebook CLI entry point.

use std::io;
use std::process::ExitCode;

use casebook_runtime::config::DEFAULT_HISTORY_LEN;
use casebook_runtime::{Repl, SessionConfig, demo, run_batch};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "casebook")]
#[command(about = "Play a text adventure driven by a case-grammar parser", version)]
struct Cli {
    /// Seed for choosing between message variants
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of commands kept in the history
    #[arg(long, default_value_t = DEFAULT_HISTORY_LEN)]
    history: usize,

    /// Read commands from stdin instead of an interactive prompt
    #[arg(short, long)]
    batch: bool,

    /// Log filter, e.g. `debug` or `casebook_parser=trace` (defaults to RUST_LOG)
    #[arg(long)]
    log: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> casebook_runtime::Result<()> {
    let config = SessionConfig::default()
        .with_seed(cli.seed)
        .with_history_len(cli.history);
    let mut session = demo::session(config)?;

    if cli.batch {
        let stdin = io::stdin();
        let stdout = io::stdout();
        return run_batch(&mut session, stdin.lock(), &mut stdout.lock());
    }

    Repl::new(session)?.run()
}
