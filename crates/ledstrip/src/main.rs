//! ledstrip: span/spacing fills and timed animations for addressable LED strips.
//!
//! Frames are previewed in the terminal as a line of truecolor blocks.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock};

use clap::{ArgAction, Parser};

mod cli;

/// Shared shutdown flag. Cleared by the Ctrl+C handler, checked between frames.
pub static RUNNING: LazyLock<Arc<AtomicBool>> = LazyLock::new(|| Arc::new(AtomicBool::new(true)));

#[derive(Parser)]
#[command(
    name = "ledstrip",
    version,
    about = "Span/spacing fills and timed animations for addressable LED strips"
)]
struct Args {
    /// Output as JSON (for effects, colors, config)
    #[arg(long, global = true)]
    json: bool,

    /// Log more detail (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Read settings from this file instead of the default config path
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: cli::Command,
}

fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(args.verbose)),
    )
    .format_timestamp(None)
    .format_target(false)
    .init();

    // Install Ctrl+C handler
    let running = RUNNING.clone();
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .ok();

    if let Err(e) = cli::run(args.command, args.json, args.config.as_deref()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
