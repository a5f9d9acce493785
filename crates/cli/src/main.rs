//! Headless command line front end.
//!
//! Run with: `skirmish <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Content, Play, Progress};

/// Headless runner for the skirmish combat simulation
#[derive(Parser)]
#[command(name = "skirmish")]
#[command(about = "Play and inspect skirmish runs without a frontend", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play a run with the autopilot and print the summary
    Play(Play),

    /// List the characters, stages and skills in a data directory
    Content(Content),

    /// Show or reset saved progress
    Progress(Progress),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    match cli.command {
        Command::Play(cmd) => cmd.execute(),
        Command::Content(cmd) => cmd.execute(),
        Command::Progress(cmd) => cmd.execute(),
    }
}

/// Logs go to stderr so stdout stays clean for summaries.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
