//! eptrials Command Line Interface
//!
//! Extracts per-trial behavioral measurements from E-Prime log files
//! for the three scanner protocols and writes per-participant CSV
//! tables.
//!
//! # Commands
//!
//! - `eptrials parse` - Parse run files into a trial table
//! - `eptrials list` - Audit a study directory for available runs

mod list;
mod parse;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// eptrials - behavioral trial extraction
///
/// Converts stimulus-presentation log files into flat trial tables for
/// statistical analysis.
#[derive(Parser)]
#[command(name = "eptrials")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one participant's run files into a CSV trial table
    ///
    /// Examples:
    ///   eptrials parse --task VerbalMemA --participant I00020 \
    ///       --outfile verbal_20.csv run1.txt run2.txt
    ///   eptrials parse --task VisualMem --participant 31 --keep-going \
    ///       --outfile visual_31.csv run1.txt run2.txt run3.txt
    Parse(parse::ParseArgs),

    /// List available participants and run directories in a study tree
    List(list::ListArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Parse(args) => parse::run(args),
        Commands::List(args) => list::run(args),
    }
}
