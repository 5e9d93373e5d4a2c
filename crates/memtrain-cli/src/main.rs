//! memtrain CLI: interactive flashcard training in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "memtrain", version, about = "A program for better memory training")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a training session
    Train {
        /// The CSV file to load
        csvfile: PathBuf,

        /// Train these tags only (comma-separated)
        #[arg(short = 't', long)]
        tags: Option<String>,

        /// Do not train these tags (comma-separated)
        #[arg(short = 'x', long)]
        not_tags: Option<String>,

        /// Which level to study: 1, 2 or 3
        #[arg(short = 'l', long)]
        level: Option<String>,

        /// Number of questions for this session
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        nquestions: Option<i64>,

        /// Random seed for a reproducible question order
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the session summary as JSON to this path
        #[arg(long)]
        summary_json: Option<PathBuf>,
    },

    /// Show the settings and contents of a table
    Inspect {
        /// The CSV file to load
        csvfile: PathBuf,

        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create an example table
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("memtrain=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Train {
            csvfile,
            tags,
            not_tags,
            level,
            nquestions,
            seed,
            config,
            summary_json,
        } => commands::train::execute(commands::train::TrainArgs {
            csvfile,
            tags,
            not_tags,
            level,
            nquestions,
            seed,
            config,
            summary_json,
        }),
        Commands::Inspect { csvfile, json } => commands::inspect::execute(csvfile, json),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
