//! Showcue console - configuration inspection entry point
//!
//! The orchestration services are embedded by a UI process; this binary
//! covers the operator-facing configuration tasks: validating a config
//! file, previewing the resolved event plan, and dumping the JSON schema.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use clap::{Parser, Subcommand};
use showcue::{cli, config::Config};

#[derive(Parser)]
#[command(name = "showcue")]
#[command(about = "Playback orchestration configuration tools")]
struct Cli {
    /// Path to the configuration file (defaults to the XDG location)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and print a summary
    Validate,
    /// Preview the event plan for content of the given duration
    Plan {
        /// Content duration in seconds
        #[arg(short, long)]
        duration_secs: u64,
    },
    /// Print the configuration file's JSON schema
    Schema,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    showcue::tracing_config::init()?;

    let args = Cli::parse();

    if matches!(args.command, Commands::Schema) {
        println!("{}", cli::schema_json());
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    match args.command {
        Commands::Validate => println!("{}", cli::validate_report(&config)),
        Commands::Plan { duration_secs } => {
            let report = cli::plan_report(
                &config,
                Duration::from_secs(duration_secs),
                Local::now().naive_local(),
            )?;
            println!("{report}");
        }
        Commands::Schema => {}
    }

    Ok(())
}
