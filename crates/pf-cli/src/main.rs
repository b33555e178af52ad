//! panelfit CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod run;

#[derive(Parser)]
#[command(name = "panelfit")]
#[command(about = "panelfit - panel regression pipeline with outlier screening")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full pipeline: load, filter, regress, cache, render charts
    Run {
        /// Pipeline configuration (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Directory with per-scenario Parquet files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Directory for rendered charts
        #[arg(long, default_value = "visual")]
        visual_dir: PathBuf,

        /// Directory for cached Parquet outputs
        #[arg(long, default_value = "cache")]
        cache_dir: PathBuf,

        /// Also cache the post-filter panel as filtered.parquet
        #[arg(long)]
        cache_filtered: bool,
    },

    /// Regression only: summary table to Parquet and pretty JSON
    Regress {
        /// Pipeline configuration (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Directory with per-scenario Parquet files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Directory for cached Parquet outputs
        #[arg(long, default_value = "cache")]
        cache_dir: PathBuf,

        /// Also cache the post-filter panel as filtered.parquet
        #[arg(long)]
        cache_filtered: bool,

        /// Output file for the summary records (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render charts from a cached summary table
    Viz {
        /// Pipeline configuration (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Cached summary table (regression.parquet)
        #[arg(long)]
        results: PathBuf,

        /// Directory for rendered charts
        #[arg(long, default_value = "visual")]
        visual_dir: PathBuf,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Run { config, data_dir, visual_dir, cache_dir, cache_filtered } => {
            run::cmd_run(&config, &data_dir, &visual_dir, &cache_dir, cache_filtered)
        }
        Commands::Regress { config, data_dir, cache_dir, cache_filtered, output } => {
            run::cmd_regress(&config, &data_dir, &cache_dir, cache_filtered, output.as_ref())
        }
        Commands::Viz { config, results, visual_dir } => {
            run::cmd_viz(&config, &results, &visual_dir)
        }
        Commands::Version => {
            println!("panelfit {}", pf_core::VERSION);
            Ok(())
        }
    }
}
