mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::weather::WeatherOverrides;

#[derive(Parser)]
#[command(name = "taxi-data-fetcher")]
#[command(about = "Download NYC Yellow Taxi trip data and matching weather observations")]
struct Cli {
    /// Config file (defaults to ~/.config/taxi-data-fetcher/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log request details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download monthly trip-data files concurrently
    Taxi {
        /// Year to download (2009 through the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Directory to save files in
        #[arg(long)]
        save_dir: Option<PathBuf>,
        /// Download these URLs instead of resolving a year
        #[arg(long = "url")]
        urls: Vec<String>,
    },
    /// Download hourly weather observations from Open-Meteo
    Weather {
        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day, YYYY-MM-DD
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long, allow_negative_numbers = true)]
        latitude: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        longitude: Option<f64>,
        /// IANA time zone for returned timestamps
        #[arg(long)]
        time_zone: Option<String>,
        #[arg(long)]
        save_dir: Option<PathBuf>,
        #[arg(long)]
        filename: Option<String>,
    },
    /// Download the WMO weather code lookup table
    Codes {
        #[arg(long)]
        save_dir: Option<PathBuf>,
    },
    /// Download trip data, weather observations and weather codes
    All {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        save_dir: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::load_config(cli.config.as_deref());
    let save_dir_or_default = |dir: Option<PathBuf>| dir.unwrap_or_else(|| config.save_dir.clone());

    match cli.command {
        Command::Taxi {
            year,
            save_dir,
            urls,
        } => commands::taxi::run(&config, year, urls, &save_dir_or_default(save_dir)).await,
        Command::Weather {
            start,
            end,
            latitude,
            longitude,
            time_zone,
            save_dir,
            filename,
        } => {
            let overrides = WeatherOverrides {
                start,
                end,
                latitude,
                longitude,
                time_zone,
                filename,
            };
            commands::weather::run(&config, &save_dir_or_default(save_dir), overrides).await
        }
        Command::Codes { save_dir } => {
            commands::codes::run(&config, &save_dir_or_default(save_dir)).await
        }
        Command::All { year, save_dir } => {
            commands::all::run(&config, year, &save_dir_or_default(save_dir)).await
        }
    }
}
