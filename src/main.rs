mod cache;
mod hazards;
mod location;
mod predict;
mod telemetry;
mod weather;
mod web;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::predict::{attach_forecasts, NoWind};
use crate::telemetry::track::selected_balloons;
use crate::telemetry::WindborneClient;
use crate::weather::WeatherClient;
use crate::web::Config;

#[derive(Parser)]
#[command(name = "skydrift")]
#[command(about = "Balloon constellation tracker with trajectory forecasts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Print a representative selection of balloons with forecasts as JSON
    Select {
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<String>,
        /// Number of balloons to select
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Forecast from momentum only, without wind lookups
        #[arg(long)]
        no_wind: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Select {
            config,
            count,
            no_wind,
        } => select(config.as_deref(), count, no_wind).await,
    }
}

fn load_config(path: Option<&str>) -> Option<Config> {
    match Config::load(path) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            None
        }
    }
}

async fn serve(path: Option<&str>) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn select(path: Option<&str>, count: Option<usize>, no_wind: bool) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    let count = count.unwrap_or(config.prediction.default_count);
    if count == 0 {
        eprintln!("Count must be at least 1");
        return ExitCode::FAILURE;
    }

    let telemetry = match WindborneClient::new(&config.telemetry) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error creating telemetry client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let weather = match WeatherClient::new(&config.weather) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error creating weather client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let snapshot = telemetry.snapshot().await;
    if snapshot.is_empty() {
        eprintln!("No telemetry available");
        return ExitCode::FAILURE;
    }

    let hours = &config.prediction.hours_ahead;
    let mut selection = selected_balloons(&snapshot, count);
    if no_wind {
        attach_forecasts(&mut selection.balloons, &NoWind, hours).await;
    } else {
        attach_forecasts(&mut selection.balloons, &weather, hours).await;
    }

    match serde_json::to_string_pretty(&selection) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error encoding selection: {}", e);
            ExitCode::FAILURE
        }
    }
}
