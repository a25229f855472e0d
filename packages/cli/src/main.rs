#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for inspecting the administrative index and running predictions
//! without the HTTP server.
//!
//! ```text
//! hazard_map_cli provinces
//! hazard_map_cli resolve <provincia> <canton>
//! hazard_map_cli predict <provincia> <canton> --day 15 --month 3
//! ```
//!
//! Output is JSON on stdout. The prediction service is configured from the
//! same `AI_SERVICE_*` environment variables as the server.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use hazard_map_geography::{
    AdministrativeIndex,
    load::{DEFAULT_COORDINATES_PATH, DEFAULT_DIVISIONS_PATH, load_index},
    resolve,
};
use hazard_map_prediction::{
    aggregate::aggregate,
    client::HttpPredictionClient,
    orchestrator::{PredictionOrchestrator, PredictionQuery},
    service_config::ServiceConfig,
};

#[derive(Parser)]
#[command(
    name = "hazard_map_cli",
    about = "Query the hazard map index and prediction service"
)]
struct Cli {
    /// Division tree JSON
    #[arg(long, global = true, default_value = DEFAULT_DIVISIONS_PATH)]
    divisions: PathBuf,

    /// Parish coordinates JSON
    #[arg(long, global = true, default_value = DEFAULT_COORDINATES_PATH)]
    coordinates: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List provinces and their cantons
    Provinces,
    /// Resolve a province and canton to its parishes
    Resolve {
        /// Province name
        provincia: String,
        /// Canton name
        canton: String,
    },
    /// Request predictions for every parish of a canton
    Predict {
        /// Province name
        provincia: String,
        /// Canton name
        canton: String,
        /// Day of month (1-31)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=31))]
        day: u8,
        /// Month (1-12)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
        month: u8,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let index = Arc::new(load_index(&cli.divisions, &cli.coordinates)?);

    match cli.command {
        Commands::Provinces => {
            let provinces: serde_json::Map<String, serde_json::Value> = index
                .provinces()
                .map(|(province, _)| (province.to_string(), index.canton_keys(province).into()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&provinces)?);
        }
        Commands::Resolve { provincia, canton } => {
            let resolution = resolve(&index, &provincia, &canton)?;
            let output = serde_json::json!({
                "province": resolution.province_key,
                "canton": resolution.canton_key,
                "match": format!("{:?}", resolution.match_kind),
                "parishes": resolution.parishes,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Predict {
            provincia,
            canton,
            day,
            month,
        } => {
            predict(&index, provincia, canton, day, month).await?;
        }
    }

    Ok(())
}

async fn predict(
    index: &AdministrativeIndex,
    provincia: String,
    canton: String,
    day: u8,
    month: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolution = resolve(index, &provincia, &canton)?;

    let config = ServiceConfig::from_env()?;
    let client = HttpPredictionClient::from_config(&config)?;
    log::info!(
        "Requesting {} parish predictions from {}",
        resolution.parishes.len(),
        client.url()
    );
    let orchestrator =
        PredictionOrchestrator::new(Arc::new(client), config.max_concurrent_requests);

    let query = PredictionQuery {
        day,
        month,
        provincia,
        canton,
    };
    let results = orchestrator.dispatch(resolution.parishes, &query).await;
    let response = aggregate(&query.provincia, &query.canton, results);

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
