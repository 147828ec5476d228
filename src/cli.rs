use clap::{Parser, Subcommand};
use crate::models::ChargingType;

#[derive(Parser)]
#[command(name = "evfinder")]
#[command(about = "Find the nearest EV charging stations")]
#[command(version)]
pub struct Cli {
    /// Nearest-stations endpoint (overrides EVFINDER_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive station finder
    Tui {
        /// Prefill latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,

        /// Prefill longitude
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<String>,

        /// Prefill charging type (all, dcfast, level2, level1)
        #[arg(short = 't', long = "type")]
        charging_type: Option<String>,
    },

    /// Search once and print the stations
    Search {
        /// Latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: String,

        /// Longitude
        #[arg(long, allow_hyphen_values = true)]
        lon: String,

        /// Charging type (all, dcfast, level2, level1)
        #[arg(short = 't', long = "type", default_value = "all")]
        charging_type: String,
    },
}

impl Commands {
    pub fn parse_charging_type(charging_type: &str) -> Result<ChargingType, anyhow::Error> {
        match charging_type.to_lowercase().as_str() {
            "all" => Ok(ChargingType::All),
            "dcfast" | "dc-fast" | "dc_fast" | "dc" => Ok(ChargingType::DcFast),
            "level2" | "level-2" | "l2" => Ok(ChargingType::Level2),
            "level1" | "level-1" | "l1" => Ok(ChargingType::Level1),
            other => Err(anyhow::anyhow!(
                "Unsupported charging type: {}. Supported types: all, dcfast, level2, level1",
                other
            )),
        }
    }
}
