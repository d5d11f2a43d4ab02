//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Brick Rigs flight planner", long_about = None)]
pub struct Cli {
    /// Chart file (JSON). Defaults to $BFP_CHART, then the built-in chart.
    #[arg(long, global = true)]
    pub chart: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find a route between two airports
    Route {
        /// Departure ICAO code
        departure: String,
        /// Arrival ICAO code
        arrival: String,
        /// Print the full route description as JSON
        #[arg(long)]
        json: bool,
    },
    /// Plan a route and write a .bfp flight plan
    Plan(PlanArgs),
    /// Show a .bfp flight plan as an ATC strip
    Show {
        file: PathBuf,
        /// Print the briefing instead of the ATC strip
        #[arg(long)]
        briefing: bool,
    },
    /// List chart contents and data problems
    Chart,
}

#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// Departure ICAO code
    pub departure: String,
    /// Arrival ICAO code
    pub arrival: String,

    #[arg(long, default_value = "")]
    pub airline: String,
    #[arg(long, default_value = "")]
    pub flight_number: String,
    #[arg(long, default_value = "")]
    pub aircraft_type: String,
    #[arg(long, default_value = "")]
    pub variant: String,
    #[arg(long, default_value = "")]
    pub registration: String,
    #[arg(long, default_value = "")]
    pub fuel: String,
    #[arg(long, default_value = "")]
    pub empty_weight: String,
    #[arg(long, default_value = "")]
    pub pax: String,
    #[arg(long, default_value = "")]
    pub cargo: String,
    #[arg(long, default_value = "")]
    pub hazardous: String,

    /// Output flight plan
    #[arg(long, default_value = "flightplan.bfp")]
    pub out: PathBuf,

    /// Also write a plain-text briefing
    #[arg(long)]
    pub briefing: Option<PathBuf>,
}
