//! BFP CLI - Command line tools for the Brick Rigs flight planner.
//!
//! Provides the `bfp` binary:
//! - route: plan a route between two airports
//! - plan: plan a route and write a .bfp flight plan (and briefing)
//! - show: display a .bfp flight plan as an ATC strip
//! - chart: list chart contents and data problems

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command, PlanArgs};
pub use config::Config;
