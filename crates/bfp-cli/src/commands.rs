//! Subcommand implementations.
//!
//! Each command renders its output to a `String` so the binary only prints.

use crate::cli::{Command, PlanArgs};
use anyhow::{Context, Result};
use bfp_core::{Chart, Clock, FlightPlanDocument, RouteDescription, RoutePlanner};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

pub fn run(command: Command, chart: Chart, clock: &dyn Clock) -> Result<String> {
    match command {
        Command::Route {
            departure,
            arrival,
            json,
        } => route(&RoutePlanner::new(chart), &departure, &arrival, json, clock),
        Command::Plan(args) => plan(&RoutePlanner::new(chart), &args, clock),
        Command::Show { file, briefing } => show(&file, briefing),
        Command::Chart => Ok(describe_chart(&chart)),
    }
}

pub fn route(
    planner: &RoutePlanner,
    departure: &str,
    arrival: &str,
    json: bool,
    clock: &dyn Clock,
) -> Result<String> {
    let desc = planner
        .plan(departure, arrival, clock)
        .with_context(|| format!("Failed to plan {departure} -> {arrival}"))?;

    if json {
        return serde_json::to_string_pretty(&desc).context("Failed to serialize route");
    }
    Ok(format_route(&desc))
}

fn format_route(desc: &RouteDescription) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ROUTE:      {}", desc.route);
    let _ = writeln!(
        out,
        "DISTANCE:   {:.0} units ({:.1} km)",
        desc.distance, desc.eta.distance_km
    );
    let _ = writeln!(out, "PIN TIME:   {}", desc.pin_time);
    let _ = writeln!(out, "TOTAL TIME: {}", desc.eta.total_time());
    if !desc.zones.is_empty() {
        let _ = writeln!(out, "ATC ZONES:  {}", desc.zones.join(", "));
    }
    out
}

pub fn plan(planner: &RoutePlanner, args: &PlanArgs, clock: &dyn Clock) -> Result<String> {
    let desc = planner
        .plan(&args.departure, &args.arrival, clock)
        .with_context(|| format!("Failed to plan {} -> {}", args.departure, args.arrival))?;

    let mut doc = FlightPlanDocument {
        airline: args.airline.clone(),
        flight_number: args.flight_number.clone(),
        aircraft_type: args.aircraft_type.clone(),
        variant: args.variant.clone(),
        registration: args.registration.clone(),
        fuel_amount: args.fuel.clone(),
        empty_weight: args.empty_weight.clone(),
        pax: args.pax.clone(),
        cargo_weight: args.cargo.clone(),
        hazardous: args.hazardous.clone(),
        ..FlightPlanDocument::default()
    };
    doc.update_full_weight();
    doc.apply_route(&desc);

    let json = doc.to_json().context("Failed to serialize flight plan")?;
    fs::write(&args.out, json)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;
    tracing::info!(path = %args.out.display(), "flight plan written");

    let mut out = format_route(&desc);
    let _ = writeln!(out, "SAVED:      {}", args.out.display());

    if let Some(path) = &args.briefing {
        fs::write(path, doc.briefing())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "briefing written");
        let _ = writeln!(out, "BRIEFING:   {}", path.display());
    }

    Ok(out)
}

pub fn show(file: &Path, briefing: bool) -> Result<String> {
    let json = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let doc = FlightPlanDocument::from_json(&json)
        .with_context(|| format!("Failed to import {}: check the format", file.display()))?;

    if briefing {
        Ok(doc.briefing())
    } else {
        Ok(format!("{}\n", doc.atc_strip()))
    }
}

pub fn describe_chart(chart: &Chart) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "AIRPORTS ({})", chart.airports().len());
    for airport in chart.airports() {
        let _ = writeln!(
            out,
            "  {} [{}, {}] {}",
            airport.code, airport.position.x, airport.position.y, airport.notams
        );
    }

    let graph = chart.graph();
    let _ = writeln!(out, "WAYPOINTS ({})", graph.len());
    for node in graph.nodes() {
        let _ = writeln!(
            out,
            "  {} [{}, {}] -> {}",
            node.id,
            node.position.x,
            node.position.y,
            graph.neighbors(&node.id).join(" ")
        );
    }

    let _ = writeln!(out, "ZONES ({})", chart.zones().len());
    for zone in chart.zones() {
        let _ = writeln!(out, "  {} r={}", zone.name, zone.radius);
    }

    let issues = graph.audit();
    if !issues.is_empty() {
        let _ = writeln!(out, "ISSUES ({})", issues.len());
        for issue in issues {
            let _ = writeln!(out, "  {issue}");
        }
    }

    out
}
