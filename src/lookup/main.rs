//! One-shot public land lookup.
//!
//! Loads a GeoJSON FeatureCollection and reports which public land, if any,
//! each given point falls on.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use foray::config::Config;
use foray::models::{GeoPoint, PublicLands};
use foray::pip::{HoleMode, LandService};

#[derive(Parser, Debug)]
#[command(name = "lookup")]
#[command(about = "Find the public land containing each point")]
struct Args {
    /// Points as LAT,LNG
    #[arg(required = true, allow_hyphen_values = true)]
    points: Vec<GeoPoint>,

    /// GeoJSON FeatureCollection of public lands
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Treatment of polygon holes: ignore or exclude
    #[arg(long)]
    hole_mode: Option<HoleMode>,

    /// Print JSON instead of one name per line
    #[arg(long)]
    json: bool,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct LookupRow<'a> {
    lat: f64,
    lng: f64,
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    agency: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    access: Option<&'a str>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::resolve(args.config.as_deref(), args.data.as_deref(), args.hole_mode)?;
    info!("Data: {}", config.data_path.display());

    let lands = PublicLands::load(&config.data_path)
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;

    let service = if config.use_index {
        LandService::new(lands, config.hole_mode)
    } else {
        LandService::linear(lands, config.hole_mode)
    };

    println!("{}", render(&rows(&service, &args.points), args.json)?);

    Ok(())
}

fn rows<'a>(service: &'a LandService, points: &[GeoPoint]) -> Vec<LookupRow<'a>> {
    points
        .iter()
        .map(|p| {
            let land = service.lookup(p.lat, p.lon);
            LookupRow {
                lat: p.lat,
                lng: p.lon,
                name: land.map(|l| l.name.as_str()),
                agency: land.and_then(|l| l.agency.as_deref()),
                access: land.and_then(|l| l.access.as_deref()),
            }
        })
        .collect()
}

/// One name per line (`-` for a miss), or a pretty JSON array
fn render(rows: &[LookupRow], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(rows)?);
    }

    Ok(rows
        .iter()
        .map(|row| row.name.unwrap_or("-"))
        .collect::<Vec<_>>()
        .join("\n"))
}
