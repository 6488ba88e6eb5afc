//! Query server for public land lookups.
//!
//! Loads the public lands layer once at startup and answers point queries
//! over HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use foray::config::Config;
use foray::models::{LandSummary, LoadStats, PublicLands};
use foray::pip::{HoleMode, LandService};

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "Public land lookup server")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// GeoJSON FeatureCollection of public lands (overrides config)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(short, long)]
    listen: Option<String>,

    /// Treatment of polygon holes: ignore or exclude (overrides config)
    #[arg(long)]
    hole_mode: Option<HoleMode>,
}

/// Application state shared across handlers
struct AppState {
    service: LandService,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = resolve_config(&args)?;

    info!("Foray Query Server");
    info!("Loading public lands from {}", config.data_path.display());

    let lands = PublicLands::load(&config.data_path)
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;

    if lands.is_empty() {
        warn!(
            "No public lands found in {}; every lookup will report none",
            config.data_path.display()
        );
    }

    let service = if config.use_index {
        LandService::new(lands, config.hole_mode)
    } else {
        LandService::linear(lands, config.hole_mode)
    };
    info!(
        "Serving {} public lands (holes: {}, indexed: {})",
        service.lands().len(),
        service.hole_mode(),
        service.is_indexed()
    );

    let app = router(Arc::new(AppState { service }));

    info!("Starting server on {}", config.listen);

    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/public-land", get(public_land_handler))
        .route("/v1/lands", get(lands_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = Config::resolve(args.config.as_deref(), args.data.as_deref(), args.hole_mode)?;

    if let Some(listen) = &args.listen {
        config.listen = listen.clone();
    }

    Ok(config)
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        lands: state.service.lands().len(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    lands: usize,
}

/// Public land containing a point
async fn public_land_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PointQueryParams>,
) -> Result<Json<PublicLandResponse>, (StatusCode, String)> {
    if !params.lat.is_finite() || !params.lng.is_finite() {
        return Err((
            StatusCode::BAD_REQUEST,
            "lat and lng must be finite numbers".to_string(),
        ));
    }

    let land = state.service.lookup(params.lat, params.lng);

    Ok(Json(PublicLandResponse {
        name: land.map(|l| l.name.clone()),
        agency: land.and_then(|l| l.agency.clone()),
        access: land.and_then(|l| l.access.clone()),
    }))
}

/// Loaded lands without geometry
async fn lands_handler(State(state): State<Arc<AppState>>) -> Json<LandsResponse> {
    let lands = state.service.lands();
    Json(LandsResponse {
        lands: lands.iter().map(|l| l.summary()).collect(),
        stats: lands.stats(),
        hole_mode: state.service.hole_mode(),
    })
}

#[derive(Deserialize)]
struct PointQueryParams {
    /// Point latitude
    lat: f64,
    /// Point longitude
    lng: f64,
}

#[derive(Serialize)]
struct PublicLandResponse {
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    agency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    access: Option<String>,
}

#[derive(Serialize)]
struct LandsResponse {
    lands: Vec<LandSummary>,
    stats: LoadStats,
    hole_mode: HoleMode,
}
