//! airgraph daemon - HTTP front end for the flight network engine.
//!
//! A single binary that loads the OpenFlights dataset into memory and
//! serves lookup, distance, one-hop connection, and report queries plus
//! insert/modify/remove mutations over HTTP. State is process-lifetime
//! only; restarting reloads from the dataset files.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use airgraph_core::{loader, Catalog, EntityStore, LoadStats};
use airgraph_daemon::server::{create_router, AppState};

/// airgraph flight network daemon
#[derive(Parser, Debug)]
#[command(name = "airgraph-daemon")]
#[command(about = "In-memory flight network query daemon")]
#[command(version)]
struct Cli {
    /// Directory containing airlines.dat, airports.dat, routes.dat
    #[arg(default_value = "data")]
    data_dir: PathBuf,

    /// HTTP port to listen on
    #[arg(short, long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Origin allowed by CORS
    #[arg(long, env = "ALLOWED_ORIGIN", default_value = "http://localhost:3000")]
    allowed_origin: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    info!("Starting airgraph daemon, dataset dir {:?}", cli.data_dir);

    let store = load_dataset(&cli.data_dir);
    let catalog = Catalog::from_store(store);
    let stats = catalog.stats();
    info!(
        "Catalog ready: {} airlines, {} airports, {} routes",
        stats.airlines, stats.airports, stats.routes
    );

    let allowed_origin: HeaderValue = cli
        .allowed_origin
        .parse()
        .with_context(|| format!("invalid allowed origin {:?}", cli.allowed_origin))?;

    let state = AppState::new(catalog);
    let router = create_router(state, allowed_origin);

    let addr = format!("0.0.0.0:{}", cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("airgraph daemon listening on http://{}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}

/// Load the three dataset files. A missing or unreadable file is logged
/// and skipped; the daemon still starts with whatever loaded (the store
/// can be populated through the mutation API afterwards).
fn load_dataset(dir: &Path) -> EntityStore {
    let mut store = EntityStore::new();

    match loader::load_airlines(&mut store, &dir.join("airlines.dat")) {
        Ok(stats) => log_load("airlines", stats),
        Err(e) => warn!("skipping airlines: {}", e),
    }
    match loader::load_airports(&mut store, &dir.join("airports.dat")) {
        Ok(stats) => log_load("airports", stats),
        Err(e) => warn!("skipping airports: {}", e),
    }
    // Routes last: their references must already be present.
    match loader::load_routes(&mut store, &dir.join("routes.dat")) {
        Ok(stats) => log_load("routes", stats),
        Err(e) => warn!("skipping routes: {}", e),
    }

    store
}

fn log_load(what: &str, stats: LoadStats) {
    info!(
        "Loaded {} {} ({} rows skipped)",
        stats.loaded, what, stats.skipped
    );
}
