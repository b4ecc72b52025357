//! Regional CMIP6 ingester.
//!
//! Reads input file paths from stdin, one per line, and writes every file
//! into a freshly created cube. Prints the store name on success.

mod config;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use cmip_common::CoordinateSystem;
use cube_store::RegionalStore;
use ingestion::Ingester;

use config::IngesterConfig;

#[derive(Parser, Debug)]
#[command(name = "ingester")]
#[command(about = "Ingest regional CMIP6 time-series into a Zarr cube")]
struct Args {
    /// Store directory (replaced if it exists)
    #[arg(short, long, env = "CMIP6_STORE", default_value = cmip_common::cmip6::DATASET_NAME)]
    output: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing; stdout is reserved for the store name
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting regional CMIP6 ingester");

    let config = IngesterConfig::from_env(args.output)?;
    info!(config = ?config, "Loaded configuration");

    let coords = CoordinateSystem::cmip6().context("Failed to build CMIP6 registries")?;

    RegionalStore::create(&config.output, &coords, &config.store)
        .with_context(|| format!("Failed to create store at {}", config.store_name()))?;
    let store = RegionalStore::open(&config.output)
        .with_context(|| format!("Failed to open store at {}", config.store_name()))?;

    let ingester = Ingester::new(store);
    let summary = ingester.ingest_list(io::stdin().lock())?;
    info!(
        files = summary.files,
        cells = summary.cells_written,
        "Store complete"
    );

    println!("{}", config.store_name());
    Ok(())
}
