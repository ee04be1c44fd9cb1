//! SlateKV Server Binary
//!
//! Loads the snapshot, serves TCP clients, and persists on the way out.

use std::sync::Arc;
use std::thread;

use clap::Parser;
use slatekv::network::Server;
use slatekv::{Config, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// SlateKV Server
#[derive(Parser, Debug)]
#[command(name = "slatekv-server")]
#[command(about = "In-memory key-value store with transactions and JSON snapshots")]
#[command(version)]
struct Args {
    /// JSON snapshot file
    #[arg(short, long, default_value = "data.json")]
    data_file: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    listen: String,

    /// Maximum concurrent connections
    #[arg(short, long, default_value = "1024")]
    max_connections: usize,

    /// Skip the final persist when the server stops
    #[arg(long)]
    no_persist_on_shutdown: bool,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,slatekv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .data_file(&args.data_file)
        .listen_addr(&args.listen)
        .max_connections(args.max_connections)
        .persist_on_shutdown(!args.no_persist_on_shutdown)
        .build();

    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        std::process::exit(1);
    }

    // Serving against an unknown state is not allowed
    let store = Arc::new(Store::new());
    if let Err(e) = store.load_data(&config.data_file) {
        tracing::error!("Failed to load data from {}: {}", config.data_file.display(), e);
        std::process::exit(1);
    }

    let cpus = thread::available_parallelism().map_or(1, |n| n.get());

    tracing::info!("SlateKV Server v{}", slatekv::VERSION);
    tracing::info!("Data file: {}", config.data_file.display());
    tracing::info!("Listen address: {}", config.listen_addr);
    tracing::info!("Records loaded: {}", store.len());
    tracing::info!("CPUs: {}", cpus);

    let server = match Server::bind(config.clone(), Arc::clone(&store)) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    let shutdown = server.shutdown_handle();
    if let Err(e) = ctrlc::set_handler(move || {
        tracing::info!("Received shutdown signal, stopping server...");
        shutdown.shutdown();
    }) {
        tracing::warn!("Failed to install signal handler: {}", e);
    }

    if let Err(e) = server.run_to_completion() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
