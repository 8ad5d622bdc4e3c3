mod capture;
mod cli;
mod config;
mod export;
mod filter;
mod geo;
mod model;
mod recorder;
mod session;
mod share;
mod storage;
mod tracking;

use std::process;

use tracing_subscriber::EnvFilter;

use config::Config;
use storage::Storage;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("FIELDTRACK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}");
        process::exit(1);
    });

    let path = config.store_path().unwrap_or_else(|| {
        eprintln!("Could not determine home directory.");
        process::exit(1);
    });

    let storage = match Storage::open(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to open store at {}: {e}", path.display());
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(&config, &storage).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
