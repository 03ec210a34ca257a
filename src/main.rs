use survey_collector::api::assets::StaticAssets;
use survey_collector::api::router::build_router;
use survey_collector::config::{ServerConfig, USAGE};
use survey_collector::storage::store::JsonFileStore;

use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().skip(1).any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .init();

    // 1. Storage:
    let store = Arc::new(JsonFileStore::open(&config.data_file, config.write_policy).await?);

    // 2. HTTP Router:
    let assets = StaticAssets::new(&config.public_dir);
    tracing::info!("Serving static files from {}", assets.root().display());
    let app = build_router(store, assets);

    // 3. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
