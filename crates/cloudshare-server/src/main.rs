//! CloudShare development server
//!
//! Serves the credits API from an in-memory ledger and the built frontend
//! from a static directory.

use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cloudshare_server::{API_PREFIX, AppState, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into());

    // Static files (WASM frontend) for everything outside the API
    let app = app(AppState::in_memory()).fallback_service(ServeDir::new(&static_dir));

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("CloudShare dev server running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  {}/users/credits", API_PREFIX);
    tracing::info!("  POST {}/payments/add-credits", API_PREFIX);
    tracing::info!("  GET  {}/transactions", API_PREFIX);
    tracing::info!("  GET  /*  (static files from {})", static_dir);

    axum::serve(listener, app).await?;

    Ok(())
}
