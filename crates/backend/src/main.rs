use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::services::{ServeDir, ServeFile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backend::auth::google::GoogleClient;
use backend::routes::build_router;
use backend::store::{FileStore, UserStore};
use backend::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    tracing::info!("Starting AI Playground backend server");

    let store: Arc<dyn UserStore> = Arc::new(FileStore::open(&config.store_path)?);
    tracing::info!("User store loaded from {}", config.store_path.display());

    let google = GoogleClient::new(&config);

    let state = AppState {
        config: Arc::new(config),
        store,
        google,
    };

    let app = build_router(state.clone());

    // Serve static frontend files if the directory exists
    let frontend_dir = &state.config.frontend_dir;
    let app = if std::path::Path::new(frontend_dir).exists() {
        tracing::info!("Serving frontend from {}", frontend_dir);
        let index_path = format!("{}/index.html", frontend_dir);
        let serve_dir = ServeDir::new(frontend_dir).not_found_service(ServeFile::new(&index_path));
        app.fallback_service(serve_dir)
    } else {
        tracing::info!(
            "Frontend directory not found at {}, serving API only",
            frontend_dir
        );
        app
    };

    // Run server
    let addr = SocketAddr::new(
        state
            .config
            .host
            .parse()
            .context("HOST must be a valid IP address")?,
        state.config.port,
    );
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
