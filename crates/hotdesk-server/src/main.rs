use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use hotdesk_api::auth::{AppState, AppStateInner};
use hotdesk_api::routes;

/// Startup configuration, resolved from the environment exactly once.
/// Everything downstream sees it through AppState — no ambient env reads
/// after boot.
struct Config {
    host: String,
    port: u16,
    db_path: String,
    jwt_secret: String,
}

impl Config {
    fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: std::env::var("HOTDESK_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("HOTDESK_PORT")
                .unwrap_or_else(|_| "5000".into())
                .parse()?,
            db_path: std::env::var("HOTDESK_DB_PATH").unwrap_or_else(|_| "hotdesk.db".into()),
            jwt_secret: std::env::var("HOTDESK_JWT_SECRET")
                .unwrap_or_else(|_| "dev-secret-change-me".into()),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotdesk=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let db = hotdesk_db::Database::open(&PathBuf::from(&config.db_path))?;

    let state: AppState = Arc::new(AppStateInner {
        db,
        jwt_secret: config.jwt_secret,
    });

    let app = routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Hotdesk server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
