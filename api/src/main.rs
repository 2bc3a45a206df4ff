//! On-Chain Score API Server
//!
//! REST API endpoints for the on-chain score card.

use std::{env, net::SocketAddr, sync::Arc};

use alchemy_transfers::{ClientConfig, TransferClient};
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod error;
mod routes;

/// Application state shared across handlers
pub struct AppState {
    pub client: TransferClient,
}

mod defaults {
    pub const API_PORT: &str = "8080";
    pub const API_HOST: &str = "0.0.0.0";
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,alchemy_transfers=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting On-Chain Score API Server...");

    let config = ClientConfig::from_env()?;
    tracing::info!(network = %config.network, "Using Alchemy transfers API");

    let state = Arc::new(AppState {
        client: TransferClient::new(config),
    });

    let port = env::var("API_PORT")
        .unwrap_or_else(|_| defaults::API_PORT.to_string())
        .parse::<u16>()?;

    let host = env::var("API_HOST").unwrap_or_else(|_| defaults::API_HOST.to_string());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

/// Build the router with all routes and middleware
fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api", routes::api_routes())
        .with_state(state)
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Root endpoint - API information
async fn root() -> axum::response::Html<&'static str> {
    axum::response::Html(r#"
<!DOCTYPE html>
<html>
<head>
    <title>On-Chain Score API</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; background: #1a1a2e; color: #eee; }
        h1 { color: #4fc3f7; }
        a { color: #4fc3f7; }
        code { background: #333; padding: 2px 6px; border-radius: 4px; }
        .endpoint { margin: 10px 0; padding: 10px; background: #252540; border-radius: 8px; }
        .method { color: #4caf50; font-weight: bold; }
    </style>
</head>
<body>
    <h1>On-Chain Score API</h1>
    <p>Wallet activity score for Base</p>

    <h2>Endpoints</h2>

    <div class="endpoint">
        <span class="method">GET</span> <a href="/health">/health</a> - Health check
    </div>
    <div class="endpoint">
        <span class="method">GET</span> <code>/api/wallets/:address/score</code> - Wallet metrics and on-chain score
    </div>
</body>
</html>
    "#)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
