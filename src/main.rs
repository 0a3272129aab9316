//! Recipebook server
//!
//! A recipe catalog HTTP service. The whole catalog is one JSON document on
//! disk, read and rewritten in full by every mutating request.
//!
//! # Configuration
//!
//! Environment variables:
//! - `RECIPEBOOK_PORT`: Port to listen on (default: 8000)
//! - `RECIPEBOOK_DATA_FILE`: Recipe document path (default: ~/.local/share/recipebook/recipes.json)
//! - `RECIPEBOOK_CONFIG`: Path to config file (default: ~/.config/recipebook/config.yaml)
//!
//! # Endpoints
//!
//! - `GET/POST /recipes`, `GET/PUT/DELETE /recipes/{id}`
//! - `GET/POST /recipes/{id}/comments`, `PUT/DELETE /recipes/{id}/comments/{cid}`

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod models;
mod server;
mod store;

use config::Config;
use db::RecipeRepository;
use server::AppState;
use store::{JsonFileStore, Store};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipebook_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::load(None) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Make sure the recipe document exists before taking traffic
    let store = JsonFileStore::new(&config.data_file);
    if let Err(e) = store.ensure_initialized() {
        tracing::error!("Failed to initialize storage: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Recipe document: {}", store.path().display());

    let state = AppState::new(RecipeRepository::new(store));
    let app = server::router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
