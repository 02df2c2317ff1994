//! Byline API
//!
//! The HTTP surface over the content repository: creates and lists blog
//! posts, news items, and articles. All tag and category resolution lives
//! in the storage layer; this crate only translates requests and maps
//! errors to status codes.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use byline_store::{SqliteStore, StoreError};
use config::ServerConfig;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Storage initialization error
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the API HTTP server
///
/// Opens the database, applies the schema, and serves the axum router
/// until the process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Byline API");
    info!("Bind address: {}", config.bind_addr());
    info!("Database path: {}", config.database_path);

    // Open the storage backend and wrap it for sharing across requests
    let store = SqliteStore::new(&config.database_path)?;
    let state = AppState::new(store);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("API listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
