//! HTTP surface of the notes service.
//!
//! [`AppState`] owns the store and the broadcaster and is handed to every
//! handler through axum's `State` extractor.

pub mod error;
pub mod page;
pub mod routes;

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::Result;
use crate::realtime::Broadcaster;
use crate::store::SqliteStore;

pub use error::ApiError;
pub use routes::router;

#[derive(Clone)]
pub struct AppState {
    /// The note store, one statement sequence at a time.
    pub store: Arc<Mutex<SqliteStore>>,
    /// Connected real-time clients.
    pub broadcaster: Broadcaster,
}

impl AppState {
    pub fn new(store: SqliteStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            broadcaster: Broadcaster::new(),
        }
    }
}

/// Open and seed the database, then serve until Ctrl+C or SIGTERM.
pub async fn serve(config: ServerConfig) -> Result<()> {
    info!(db = %config.db_path.display(), "Opening note store");
    let store = SqliteStore::open(&config.db_path)?;
    store.seed_if_empty()?;

    let app = router(AppState::new(store));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
