//! Application entry point and server initialization
//!
//! Loads configuration, builds the configured mapping store, and serves the
//! router with graceful shutdown support.

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use hashlink::config::Config;
use hashlink::route::{create_app, AppState};
use hashlink::service::ShortCodeStore;

/// Application entry point
///
/// # Environment Variables
///
/// - `PORT` - Server port number (default: 8080)
/// - `STORE_BACKEND` - `redb` (default) or `memory`
/// - `DATABASE_URL` - Path to the redb file (default: "data.db")
/// - `BASE_URL` - Public prefix for generated short URLs (default: request host)
/// - `RUST_LOG` - Log filter (default: "hashlink=debug,tower_http=debug")
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hashlink=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    let backend = config.backend.open().expect("Failed to initialize store");
    let store = ShortCodeStore::new(backend);

    let state = AppState {
        store,
        base_url: config.base_url.clone(),
    };
    let backend_name = state.store.backend_name();

    let app = create_app(state).layer(TraceLayer::new_for_http());

    // Bind to all network interfaces on the specified port
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await.expect("Failed to bind listener");

    tracing::info!(%addr, backend = backend_name, "server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Resolves on SIGINT (Ctrl+C) or, on Unix, SIGTERM
///
/// Letting in-flight requests finish means redb write transactions are
/// committed or aborted rather than cut off.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, stopping server");
}
