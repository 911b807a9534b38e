use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use models::db::Store;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Every origin may call the API; the browser client is served from elsewhere.
pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {}:{}: {e}", server.host, server.port)))
}

/// Build the router for an already opened store.
pub fn build_app(store: &Store, cfg: &AppConfig) -> Router {
    let state = ServerState::from_store(store, cfg);
    routes::build_router(state, build_cors())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
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
    info!("shutdown signal received, draining connections");
}

/// Public entry: open the store, serve HTTP until a shutdown signal, then close the pool.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_or_env()?;

    let store = Store::open(&cfg.database).await?;
    if cfg.database.auto_migrate {
        store.migrate().await?;
    }

    let app = build_app(&store, &cfg);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, status_mode = ?cfg.api.status_mode, enforce_signup_rules = cfg.auth.enforce_signup_rules, "starting map markers server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve_then_close(listener, app, store, shutdown_signal()).await
}

/// Serve until `shutdown` resolves, then close the pool whether or not
/// serving failed. A serve error wins over a close error.
async fn serve_then_close<F>(
    listener: tokio::net::TcpListener,
    app: Router,
    store: Store,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;
    match &served {
        Ok(()) => info!("http server stopped"),
        Err(e) => warn!(error = %e, "http server failed"),
    }

    let closed = store.close().await;
    served?;
    closed?;
    Ok(())
}
