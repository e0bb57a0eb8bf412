use std::future::Future;

use axum::Router;
use configs::AppConfig;
use migration::{Migrator, MigratorTrait};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the app with permissive CORS over an already-migrated connection.
pub fn app(db: sea_orm::DatabaseConnection) -> Router {
    routes::build_router(AppState::new(db), build_cors())
}

/// Load config, connect, migrate, and serve until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    Migrator::up(&db, None).await?;
    info!(database = %cfg.database.name, "migrations applied");

    let host = cfg.server.host.as_str();
    let port = cfg.server.port;
    let listener = TcpListener::bind((host, port))
        .await
        .map_err(|e| StartupError::Bind(format!("{host}:{port}: {e}")))?;
    info!(addr = %listener.local_addr()?, "server listening");

    serve(listener, app(db), shutdown_signal()).await
}

/// Serve `app` on `listener` until `shutdown` resolves, letting in-flight requests finish.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down"),
        Err(e) => {
            error!(error = %e, "cannot listen for Ctrl+C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
