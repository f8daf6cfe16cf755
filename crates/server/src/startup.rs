use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, ServerConfig};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router over an existing connection.
pub fn build_app(db: DatabaseConnection) -> Router {
    routes::build_router(ServerState { db }, build_cors())
}

/// Connect with the `[database]` settings and apply pending migrations when
/// `server.run_migrations` is set.
pub async fn connect_database(cfg: &AppConfig) -> Result<DatabaseConnection, StartupError> {
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg).await?;
    if cfg.server.run_migrations {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Migration(e.to_string()))?;
        info!("migrations applied");
    } else {
        warn!("server.run_migrations is off; expecting an up-to-date schema");
    }
    Ok(db)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

fn bind_addr(cfg: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {}", e)))
}

/// Public entry: connect with an already loaded configuration and serve until
/// Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = connect_database(&cfg).await?;
    let app = build_app(db);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}
