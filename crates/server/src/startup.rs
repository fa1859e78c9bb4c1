use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use dotenvy::dotenv;
use sea_orm::DatabaseConnection;
use service::{
    catalog::{ListingRepository, SeaOrmListingRepository},
    CatalogService,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router backed by the SeaORM listing repository on `db`.
pub fn build_app(db: DatabaseConnection) -> Router {
    let repo: Arc<dyn ListingRepository> = Arc::new(SeaOrmListingRepository::new(db));
    let state = ServerState { catalog: CatalogService::shared(repo) };
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl_c listener failed; shutdown only on process exit");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: load configuration, connect, migrate and serve until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = configs::AppConfig::load_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.run_migrations {
        models::db::migrate(&db).await?;
        info!("migrations applied");
    }

    let app = build_app(db);

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "catalog server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
