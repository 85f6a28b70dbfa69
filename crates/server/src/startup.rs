use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, DatabaseConfig};
use service::product_code::{ProductCodeService, SeaOrmProductCodeRepository};
use service::volatile::VolatileStores;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// Connect the relational store if configured.
///
/// A missing URL, a failed connection or a failed migration all leave the
/// service without a repository instead of aborting startup.
pub async fn build_product_codes(cfg: &DatabaseConfig) -> ProductCodeService {
    if !cfg.is_configured() {
        warn!(event = "db_not_configured", "DATABASE_URL is not set; product-code endpoints will fail");
        return ProductCodeService::unavailable();
    }
    match models::db::connect_and_migrate(cfg).await {
        Ok(db) => ProductCodeService::new(Arc::new(SeaOrmProductCodeRepository::new(db))),
        Err(e) => {
            error!(event = "db_connect_failed", error = %e, "cannot reach database; product-code endpoints will fail");
            ProductCodeService::unavailable()
        }
    }
}

pub async fn build_app(cfg: &AppConfig) -> Router {
    let product_codes = build_product_codes(&cfg.database).await;
    let state = AppState::new(product_codes, VolatileStores::seeded());
    routes::build_router(state, routes::build_cors())
}

/// Build the app and serve it until the listener fails.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let app = build_app(&cfg).await;

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port))
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(%addr, "listening");
    for route in [
        "GET    /api/product-codes",
        "POST   /api/product-codes",
        "DELETE /api/product-codes/:id",
        "GET    /api/items",
        "POST   /api/items",
        "DELETE /api/items/:id",
        "POST   /api/addComment",
        "GET    /api/comments",
    ] {
        info!(route, "endpoint");
    }
    axum::serve(listener, app).await?;
    Ok(())
}
