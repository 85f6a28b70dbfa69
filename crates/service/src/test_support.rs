#![cfg(test)]
use std::sync::Arc;

use crate::product_code::{ProductCodeService, SeaOrmProductCodeRepository};

/// Product-code service over a fresh in-memory SQLite database with the schema applied.
pub async fn sqlite_service() -> Result<ProductCodeService, anyhow::Error> {
    let db = models::db::connect_sqlite_memory().await?;
    Ok(ProductCodeService::new(Arc::new(SeaOrmProductCodeRepository::new(db))))
}
