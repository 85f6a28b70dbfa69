use std::sync::Arc;

use models::product_code::{self, NewProductCode};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::product_code::repository::ProductCodeRepository;

/// Validated CRUD over product codes.
///
/// The repository is optional: when the relational store was never
/// configured or could not be reached at startup, every call fails with
/// [`ServiceError::Unavailable`] before doing anything else.
#[derive(Clone)]
pub struct ProductCodeService {
    repo: Option<Arc<dyn ProductCodeRepository>>,
}

impl ProductCodeService {
    pub fn new(repo: Arc<dyn ProductCodeRepository>) -> Self { Self { repo: Some(repo) } }

    pub fn unavailable() -> Self { Self { repo: None } }

    pub fn is_available(&self) -> bool { self.repo.is_some() }

    fn repo(&self) -> Result<&dyn ProductCodeRepository, ServiceError> {
        self.repo
            .as_deref()
            .ok_or_else(|| ServiceError::Unavailable("database not initialized".into()))
    }

    pub async fn list(&self) -> Result<Vec<product_code::Model>, ServiceError> {
        self.repo()?.list().await
    }

    /// Name and code are validated before the repository is touched.
    #[instrument(skip(self, product_name))]
    pub async fn create(&self, product_name: &str, code: &str) -> Result<product_code::Model, ServiceError> {
        let repo = self.repo()?;
        let new = NewProductCode::parse(product_name, code)?;
        let created = repo.create(new).await?;
        info!(id = created.id, code = %created.code, "product_code_created");
        Ok(created)
    }

    /// Ids outside the table's integer range cannot match a row.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let repo = self.repo()?;
        let Ok(row_id) = i32::try_from(id) else {
            return Err(ServiceError::not_found("product_code"));
        };
        if !repo.delete(row_id).await? {
            return Err(ServiceError::not_found("product_code"));
        }
        info!(id, "product_code_deleted");
        Ok(())
    }
}
