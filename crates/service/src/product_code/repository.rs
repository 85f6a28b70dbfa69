use async_trait::async_trait;
use models::product_code::{self, NewProductCode};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;

#[async_trait]
pub trait ProductCodeRepository: Send + Sync {
    /// All codes ascending by id.
    async fn list(&self) -> Result<Vec<product_code::Model>, ServiceError>;
    async fn create(&self, new: NewProductCode) -> Result<product_code::Model, ServiceError>;
    /// Whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmProductCodeRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductCodeRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ProductCodeRepository for SeaOrmProductCodeRepository {
    async fn list(&self) -> Result<Vec<product_code::Model>, ServiceError> {
        Ok(product_code::list(&self.db).await?)
    }

    async fn create(&self, new: NewProductCode) -> Result<product_code::Model, ServiceError> {
        Ok(product_code::insert(&self.db, new).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(product_code::delete(&self.db, id).await? > 0)
    }
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockState {
        rows: Vec<product_code::Model>,
        last_id: i32,
    }

    #[derive(Default)]
    pub struct MockProductCodeRepository {
        state: Mutex<MockState>,
        broken: bool,
    }

    impl MockProductCodeRepository {
        /// A repository whose every call fails with a database error.
        pub fn broken() -> Self {
            Self { broken: true, ..Default::default() }
        }

        fn check(&self) -> Result<(), ServiceError> {
            if self.broken {
                return Err(ServiceError::Db("mock: connection reset".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ProductCodeRepository for MockProductCodeRepository {
        async fn list(&self) -> Result<Vec<product_code::Model>, ServiceError> {
            self.check()?;
            Ok(self.state.lock().unwrap().rows.clone())
        }

        async fn create(&self, new: NewProductCode) -> Result<product_code::Model, ServiceError> {
            self.check()?;
            let mut state = self.state.lock().unwrap();
            if state.rows.iter().any(|r| r.code == new.code()) {
                return Err(ServiceError::Conflict(format!("code {} already exists", new.code())));
            }
            state.last_id += 1;
            let row = product_code::Model {
                id: state.last_id,
                product_name: new.product_name().to_string(),
                code: new.code().to_string(),
                created_at: Utc::now().into(),
            };
            state.rows.push(row.clone());
            Ok(row)
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            self.check()?;
            let mut state = self.state.lock().unwrap();
            let before = state.rows.len();
            state.rows.retain(|r| r.id != id);
            Ok(state.rows.len() != before)
        }
    }
}
