pub mod repository;
pub mod service;

pub use repository::{ProductCodeRepository, SeaOrmProductCodeRepository};
pub use service::ProductCodeService;
