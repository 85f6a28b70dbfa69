//! Relational model for product activation codes: the sea-orm entity,
//! input validation and connection helpers.

pub mod db;
pub mod errors;
pub mod product_code;
