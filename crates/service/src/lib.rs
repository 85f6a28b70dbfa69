//! Service layer: the product-code resource manager over the relational
//! model, and the lock-guarded in-memory stores behind items and comments.

pub mod errors;
pub mod product_code;
pub mod storage;
pub mod volatile;
#[cfg(test)]
pub mod test_support;
