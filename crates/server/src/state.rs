use std::sync::Arc;

use service::product_code::ProductCodeService;
use service::volatile::{CommentStore, ItemStore, VolatileStores};

/// Everything the handlers reach: built once at startup, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub product_codes: ProductCodeService,
    pub items: Arc<ItemStore>,
    pub comments: Arc<CommentStore>,
}

impl AppState {
    pub fn new(product_codes: ProductCodeService, volatile: VolatileStores) -> Self {
        Self { product_codes, items: volatile.items, comments: volatile.comments }
    }
}
