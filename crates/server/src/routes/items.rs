use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{extract::{Path, State}, http::StatusCode, Json};
use service::volatile::{Item, ItemInput};
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/api/items", tag = "items",
    responses((status = 200, description = "All items", body = [crate::openapi::ItemDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.items.list().await)
}

#[utoipa::path(
    post, path = "/api/items", tag = "items",
    request_body = crate::openapi::ItemInputDoc,
    responses(
        (status = 201, description = "Created with a server-assigned id", body = crate::openapi::ItemDoc),
        (status = 400, description = "Invalid body")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), JsonApiError> {
    let Json(input) = payload?;
    let item = state.items.create(input).await;
    info!(id = item.id, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    delete, path = "/api/items/{id}", tag = "items",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Non-numeric id"),
        (status = 404, description = "No item with this id")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.items.delete(id).await?;
    info!(id, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}
