use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{extract::{Path, State}, http::StatusCode, Json};
use models::product_code;
use serde::Deserialize;
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// Missing fields decode as empty strings and then fail validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductCodeRequest {
    pub product_name: String,
    pub code: String,
}

#[utoipa::path(
    get, path = "/api/product-codes", tag = "product-codes",
    responses(
        (status = 200, description = "All product codes, ascending by id", body = [crate::openapi::ProductCodeDoc]),
        (status = 500, description = "Store unavailable or failed")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<product_code::Model>>, JsonApiError> {
    let rows = state.product_codes.list().await?;
    info!(count = rows.len(), "list product codes");
    Ok(Json(rows))
}

#[utoipa::path(
    post, path = "/api/product-codes", tag = "product-codes",
    request_body = crate::openapi::ProductCodeRequestDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductCodeDoc),
        (status = 400, description = "Invalid body, empty product_name or malformed code"),
        (status = 409, description = "Code already exists"),
        (status = 500, description = "Store unavailable or failed")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ProductCodeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<product_code::Model>), JsonApiError> {
    let Json(input) = payload?;
    let created = state.product_codes.create(&input.product_name, &input.code).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    delete, path = "/api/product-codes/{id}", tag = "product-codes",
    params(("id" = i64, Path, description = "Product code id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Non-numeric id"),
        (status = 404, description = "No product code with this id"),
        (status = 500, description = "Store unavailable or failed")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.product_codes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
