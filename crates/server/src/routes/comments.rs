use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, Json};
use service::volatile::{Comment, CommentInput};

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/api/comments", tag = "comments",
    responses((status = 200, description = "All comments", body = [crate::openapi::CommentDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Json<Vec<Comment>> {
    Json(state.comments.list().await)
}

/// Comments are append-only.
#[utoipa::path(
    post, path = "/api/addComment", tag = "comments",
    request_body = crate::openapi::CommentInputDoc,
    responses(
        (status = 201, description = "Created with a server-assigned id", body = crate::openapi::CommentDoc),
        (status = 400, description = "Invalid body")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CommentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Comment>), JsonApiError> {
    let Json(input) = payload?;
    Ok((StatusCode::CREATED, Json(state.comments.create(input).await)))
}
