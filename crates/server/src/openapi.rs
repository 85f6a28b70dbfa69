use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ProductCodeDoc {
    pub id: i32,
    pub product_name: String,
    /// `XXXX-XXXX-XXXX-XXXX`, uppercase A-Z and 0-9
    pub code: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct ProductCodeRequestDoc {
    pub product_name: String,
    /// Uppercased before validation
    pub code: String,
}

#[derive(ToSchema)]
pub struct ItemDoc { pub id: i64, pub name: String, pub description: String }

#[derive(ToSchema)]
pub struct ItemInputDoc { pub name: String, pub description: String }

#[derive(ToSchema)]
pub struct CommentDoc { pub id: i64, pub author: String, pub text: String, pub avatar: String }

#[derive(ToSchema)]
pub struct CommentInputDoc { pub author: String, pub text: String, pub avatar: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::product_codes::list,
        crate::routes::product_codes::create,
        crate::routes::product_codes::delete,
        crate::routes::items::list,
        crate::routes::items::create,
        crate::routes::items::delete,
        crate::routes::comments::list,
        crate::routes::comments::create,
    ),
    components(
        schemas(
            HealthResponse,
            ProductCodeDoc,
            ProductCodeRequestDoc,
            ItemDoc,
            ItemInputDoc,
            CommentDoc,
            CommentInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "product-codes"),
        (name = "items"),
        (name = "comments")
    )
)]
pub struct ApiDoc;
