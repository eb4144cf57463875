use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{
    controller::{
        health::{__path_health, health},
        item::{
            __path_create_item, __path_get_item, __path_get_items, create_item, get_item,
            get_items,
        },
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(tags(
    (name = "health", description = "Service health"),
    (name = "item", description = "Example item resource")
))]
struct ApiDoc;

/// Business routes together with their OpenAPI description.
pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(health))
        .routes(routes!(get_items, create_item))
        .routes(routes!(get_item))
}
