//! API documentation routes.
//!
//! Two mutually exclusive sets exist. When the settings carry a deployment
//! environment, the interactive reference (`/docs`), the ReDoc page (`/redoc`)
//! and the raw document (`/openapi.json`) are served by [`docs_router`]. None of
//! them is part of the generated document itself. Otherwise the default Swagger
//! UI from [`default_docs_router`] is mounted.

use std::sync::Arc;

use axum::{response::Html, routing::get, Json, Router};
use utoipa::openapi::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const DOCS_PATH: &str = "/docs";
pub const REDOC_PATH: &str = "/redoc";
pub const OPENAPI_PATH: &str = "/openapi.json";

pub const DEFAULT_SWAGGER_UI_PATH: &str = "/swagger-ui";
pub const DEFAULT_OPENAPI_PATH: &str = "/api-docs/openapi.json";

const API_REFERENCE_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/@scalar/api-reference";
const REDOC_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/redoc@2/bundles/redoc.standalone.js";

/// Documentation routes exposed when a deployment environment is configured.
///
/// # Arguments
/// - `openapi` - Generated document served at `/openapi.json`
/// - `title` - Page title of the API reference
pub fn docs_router(openapi: OpenApi, title: &str) -> Router {
    let openapi = Arc::new(openapi);
    let reference = api_reference_html(title);
    let redoc = redoc_html("docs");

    Router::new()
        .route(
            DOCS_PATH,
            get(move || {
                let page = reference.clone();
                async move { Html(page) }
            }),
        )
        .route(
            REDOC_PATH,
            get(move || {
                let page = redoc.clone();
                async move { Html(page) }
            }),
        )
        .route(
            OPENAPI_PATH,
            get(move || {
                let openapi = openapi.clone();
                async move { Json(openapi.as_ref().clone()) }
            }),
        )
}

/// Default Swagger UI, mounted only when no deployment environment is configured.
pub fn default_docs_router(openapi: OpenApi) -> Router {
    Router::new().merge(SwaggerUi::new(DEFAULT_SWAGGER_UI_PATH).url(DEFAULT_OPENAPI_PATH, openapi))
}

fn api_reference_html(title: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
<head>
    <title>{title}</title>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
</head>
<body>
    <script id="api-reference" data-url="{OPENAPI_PATH}"></script>
    <script src="{API_REFERENCE_SCRIPT}"></script>
</body>
</html>"#,
        title = escape_html(title),
    )
}

fn redoc_html(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{title}</title>
    <meta charset="utf-8"/>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
        body {{ margin: 0; padding: 0; }}
    </style>
</head>
<body>
    <noscript>ReDoc requires Javascript to function. Please enable it to browse the documentation.</noscript>
    <redoc spec-url="{OPENAPI_PATH}"></redoc>
    <script src="{REDOC_SCRIPT}"></script>
</body>
</html>"#,
        title = escape_html(title),
    )
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
