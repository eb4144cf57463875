use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;
use utoipa_axum::router::OpenApiRouter;

use crate::server::{router, session::make_session_factory, state::AppState};

mod controller;
mod session;

/// Business routes bound to a state built around `db`.
fn test_routes(db: &DatabaseConnection) -> OpenApiRouter {
    router::router().with_state(AppState::new(db.clone(), make_session_factory(db.clone())))
}

/// Sends one request through the router and returns the status and body.
async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn get(router: Router, path: &str) -> (StatusCode, String) {
    send(
        router,
        Request::builder().uri(path).body(Body::empty()).unwrap(),
    )
    .await
}

async fn post_json(router: Router, path: &str, json: &str) -> (StatusCode, String) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
    )
    .await
}
