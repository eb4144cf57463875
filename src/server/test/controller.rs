use axum::http::StatusCode;
use test_utils::{builder::TestBuilder, factory};

use super::{get, post_json, test_routes};
use crate::{
    model::{api::ErrorDto, item::ItemDto},
    server::{
        app::{build_application, ApplicationOptions},
        config::Settings,
    },
};

fn app_router(db: &sea_orm::DatabaseConnection) -> axum::Router {
    build_application(
        test_routes(db),
        &Settings::default(),
        ApplicationOptions::default().create_tables_on_start(false),
    )
    .router()
}

/// Tests the health endpoint with a reachable database.
///
/// Expected: 200 with status "ok"
#[tokio::test]
async fn health_reports_ok() {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (status, body) = get(app_router(db), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"ok"}"#);
}

/// Tests creating an item from a snake_case request body.
///
/// Expected: 201 with a camelCase response
#[tokio::test]
async fn creates_item_from_snake_case_body() {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (status, body) = post_json(
        app_router(db),
        "/api/items",
        r#"{"item_name": "  Widget  ", "is_active": false}"#,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body.contains("\"itemName\":\"Widget\""));
    assert!(body.contains("\"isActive\":false"));
    assert!(!body.contains("item_name"));
}

/// Tests creating an item from a camelCase request body without the optional flag.
///
/// Expected: 201 and the item is active
#[tokio::test]
async fn creates_item_from_camel_case_body() {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (status, body) = post_json(app_router(db), "/api/items", r#"{"itemName": "Gadget"}"#).await;

    assert_eq!(status, StatusCode::CREATED);
    let item: ItemDto = serde_json::from_str(&body).unwrap();
    assert_eq!(item.item_name, "Gadget");
    assert!(item.is_active);
}

/// Tests that a blank item name is rejected.
///
/// Expected: 400 with an error message and nothing stored
#[tokio::test]
async fn rejects_blank_item_name() {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (status, body) = post_json(app_router(db), "/api/items", r#"{"itemName": "   "}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorDto = serde_json::from_str(&body).unwrap();
    assert_eq!(error.error, "Item name must not be empty");

    let (_, body) = get(app_router(db), "/api/items").await;
    assert_eq!(body, "[]");
}

/// Tests listing the stored items.
///
/// Expected: 200 with every item in ID order
#[tokio::test]
async fn lists_items() {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let first = factory::item::create_item(db).await.unwrap();
    let second = factory::item::create_item(db).await.unwrap();

    let (status, body) = get(app_router(db), "/api/items").await;

    assert_eq!(status, StatusCode::OK);
    let items: Vec<ItemDto> = serde_json::from_str(&body).unwrap();
    let ids: Vec<i32> = items.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

/// Tests retrieving a single item.
///
/// Expected: 200 with the item
#[tokio::test]
async fn gets_item_by_id() {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let created = factory::item::ItemFactory::new(db)
        .item_name("Lamp")
        .build()
        .await
        .unwrap();

    let (status, body) = get(app_router(db), &format!("/api/items/{}", created.id)).await;

    assert_eq!(status, StatusCode::OK);
    let item: ItemDto = serde_json::from_str(&body).unwrap();
    assert_eq!(item.id, created.id);
    assert_eq!(item.item_name, "Lamp");
}

/// Tests retrieving an item that does not exist.
///
/// Expected: 404 naming the missing ID
#[tokio::test]
async fn returns_not_found_for_missing_item() {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (status, body) = get(app_router(db), "/api/items/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"Item 999 not found"}"#);
}

/// Tests that a missing table surfaces as a generic server error.
///
/// Expected: 500 without leaking the database error
#[tokio::test]
async fn hides_database_errors() {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (status, body) = get(app_router(db), "/api/items").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Internal server error"}"#);
}
