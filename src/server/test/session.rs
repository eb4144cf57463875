use sea_orm::EntityTrait;
use test_utils::builder::TestBuilder;

use crate::server::{
    data::item::ItemRepository, model::item::CreateItemParam, session::make_session_factory,
};

fn param(name: &str) -> CreateItemParam {
    CreateItemParam {
        item_name: name.to_string(),
        is_active: true,
    }
}

/// Tests that every call to the factory yields a distinct session.
///
/// Expected: different ids, autocommit and autoflush disabled on both
#[tokio::test]
async fn factory_returns_distinct_sessions() {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let factory = make_session_factory(db.clone());

    let first = factory.session();
    let second = factory.session();

    assert_ne!(first.id(), second.id());
    for session in [&first, &second] {
        assert!(!session.autocommit());
        assert!(!session.autoflush());
        assert!(!session.in_transaction());
    }
}

/// Tests that the transaction only starts on first use.
///
/// Expected: in_transaction flips to true after `transaction()`
#[tokio::test]
async fn transaction_begins_lazily() {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let mut session = make_session_factory(db.clone()).session();

    assert!(!session.in_transaction());
    session.transaction().await.unwrap();
    assert!(session.in_transaction());

    session.rollback().await.unwrap();
}

/// Tests that writes become visible after an explicit commit.
///
/// Expected: the item is found through the engine after commit
#[tokio::test]
async fn commit_persists_writes() {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let mut session = make_session_factory(db.clone()).session();

    let created = ItemRepository::new(session.transaction().await.unwrap())
        .create(param("Committed"))
        .await
        .unwrap();
    session.commit().await.unwrap();

    let stored = entity::prelude::Item::find_by_id(created.id)
        .one(db)
        .await
        .unwrap();
    assert_eq!(stored.map(|item| item.item_name), Some("Committed".to_string()));
}

/// Tests that rollback discards writes.
///
/// Expected: no rows after rollback
#[tokio::test]
async fn rollback_discards_writes() {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let mut session = make_session_factory(db.clone()).session();

    ItemRepository::new(session.transaction().await.unwrap())
        .create(param("Discarded"))
        .await
        .unwrap();
    session.rollback().await.unwrap();

    let items = entity::prelude::Item::find().all(db).await.unwrap();
    assert!(items.is_empty());
}

/// Tests that finishing a session that never touched the database is a no-op.
///
/// Expected: Ok for both commit and rollback
#[tokio::test]
async fn finishing_unused_session_succeeds() {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let factory = make_session_factory(db.clone());

    assert!(factory.session().commit().await.is_ok());
    assert!(factory.session().rollback().await.is_ok());
}
