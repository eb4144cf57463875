use super::*;

/// Tests creating a new item.
///
/// Verifies that the repository assigns an ID, stores the name and flag as given
/// and stamps the creation time.
///
/// Expected: Ok with the item persisted
#[tokio::test]
async fn creates_item() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ItemRepository::new(db);
    let item = repo
        .create(CreateItemParam {
            item_name: "Widget".to_string(),
            is_active: false,
        })
        .await?;

    assert!(item.id > 0);
    assert_eq!(item.item_name, "Widget");
    assert!(!item.is_active);

    let stored = entity::prelude::Item::find_by_id(item.id).one(db).await?;
    let stored = stored.expect("item should be stored");
    assert_eq!(stored.item_name, "Widget");

    Ok(())
}

/// Tests that consecutive inserts receive increasing IDs.
#[tokio::test]
async fn assigns_increasing_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ItemRepository::new(db);
    let first = repo
        .create(CreateItemParam {
            item_name: "First".to_string(),
            is_active: true,
        })
        .await?;
    let second = repo
        .create(CreateItemParam {
            item_name: "Second".to_string(),
            is_active: true,
        })
        .await?;

    assert!(second.id > first.id);

    Ok(())
}

/// Tests creating an item inside a transaction.
///
/// Expected: the row only becomes visible once the transaction commits
#[tokio::test]
async fn creates_item_within_transaction() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let txn = db.begin().await?;
    let item = ItemRepository::new(&txn)
        .create(CreateItemParam {
            item_name: "Pending".to_string(),
            is_active: true,
        })
        .await?;
    txn.commit().await?;

    let found = ItemRepository::new(db).get_by_id(item.id).await?;
    assert_eq!(found, Some(item));

    Ok(())
}

/// Tests that creating an item fails without the item table.
///
/// Expected: Err
#[tokio::test]
async fn fails_without_table() -> Result<(), DbErr> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ItemRepository::new(db)
        .create(CreateItemParam {
            item_name: "Orphan".to_string(),
            is_active: true,
        })
        .await;

    assert!(result.is_err());

    Ok(())
}
