use super::*;

/// Tests retrieving an existing item by ID.
///
/// Expected: Ok(Some) with the matching item
#[tokio::test]
async fn returns_existing_item() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::item::ItemFactory::new(db)
        .item_name("Gadget")
        .build()
        .await?;

    let item = ItemRepository::new(db).get_by_id(created.id).await?;

    let item = item.expect("item should exist");
    assert_eq!(item.id, created.id);
    assert_eq!(item.item_name, "Gadget");
    assert!(item.is_active);

    Ok(())
}

/// Tests retrieving an item that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_item() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::item::create_item(db).await?;

    let item = ItemRepository::new(db).get_by_id(999_999).await?;

    assert!(item.is_none());

    Ok(())
}
