use super::*;

/// Tests listing items on an empty table created from the entity definition.
///
/// Expected: Ok with an empty list
#[tokio::test]
async fn returns_empty_list() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Item)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let items = ItemRepository::new(db).get_all().await?;

    assert!(items.is_empty());

    Ok(())
}

/// Tests that every item is returned ordered by ID, inactive ones included.
///
/// Expected: Ok with all items in insertion order
#[tokio::test]
async fn returns_all_items_ordered_by_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::item::create_item(db).await?;
    let second = factory::item::ItemFactory::new(db)
        .active(false)
        .build()
        .await?;
    let third = factory::item::create_item(db).await?;

    let items = ItemRepository::new(db).get_all().await?;

    let ids: Vec<i32> = items.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
    assert!(!items[1].is_active);

    Ok(())
}
