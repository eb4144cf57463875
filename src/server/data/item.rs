//! Item data repository for database operations.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait, QueryOrder};

use crate::server::model::item::{CreateItemParam, Item};

/// Repository providing database operations for items.
pub struct ItemRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ItemRepository<'a, C> {
    /// Creates a new ItemRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new item stamped with the current time.
    ///
    /// # Returns
    /// - `Ok(Item)` - The created item with its generated ID
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateItemParam) -> Result<Item, DbErr> {
        let entity = entity::item::ActiveModel {
            item_name: ActiveValue::Set(param.item_name),
            is_active: ActiveValue::Set(param.is_active),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Item::from_entity(entity))
    }

    /// Finds an item by its primary key.
    ///
    /// # Returns
    /// - `Ok(Some(Item))` - Item found
    /// - `Ok(None)` - No item with the given ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Item>, DbErr> {
        let entity = entity::prelude::Item::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Item::from_entity))
    }

    /// Gets all items ordered by ID.
    pub async fn get_all(&self) -> Result<Vec<Item>, DbErr> {
        let entities = entity::prelude::Item::find()
            .order_by_asc(entity::item::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Item::from_entity).collect())
    }
}
