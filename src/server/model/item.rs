//! Domain & parameter models for item operations
//!
//! Defines the item domain model, the item parameter models, and provides
//! methods to convert the item domain model from entity and into Dtos

use chrono::{DateTime, Utc};

use crate::model::item::{CreateItemDto, ItemDto};

/// The item domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i32,
    pub item_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Converts an entity model to the item domain model
    pub fn from_entity(entity: entity::item::Model) -> Self {
        Self {
            id: entity.id,
            item_name: entity.item_name,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }

    /// Converts the item domain model into its API representation
    pub fn into_dto(self) -> ItemDto {
        ItemDto {
            id: self.id,
            item_name: self.item_name,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// Parameters for creating a new item
#[derive(Debug, Clone)]
pub struct CreateItemParam {
    pub item_name: String,
    pub is_active: bool,
}

impl From<CreateItemDto> for CreateItemParam {
    fn from(dto: CreateItemDto) -> Self {
        Self {
            item_name: dto.item_name.trim().to_string(),
            is_active: dto.is_active,
        }
    }
}
