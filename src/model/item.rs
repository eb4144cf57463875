use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: i32,
    #[serde(alias = "item_name")]
    pub item_name: String,
    #[serde(alias = "is_active")]
    pub is_active: bool,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemDto {
    #[serde(alias = "item_name")]
    pub item_name: String,
    #[serde(alias = "is_active", default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
