use axum::{extract::Path, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ErrorDto,
        item::{CreateItemDto, ItemDto},
    },
    server::{
        data::item::ItemRepository,
        error::AppError,
        model::item::{CreateItemParam, Item},
        session::Session,
    },
};

pub static ITEM_TAG: &str = "item";

#[utoipa::path(
    get,
    path = "/api/items",
    tag = ITEM_TAG,
    responses(
        (status = 200, description = "Successfully retrieved items", body = Vec<ItemDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_items(mut session: Session) -> Result<impl IntoResponse, AppError> {
    let items = ItemRepository::new(session.transaction().await?)
        .get_all()
        .await?;
    session.commit().await?;

    let dto: Vec<ItemDto> = items.into_iter().map(Item::into_dto).collect();

    Ok((StatusCode::OK, Json(dto)))
}

#[utoipa::path(
    post,
    path = "/api/items",
    tag = ITEM_TAG,
    request_body = CreateItemDto,
    responses(
        (status = 201, description = "Successfully created item", body = ItemDto),
        (status = 400, description = "Invalid item data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_item(
    mut session: Session,
    Json(payload): Json<CreateItemDto>,
) -> Result<impl IntoResponse, AppError> {
    let param = CreateItemParam::from(payload);
    if param.item_name.is_empty() {
        return Err(AppError::BadRequest("Item name must not be empty".to_string()));
    }

    let item = ItemRepository::new(session.transaction().await?)
        .create(param)
        .await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(item.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/items/{id}",
    tag = ITEM_TAG,
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved item", body = ItemDto),
        (status = 404, description = "Item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_item(
    mut session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let item = ItemRepository::new(session.transaction().await?)
        .get_by_id(id)
        .await?;
    session.commit().await?;

    match item {
        Some(item) => Ok((StatusCode::OK, Json(item.into_dto()))),
        None => Err(AppError::NotFound(format!("Item {} not found", id))),
    }
}
