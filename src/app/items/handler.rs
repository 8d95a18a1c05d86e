//! 商品处理器

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use validator::Validate;

use super::{
    model::{CreateItemRequest, Item, ListItemsQuery, UpdateItemRequest},
    service::ItemService,
};
use crate::core::{error::ApiError, response::ApiResponse};

/// 商品路由，挂载在 /items 下
pub fn router(service: ItemService) -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route(
            "/:item_id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/:item_id/purchase", post(purchase_item))
        .with_state(service)
}

async fn list_items(
    State(service): State<ItemService>,
    Query(query): Query<ListItemsQuery>,
) -> Json<ApiResponse<Vec<Item>>> {
    let items = service.list(&query);
    let total = service.count();

    let message = if items.len() == total {
        format!("获取到 {} 个商品", items.len())
    } else {
        format!("过滤后获取到 {} 个商品 (总共 {} 个)", items.len(), total)
    };

    Json(ApiResponse::success(items, &message))
}

async fn get_item(
    State(service): State<ItemService>,
    Path(item_id): Path<u64>,
) -> Result<Json<ApiResponse<Item>>, ApiError> {
    let item = service.get(item_id)?;
    Ok(Json(ApiResponse::success(item, "商品获取成功")))
}

async fn create_item(
    State(service): State<ItemService>,
    Json(payload): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Item>>), ApiError> {
    payload.validate()?;

    let item = service.create(payload)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(item, "商品创建成功")),
    ))
}

async fn update_item(
    State(service): State<ItemService>,
    Path(item_id): Path<u64>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Json<ApiResponse<Item>>, ApiError> {
    payload.validate()?;

    let item = service.update(item_id, payload)?;
    Ok(Json(ApiResponse::success(item, "商品更新成功")))
}

async fn delete_item(
    State(service): State<ItemService>,
    Path(item_id): Path<u64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    service.delete(item_id)?;
    Ok(Json(ApiResponse::success((), "商品删除成功")))
}

async fn purchase_item(
    State(service): State<ItemService>,
    Path(item_id): Path<u64>,
) -> Result<Json<ApiResponse<Item>>, ApiError> {
    let item = service.purchase(item_id)?;
    Ok(Json(ApiResponse::success(item, "商品购买成功")))
}
