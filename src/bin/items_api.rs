//! 第三课：完整的 CRUD API
//! 使用内存列表模拟数据库，演示请求体校验和增删改查

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, Level};
use validator::Validate;

// 应用状态：内存中的商品列表，进程重启后清空
type AppState = Arc<Mutex<Vec<Item>>>;

// 商品数据模型
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Item {
    id: u64,
    name: String,
    description: Option<String>,
    price: f64,
    category: String,
    created_at: String,
}

// 创建商品请求
#[derive(Debug, Deserialize, Validate)]
struct CreateItemRequest {
    #[validate(length(min = 1, max = 100, message = "商品名称长度必须在 1 到 100 之间"))]
    name: String,

    #[validate(length(max = 300, message = "商品描述不能超过 300 个字符"))]
    description: Option<String>,

    #[validate(range(min = 0.01, message = "价格必须大于 0"))]
    price: f64,

    #[validate(length(min = 1, max = 50, message = "分类长度必须在 1 到 50 之间"))]
    category: String,
}

// 更新商品请求
#[derive(Debug, Deserialize, Validate)]
struct UpdateItemRequest {
    #[validate(length(min = 1, max = 100, message = "商品名称长度必须在 1 到 100 之间"))]
    name: Option<String>,

    #[validate(range(min = 0.01, message = "价格必须大于 0"))]
    price: Option<f64>,
}

// 查询参数
#[derive(Debug, Deserialize)]
struct ItemQuery {
    #[serde(default)]
    skip: Option<usize>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    category: Option<String>,
}

// 错误响应
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    timestamp: String,
}

impl ErrorResponse {
    fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("启动 CRUD API 服务器...");

    let state: AppState = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:item_id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:3000")
        .await
        .expect("无法绑定到端口 3000");

    info!("🚀 CRUD API 服务器运行在 http://127.0.0.1:3000");
    info!("📖 API 端点:");
    info!("   GET    /items           - 获取商品列表 (支持 skip/limit/category)");
    info!("   POST   /items           - 创建新商品");
    info!("   GET    /items/:item_id  - 获取特定商品");
    info!("   PUT    /items/:item_id  - 更新商品");
    info!("   DELETE /items/:item_id  - 删除商品");

    axum::serve(listener, app).await.expect("服务器启动失败");
}

/// 获取商品列表 (支持分页和分类过滤)
async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> Json<Vec<Item>> {
    let items = state.lock().unwrap();
    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(usize::MAX);

    let selected: Vec<Item> = items
        .iter()
        .filter(|item| match &query.category {
            Some(category) => &item.category == category,
            None => true,
        })
        .skip(skip)
        .take(limit)
        .cloned()
        .collect();

    Json(selected)
}

/// 获取特定商品
async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<u64>,
) -> Result<Json<Item>, (StatusCode, Json<ErrorResponse>)> {
    let items = state.lock().unwrap();

    match items.iter().find(|item| item.id == item_id) {
        Some(item) => Ok(Json(item.clone())),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(&format!("商品 {} 不存在", item_id))),
        )),
    }
}

/// 创建新商品
async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), (StatusCode, Json<ErrorResponse>)> {
    // 校验输入
    if let Err(errors) = payload.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(&errors.to_string())),
        ));
    }

    let mut items = state.lock().unwrap();

    // id = 当前数量 + 1，教程里的简化写法，存在并发写入时并不可靠
    let item = Item {
        id: items.len() as u64 + 1,
        name: payload.name.trim().to_string(),
        description: payload.description,
        price: payload.price,
        category: payload.category,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    items.push(item.clone());

    Ok((StatusCode::CREATED, Json(item)))
}

/// 更新商品
async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<u64>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Json<Item>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(errors) = payload.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(&errors.to_string())),
        ));
    }

    let mut items = state.lock().unwrap();

    match items.iter_mut().find(|item| item.id == item_id) {
        Some(item) => {
            if let Some(name) = payload.name {
                item.name = name.trim().to_string();
            }
            if let Some(price) = payload.price {
                item.price = price;
            }
            Ok(Json(item.clone()))
        }
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(&format!("商品 {} 不存在", item_id))),
        )),
    }
}

/// 删除商品
async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<u64>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let mut items = state.lock().unwrap();

    match items.iter().position(|item| item.id == item_id) {
        Some(position) => {
            items.remove(position);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(&format!("商品 {} 不存在", item_id))),
        )),
    }
}
