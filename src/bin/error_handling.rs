//! 第四课：自定义错误处理
//! 演示如何把业务错误类型统一映射为带 JSON 响应体的 HTTP 状态码

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};

// 应用状态：商品名到库存状态的简单映射
type AppState = Arc<Mutex<Vec<StockItem>>>;

#[derive(Debug, Clone, Serialize)]
struct StockItem {
    id: u64,
    name: String,
    in_stock: bool,
}

// 自定义错误类型：每个变体对应一个 HTTP 状态码
#[derive(Debug)]
enum AppError {
    ItemNotFound(u64),
    OutOfStock(String),
    Unauthorized,
}

// 错误响应结构
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    code: u16,
    timestamp: String,
}

// 把错误类型映射为 HTTP 响应，这就是整课的核心
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            AppError::ItemNotFound(id) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("商品 {} 不存在", id),
            ),
            AppError::OutOfStock(name) => (
                StatusCode::BAD_REQUEST,
                "OUT_OF_STOCK",
                format!("商品 {} 已缺货，无法购买", name),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "认证失败，请提供有效的认证信息".to_string(),
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(body)).into_response()
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("启动错误处理示例服务器...");

    // 预置几条示例数据
    let state: AppState = Arc::new(Mutex::new(vec![
        StockItem {
            id: 1,
            name: "键盘".to_string(),
            in_stock: true,
        },
        StockItem {
            id: 2,
            name: "鼠标".to_string(),
            in_stock: false,
        },
    ]));

    let app = Router::new()
        .route("/items/:item_id", get(get_item))
        .route("/items/:item_id/purchase", post(purchase_item))
        .route("/admin", get(admin_only))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:3000")
        .await
        .expect("无法绑定到端口 3000");

    info!("🚀 错误处理示例服务器运行在 http://127.0.0.1:3000");
    info!("📖 可用的路由:");
    info!("   GET  /items/:item_id          - 不存在时返回 404");
    info!("   POST /items/:item_id/purchase - 缺货时返回 400");
    info!("   GET  /admin                   - 始终返回 401 (演示认证失败)");
    info!("💡 提示: 试试 /items/2/purchase (缺货) 和 /items/99 (不存在)");

    axum::serve(listener, app).await.expect("服务器启动失败");
}

/// 查询商品：不存在时返回 404
async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<u64>,
) -> Result<Json<StockItem>, AppError> {
    let items = state.lock().unwrap();

    items
        .iter()
        .find(|item| item.id == item_id)
        .cloned()
        .map(Json)
        .ok_or(AppError::ItemNotFound(item_id))
}

/// 购买商品：不存在返回 404，缺货返回 400
async fn purchase_item(
    State(state): State<AppState>,
    Path(item_id): Path<u64>,
) -> Result<Json<StockItem>, AppError> {
    let mut items = state.lock().unwrap();

    let item = items
        .iter_mut()
        .find(|item| item.id == item_id)
        .ok_or(AppError::ItemNotFound(item_id))?;

    if !item.in_stock {
        return Err(AppError::OutOfStock(item.name.clone()));
    }

    item.in_stock = false;
    Ok(Json(item.clone()))
}

/// 演示 401：这一课还没有真正的认证，总是拒绝
async fn admin_only() -> Result<Json<serde_json::Value>, AppError> {
    Err(AppError::Unauthorized)
}
