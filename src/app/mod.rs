//! 应用层：各个课程对应的业务模块，以及组合后的总路由

pub mod items;
pub mod notifications;
pub mod uploads;

use axum::{extract::State, middleware, response::Json, routing::get, Router};

use crate::core::middleware::token_auth_middleware;
use items::service::ItemService;
use notifications::service::NotificationService;
use uploads::handler::UploadConfig;

/// 组合所有课程模块的总路由
/// 中间件层（日志、CORS、超时）由调用方在外层添加
pub fn router(
    item_service: ItemService,
    upload_config: UploadConfig,
    notification_service: NotificationService,
) -> Router {
    let system = Router::new()
        .route("/", get(api_info))
        .route("/health", get(health_check))
        .with_state(item_service.clone());

    let protected = Router::new()
        .route("/protected", get(protected_info))
        .route_layer(middleware::from_fn(token_auth_middleware));

    Router::new()
        .merge(system)
        .merge(protected)
        .nest("/items", items::handler::router(item_service))
        .nest("/upload", uploads::handler::router(upload_config))
        .nest(
            "/send-notification",
            notifications::handler::router(notification_service),
        )
}

/// API 信息
async fn api_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "Rust Axum Web API 教程",
        "version": "0.1.0",
        "description": "组合所有课程的完整示例服务",
        "endpoints": {
            "GET /items": "获取商品列表，支持查询参数: skip, limit, category",
            "POST /items": "创建新商品",
            "GET /items/:item_id": "获取特定商品",
            "PUT /items/:item_id": "更新商品",
            "DELETE /items/:item_id": "删除商品",
            "POST /items/:item_id/purchase": "购买商品 (缺货返回 400)",
            "POST /upload": "上传文件 (multipart)",
            "POST /send-notification/:email": "后台发送通知",
            "GET /protected": "需要 Bearer 令牌的端点",
            "GET /health": "健康检查"
        },
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// 健康检查
async fn health_check(State(service): State<ItemService>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": "0.1.0",
        "store": {
            "type": "in-memory",
            "items_count": service.count()
        }
    }))
}

/// 受保护端点，只有带有效令牌的请求才能到达这里
async fn protected_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "你已成功访问受保护的端点",
        "user_info": {
            "authenticated": true,
            "permissions": ["read", "write"]
        },
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
