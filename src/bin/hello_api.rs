//! 第一课：最小的 Axum 服务器
//! 学习 Web API 的第一步：返回一个 JSON 问候

use axum::{response::Json, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("启动第一个 API 服务器...");

    // 创建路由
    let app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http());

    // 绑定地址
    let listener = TcpListener::bind("127.0.0.1:3000")
        .await
        .expect("无法绑定到端口 3000");

    info!("🚀 服务器运行在 http://127.0.0.1:3000");
    info!("📖 可用的路由:");
    info!("   GET  /        - JSON 问候");
    info!("   GET  /health  - 健康检查");

    // 启动服务器
    axum::serve(listener, app).await.expect("服务器启动失败");
}

/// 最经典的第一个端点
async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Hello World"
    }))
}

/// 健康检查处理器
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": "0.1.0",
        "framework": "Axum 0.7"
    }))
}
