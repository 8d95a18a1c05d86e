//! 模块化分层服务器
//! 把所有课程组合成一个完整的 Web API 服务

use std::path::PathBuf;
use std::time::Duration;

use axum::middleware;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use rust_axum_tutorial::app;
use rust_axum_tutorial::app::items::service::ItemService;
use rust_axum_tutorial::app::notifications::service::NotificationService;
use rust_axum_tutorial::app::uploads::handler::UploadConfig;
use rust_axum_tutorial::core::middleware::request_logging_middleware;
use rust_axum_tutorial::infrastructure::logger::Logger;

#[tokio::main]
async fn main() {
    // 初始化日志
    Logger::init("info");

    info!("启动模块化 API 服务器...");

    // 创建各模块的服务
    let item_service = ItemService::new();
    let upload_config = UploadConfig::from_env();
    let notification_service = NotificationService::new(PathBuf::from("notifications.log"));

    // 组合路由并应用中间件层 (按顺序应用)
    let app = app::router(item_service, upload_config, notification_service)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(10)));

    // 绑定地址，可通过 BIND_ADDR 环境变量覆盖
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("无法绑定到 {}: {}", addr, e));

    info!("🚀 API 服务器运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /                    - API 信息");
    info!("   GET    /items               - 获取商品列表 (支持 skip/limit/category)");
    info!("   POST   /items               - 创建新商品");
    info!("   GET    /items/:id           - 获取特定商品");
    info!("   PUT    /items/:id           - 更新商品");
    info!("   DELETE /items/:id           - 删除商品");
    info!("   POST   /items/:id/purchase  - 购买商品");
    info!("   POST   /upload              - 上传文件");
    info!("   POST   /send-notification/:email - 后台发送通知");
    info!("   GET    /protected           - 需要 Bearer 令牌");
    info!("   GET    /health              - 健康检查");
    info!("💡 提示: 访问 /protected 需要 'Authorization: Bearer <API_TOKEN>'");

    // 启动服务器
    axum::serve(listener, app).await.expect("服务器启动失败");
}
