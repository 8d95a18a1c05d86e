//! 第七课：后台任务
//! 响应先返回给客户端，耗时的"发送"在后台任务里完成

use axum::{
    extract::Path,
    response::Json,
    routing::post,
    Router,
};
use std::time::Duration;
use tokio::{io::AsyncWriteExt, net::TcpListener, time::sleep};
use tracing::{error, info, Level};

const NOTIFICATION_LOG: &str = "notifications.log";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("启动后台任务示例服务器...");

    let app = Router::new().route("/send-notification/:email", post(send_notification));

    let listener = TcpListener::bind("127.0.0.1:3000")
        .await
        .expect("无法绑定到端口 3000");

    info!("🚀 后台任务服务器运行在 http://127.0.0.1:3000");
    info!("📖 可用的路由:");
    info!("   POST /send-notification/:email - 立即响应，后台写入 {}", NOTIFICATION_LOG);

    axum::serve(listener, app).await.expect("服务器启动失败");
}

/// 处理器立即返回，实际工作交给 tokio::spawn 的后台任务
async fn send_notification(Path(email): Path<String>) -> Json<serde_json::Value> {
    tokio::spawn(async move {
        if let Err(e) = write_notification(&email).await {
            // 响应已经发出，失败只能记录日志
            error!("后台通知写入失败 ({}): {}", email, e);
        }
    });

    Json(serde_json::json!({
        "message": "通知将在后台发送"
    }))
}

/// 模拟慢速的发送过程，然后把记录追加到日志文件
async fn write_notification(email: &str) -> std::io::Result<()> {
    // 用 sleep 模拟调用外部邮件服务的耗时
    sleep(Duration::from_secs(2)).await;

    let line = format!(
        "{} - 已发送通知给 {}\n",
        chrono::Utc::now().to_rfc3339(),
        email
    );

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(NOTIFICATION_LOG)
        .await?;
    file.write_all(line.as_bytes()).await?;

    info!("通知已写入日志: {}", email);
    Ok(())
}
