//! 后台通知处理器

use axum::{
    extract::{Path, State},
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;

use super::service::NotificationService;
use crate::core::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct SendNotificationRequest {
    #[serde(default = "default_message")]
    pub message: String,
}

fn default_message() -> String {
    "一些通知".to_string()
}

/// 通知路由，挂载在 /send-notification 下
pub fn router(service: NotificationService) -> Router {
    Router::new()
        .route("/:email", post(send_notification))
        .with_state(service)
}

/// 先响应客户端，实际的发送在后台任务里完成
/// 请求体可省略，省略时使用默认消息
async fn send_notification(
    State(service): State<NotificationService>,
    Path(email): Path<String>,
    payload: Option<Json<SendNotificationRequest>>,
) -> Json<ApiResponse<()>> {
    let message = payload
        .map(|Json(p)| p.message)
        .unwrap_or_else(default_message);

    service.send_in_background(email, message);
    Json(ApiResponse::success((), "通知将在后台发送"))
}
