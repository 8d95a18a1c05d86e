//! 核心中间件模块

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

use super::error::ApiError;

/// 默认的访问令牌，可通过 API_TOKEN 环境变量覆盖
pub const DEFAULT_API_TOKEN: &str = "secret-token";

/// 读取当前生效的访问令牌
pub fn api_token() -> String {
    std::env::var("API_TOKEN").unwrap_or_else(|_| DEFAULT_API_TOKEN.to_string())
}

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    info!(
        "{} {} - {} - {}ms - User-Agent: {:?}",
        method,
        uri,
        status,
        duration.as_millis(),
        user_agent
    );

    response
}

/// 令牌认证中间件
/// 教学用的简化实现：只和一个固定字符串比较，不是真正的认证系统
pub async fn token_auth_middleware(req: Request, next: Next) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok());

    match auth_header {
        Some(header) if header.starts_with("Bearer ") => {
            let token = &header[7..]; // 移除 "Bearer " 前缀
            if token != api_token() {
                warn!("拒绝无效令牌: {}...", &token[..token.len().min(8)]);
                return Err(ApiError::Unauthorized);
            }
        }
        _ => return Err(ApiError::Unauthorized),
    }

    Ok(next.run(req).await)
}
