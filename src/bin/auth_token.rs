//! 第五课：令牌认证
//! 教学用的简化认证：把请求携带的令牌和一个固定字符串比较
//! 演示两种携带方式：查询参数和 Authorization 请求头

use axum::{
    extract::{Query, Request},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};

/// 固定的访问令牌，可通过 API_TOKEN 环境变量覆盖
/// 真实系统中应该校验签名或查询会话，而不是比较字符串
const DEFAULT_API_TOKEN: &str = "secret-token";

fn api_token() -> String {
    std::env::var("API_TOKEN").unwrap_or_else(|_| DEFAULT_API_TOKEN.to_string())
}

// 查询参数方式的令牌
#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

// 401 错误响应
#[derive(Serialize)]
struct UnauthorizedResponse {
    error: String,
    message: String,
    code: u16,
    timestamp: String,
}

fn unauthorized() -> Response {
    let body = UnauthorizedResponse {
        error: "UNAUTHORIZED".to_string(),
        message: "认证失败，请提供有效的认证信息".to_string(),
        code: 401,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("启动令牌认证示例服务器...");

    // /protected 使用请求头认证中间件，/items 在处理器里检查查询参数
    let protected = Router::new()
        .route("/protected", get(protected_handler))
        .route_layer(middleware::from_fn(bearer_auth_middleware));

    let app = Router::new()
        .route("/items", get(items_with_query_token))
        .merge(protected)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind("127.0.0.1:3000")
        .await
        .expect("无法绑定到端口 3000");

    info!("🚀 认证示例服务器运行在 http://127.0.0.1:3000");
    info!("📖 可用的路由:");
    info!("   GET /items?token=...  - 查询参数方式");
    info!("   GET /protected        - 请求头方式 (Authorization: Bearer ...)");
    info!("💡 提示: 默认令牌是 '{}'", DEFAULT_API_TOKEN);

    axum::serve(listener, app).await.expect("服务器启动失败");
}

/// 请求头认证中间件
async fn bearer_auth_middleware(req: Request, next: Next) -> Response {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok());

    match auth_header {
        Some(header) if header.starts_with("Bearer ") => {
            let token = &header[7..]; // 移除 "Bearer " 前缀
            if token != api_token() {
                warn!("拒绝无效令牌: {}...", &token[..token.len().min(8)]);
                return unauthorized();
            }
        }
        _ => return unauthorized(),
    }

    next.run(req).await
}

/// 查询参数方式：?token=secret-token
async fn items_with_query_token(Query(query): Query<TokenQuery>) -> Response {
    match query.token {
        Some(token) if token == api_token() => Json(serde_json::json!({
            "items": ["键盘", "鼠标", "显示器"],
            "message": "令牌有效"
        }))
        .into_response(),
        _ => unauthorized(),
    }
}

/// 只有通过中间件认证的请求才能到达这里
async fn protected_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "你已成功访问受保护的端点",
        "user_info": {
            "authenticated": true,
            "permissions": ["read", "write"]
        },
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
