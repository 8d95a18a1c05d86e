//! 第二课：路径参数和查询参数
//! 演示类型化的路径提取、可选查询参数和多级路径参数

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};

/// 列表查询参数
/// skip/limit 是分页的惯例写法，q 是可选的搜索词
#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    skip: Option<usize>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    q: Option<String>,
}

/// 教学用的固定数据，模拟数据库里的商品表
fn fake_items_db() -> Vec<&'static str> {
    vec!["键盘", "鼠标", "显示器", "音箱", "摄像头"]
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("启动路径/查询参数示例服务器...");

    let app = Router::new()
        .route("/items", get(list_items))
        .route("/items/:item_id", get(get_item))
        .route("/users/:user_id/items/:item_id", get(get_user_item))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind("127.0.0.1:3000")
        .await
        .expect("无法绑定到端口 3000");

    info!("🚀 服务器运行在 http://127.0.0.1:3000");
    info!("📖 可用的路由:");
    info!("   GET  /items                         - 列表 (支持 skip/limit/q)");
    info!("   GET  /items/:item_id                - 类型化路径参数 (u64)");
    info!("   GET  /users/:user_id/items/:item_id - 多级路径参数");
    info!("💡 提示: /items/abc 会由框架自动返回 400，因为 item_id 必须是数字");

    axum::serve(listener, app).await.expect("服务器启动失败");
}

/// 列表端点：skip/limit 切片，q 过滤
async fn list_items(Query(query): Query<ListQuery>) -> Json<serde_json::Value> {
    let items = fake_items_db();
    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(10);

    let selected: Vec<&str> = items
        .into_iter()
        .filter(|name| match &query.q {
            Some(q) => name.contains(q.as_str()),
            None => true,
        })
        .skip(skip)
        .take(limit)
        .collect();

    Json(serde_json::json!({
        "items": selected,
        "skip": skip,
        "limit": limit,
        "q": query.q
    }))
}

/// 类型化路径参数：声明为 u64 后，非数字路径由框架拒绝
async fn get_item(
    Path(item_id): Path<u64>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let items = fake_items_db();

    match items.get(item_id as usize) {
        Some(name) => Ok(Json(serde_json::json!({
            "item_id": item_id,
            "name": name
        }))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": format!("商品 {} 不存在", item_id)
            })),
        )),
    }
}

/// 多级路径参数：一次提取多个值
async fn get_user_item(
    Path((user_id, item_id)): Path<(u64, u64)>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "user_id": user_id,
        "item_id": item_id,
        "message": format!("用户 {} 的商品 {}", user_id, item_id)
    }))
}
