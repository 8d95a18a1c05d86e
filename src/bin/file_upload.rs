//! 第六课：文件上传
//! 演示 multipart 请求的解析，把上传流按块写入磁盘

use axum::{
    extract::Multipart,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Serialize;
use std::path::Path;
use tokio::{io::AsyncWriteExt, net::TcpListener};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};

const UPLOAD_DIR: &str = "uploads";

#[derive(Serialize)]
struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    size: u64,
}

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

    info!("启动文件上传示例服务器...");

    let app = Router::new()
        .route("/upload", post(upload_files))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind("127.0.0.1:3000")
        .await
        .expect("无法绑定到端口 3000");

    info!("🚀 上传服务器运行在 http://127.0.0.1:3000");
    info!("📖 可用的路由:");
    info!("   POST /upload - multipart 文件上传");
    info!("💡 提示: curl -F 'file=@photo.png' http://127.0.0.1:3000/upload");

    axum::serve(listener, app).await.expect("服务器启动失败");
}

/// 上传处理器：逐个字段读取，逐块写入磁盘
async fn upload_files(
    mut multipart: Multipart,
) -> Result<Json<Vec<UploadedFile>>, (StatusCode, Json<ErrorResponse>)> {
    tokio::fs::create_dir_all(UPLOAD_DIR).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(&format!("无法创建上传目录: {}", e))),
        )
    })?;

    let mut uploaded = Vec::new();

    while let Some(mut field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(&format!("multipart 解析失败: {}", e))),
        )
    })? {
        // 只保留文件名部分，丢弃客户端可能传来的路径
        let file_name = field
            .file_name()
            .and_then(|n| Path::new(n).file_name())
            .and_then(|n| n.to_str())
            .map(|n| n.to_string())
            .unwrap_or_else(|| format!("upload-{}", uuid::Uuid::new_v4()));
        let content_type = field.content_type().map(|c| c.to_string());

        let target = Path::new(UPLOAD_DIR).join(&file_name);
        let mut file = tokio::fs::File::create(&target).await.map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(&format!("无法创建文件: {}", e))),
            )
        })?;

        // 按块复制上传流，避免把整个文件读进内存
        let mut size: u64 = 0;
        while let Some(chunk) = field.chunk().await.map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(&format!("读取上传内容失败: {}", e))),
            )
        })? {
            file.write_all(&chunk).await.map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(&format!("写入文件失败: {}", e))),
                )
            })?;
            size += chunk.len() as u64;
        }

        info!("已保存上传文件 {} ({} 字节)", file_name, size);

        uploaded.push(UploadedFile {
            file_name,
            content_type,
            size,
        });
    }

    if uploaded.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("请求中没有包含任何文件")),
        ));
    }

    Ok(Json(uploaded))
}
