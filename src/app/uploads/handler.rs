//! 文件上传处理器
//! 把 multipart 请求中的每个文件按块写入上传目录

use std::path::{Path, PathBuf};

use axum::{
    extract::{Multipart, State},
    response::Json,
    routing::post,
    Router,
};
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::info;
use uuid::Uuid;

use crate::core::{error::ApiError, response::ApiResponse};

/// 上传配置
#[derive(Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
}

impl UploadConfig {
    /// 上传目录默认为 ./uploads，可通过 UPLOAD_DIR 环境变量覆盖
    pub fn from_env() -> Self {
        let dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
        Self {
            dir: PathBuf::from(dir),
        }
    }
}

/// 上传结果
#[derive(Debug, Serialize)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: u64,
}

/// 上传路由，挂载在 /upload 下
pub fn router(config: UploadConfig) -> Router {
    Router::new().route("/", post(upload_files)).with_state(config)
}

async fn upload_files(
    State(config): State<UploadConfig>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Vec<UploadedFile>>>, ApiError> {
    tokio::fs::create_dir_all(&config.dir)
        .await
        .map_err(|e| ApiError::InternalServerError(format!("无法创建上传目录: {}", e)))?;

    let mut uploaded = Vec::new();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("multipart 解析失败: {}", e)))?
    {
        let file_name = sanitize_file_name(field.file_name());
        let content_type = field.content_type().map(|c| c.to_string());

        let target = config.dir.join(&file_name);
        let mut file = tokio::fs::File::create(&target)
            .await
            .map_err(|e| ApiError::InternalServerError(format!("无法创建文件: {}", e)))?;

        // 按块复制上传流，避免把整个文件读进内存
        let mut size: u64 = 0;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| ApiError::BadRequest(format!("读取上传内容失败: {}", e)))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| ApiError::InternalServerError(format!("写入文件失败: {}", e)))?;
            size += chunk.len() as u64;
        }

        // tokio 的 File 写入有缓冲，必须 flush 才能保证数据落盘
        file.flush()
            .await
            .map_err(|e| ApiError::InternalServerError(format!("写入文件失败: {}", e)))?;

        info!("已保存上传文件 {} ({} 字节)", file_name, size);

        uploaded.push(UploadedFile {
            file_name,
            content_type,
            size,
        });
    }

    if uploaded.is_empty() {
        return Err(ApiError::BadRequest("请求中没有包含任何文件".to_string()));
    }

    let message = format!("成功上传 {} 个文件", uploaded.len());
    Ok(Json(ApiResponse::success(uploaded, &message)))
}

/// 只保留文件名部分，丢弃客户端可能传来的路径；没有文件名时随机生成一个
fn sanitize_file_name(name: Option<&str>) -> String {
    name.and_then(|n| Path::new(n).file_name())
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| format!("upload-{}", Uuid::new_v4()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name_strips_path() {
        assert_eq!(
            sanitize_file_name(Some("../../etc/passwd")),
            "passwd".to_string()
        );
        assert_eq!(sanitize_file_name(Some("photo.png")), "photo.png".to_string());
    }

    #[test]
    fn test_sanitize_file_name_generates_fallback() {
        let generated = sanitize_file_name(None);
        assert!(generated.starts_with("upload-"));
    }
}
