//! # Rust Axum Web API 教程
//!
//! 这个库是一套循序渐进的 Web API 课程，每一课都是一个独立的可执行示例：
//! - hello_api: 第一个 Axum 服务器
//! - path_query: 路径参数和查询参数
//! - items_api: 内存存储的完整 CRUD
//! - error_handling: 自定义错误到 HTTP 状态码的映射
//! - auth_token: 令牌认证（教学用的字符串比较）
//! - file_upload: multipart 文件上传
//! - background_tasks: 后台任务
//!
//! `modular_server` (src/main.rs) 把所有课程组合成一个分层架构的完整服务。

pub mod app;
pub mod core;
pub mod infrastructure;
