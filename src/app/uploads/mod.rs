//! 文件上传模块

pub mod handler;
