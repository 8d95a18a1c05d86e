//! 后台通知模块

pub mod handler;
pub mod service;
