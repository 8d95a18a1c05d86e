//! 商品管理模块

pub mod handler;
pub mod model;
pub mod service;
