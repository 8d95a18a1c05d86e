//! 商品数据模型

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// 创建商品请求
#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 100, message = "商品名称长度必须在 1 到 100 之间"))]
    pub name: String,

    #[validate(length(max = 300, message = "商品描述不能超过 300 个字符"))]
    pub description: Option<String>,

    #[validate(range(min = 0.01, message = "价格必须大于 0"))]
    pub price: f64,

    #[validate(length(min = 1, max = 50, message = "分类长度必须在 1 到 50 之间"))]
    pub category: String,

    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

/// 更新商品请求（所有字段可选）
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 100, message = "商品名称长度必须在 1 到 100 之间"))]
    pub name: Option<String>,

    #[validate(length(max = 300, message = "商品描述不能超过 300 个字符"))]
    pub description: Option<String>,

    #[validate(range(min = 0.01, message = "价格必须大于 0"))]
    pub price: Option<f64>,

    #[validate(length(min = 1, max = 50, message = "分类长度必须在 1 到 50 之间"))]
    pub category: Option<String>,

    pub in_stock: Option<bool>,
}

/// 列表查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQuery {
    #[serde(default)]
    pub skip: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub category: Option<String>,
}
