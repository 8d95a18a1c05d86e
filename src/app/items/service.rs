//! 商品业务服务
//! 使用内存列表模拟数据库，进程重启后数据会重置

use std::sync::{Arc, Mutex};

use super::model::{CreateItemRequest, Item, ListItemsQuery, UpdateItemRequest};
use crate::core::error::ApiError;

#[derive(Clone, Default)]
pub struct ItemService {
    items: Arc<Mutex<Vec<Item>>>,
}

impl ItemService {
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 获取商品列表，支持 skip/limit 分页和分类过滤
    pub fn list(&self, query: &ListItemsQuery) -> Vec<Item> {
        let items = self.items.lock().unwrap();
        let skip = query.skip.unwrap_or(0);
        let limit = query.limit.unwrap_or(usize::MAX);

        items
            .iter()
            .filter(|item| match &query.category {
                Some(category) => &item.category == category,
                None => true,
            })
            .skip(skip)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn get(&self, id: u64) -> Result<Item, ApiError> {
        let items = self.items.lock().unwrap();
        items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("商品 {} 不存在", id)))
    }

    /// 创建商品
    /// id 取当前存储数量加一，这是教程里的简化写法，
    /// 一旦存在并发写入或删除就不再可靠
    pub fn create(&self, payload: CreateItemRequest) -> Result<Item, ApiError> {
        let mut items = self.items.lock().unwrap();

        let now = chrono::Utc::now().to_rfc3339();
        let item = Item {
            id: items.len() as u64 + 1,
            name: payload.name.trim().to_string(),
            description: payload
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            price: payload.price,
            category: payload.category.trim().to_string(),
            in_stock: payload.in_stock,
            created_at: now.clone(),
            updated_at: now,
        };

        items.push(item.clone());
        Ok(item)
    }

    pub fn update(&self, id: u64, payload: UpdateItemRequest) -> Result<Item, ApiError> {
        let mut items = self.items.lock().unwrap();

        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("商品 {} 不存在", id)))?;

        if let Some(name) = payload.name {
            item.name = name.trim().to_string();
        }
        if let Some(description) = payload.description {
            item.description = Some(description.trim().to_string()).filter(|d| !d.is_empty());
        }
        if let Some(price) = payload.price {
            item.price = price;
        }
        if let Some(category) = payload.category {
            item.category = category.trim().to_string();
        }
        if let Some(in_stock) = payload.in_stock {
            item.in_stock = in_stock;
        }
        item.updated_at = chrono::Utc::now().to_rfc3339();

        Ok(item.clone())
    }

    pub fn delete(&self, id: u64) -> Result<(), ApiError> {
        let mut items = self.items.lock().unwrap();

        let position = items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("商品 {} 不存在", id)))?;

        items.remove(position);
        Ok(())
    }

    /// 购买商品：缺货时返回业务状态错误 (400)
    pub fn purchase(&self, id: u64) -> Result<Item, ApiError> {
        let mut items = self.items.lock().unwrap();

        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("商品 {} 不存在", id)))?;

        if !item.in_stock {
            return Err(ApiError::BadRequest(format!(
                "商品 {} 已缺货，无法购买",
                item.name
            )));
        }

        item.in_stock = false;
        item.updated_at = chrono::Utc::now().to_rfc3339();
        Ok(item.clone())
    }
}
