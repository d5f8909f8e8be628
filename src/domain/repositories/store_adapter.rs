// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::record::{FieldMap, STORE_ID_FIELD};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

/// 存储层错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    /// 连接错误
    #[error("Connection error: {0}")]
    Connection(String),

    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 后端错误
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// 按排序字段升序
    Ascending,
    /// 按排序字段降序
    Descending,
}

/// 基准字段的范围约束
///
/// 下界取开区间（严格大于），上界取闭区间（小于等于）。
/// 字段值按时间戳比较，缺失或无法解析该字段的记录不在约束范围内
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeConstraint {
    /// 被约束的字段名
    pub field: String,
    /// 下界（不含）
    pub gt: Option<DateTime<Utc>>,
    /// 上界（含）
    pub lte: Option<DateTime<Utc>>,
}

/// 查询过滤器
///
/// 等值约束的逐字段合取，外加至多一个范围约束。
/// 不向接口之外泄漏任何存储原生的操作符语法
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    /// 字段等值约束
    pub equals: FieldMap,
    /// 范围约束
    pub range: Option<RangeConstraint>,
}

impl Filter {
    /// 按原生主键构造过滤器
    pub fn by_id(id: &str) -> Self {
        let mut equals = FieldMap::new();
        equals.insert(STORE_ID_FIELD.to_string(), Value::String(id.to_string()));
        Self {
            equals,
            range: None,
        }
    }

    /// 按等值约束构造过滤器
    pub fn by_equals(equals: FieldMap) -> Self {
        Self {
            equals,
            range: None,
        }
    }
}

/// 更新选项
#[derive(Debug, Clone, Copy)]
pub struct UpdateOptions {
    /// true 为整体替换文档，false 为按字段合并
    pub replace: bool,
    /// 是否作用于所有命中的记录
    pub multi: bool,
}

/// 文档存储适配器特质
///
/// 定义本库对底层文档存储的最小契约。实现方负责自身的并发控制；
/// 本库对每个操作只发起一次往返，不在内部加锁或重试
#[async_trait]
pub trait StoreAdapter: Send + Sync {
    /// 查询命中过滤器的全部记录
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<FieldMap>, StoreError>;

    /// 按排序字段和方向查询，至多返回 limit 条
    ///
    /// `limit` 为 0 表示不设上限
    async fn find_sorted(
        &self,
        collection: &str,
        filter: &Filter,
        sort_field: &str,
        direction: SortDirection,
        limit: u32,
    ) -> Result<Vec<FieldMap>, StoreError>;

    /// 插入一条记录
    async fn insert(&self, collection: &str, record: FieldMap) -> Result<(), StoreError>;

    /// 更新命中过滤器的记录，返回命中数量
    async fn update(
        &self,
        collection: &str,
        filter: &Filter,
        record: FieldMap,
        options: UpdateOptions,
    ) -> Result<u64, StoreError>;

    /// 删除命中过滤器的记录，返回删除数量
    async fn remove(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    /// 断开与存储的连接
    async fn disconnect(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
