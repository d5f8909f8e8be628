// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::store_adapter::StoreError;
use async_trait::async_trait;
use bytes::Bytes;

/// 大对象存储特质
///
/// 定义二进制内容的存取接口，桶与集合同名
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// 使用指定桶和标识保存二进制内容，已存在时覆盖
    async fn put(&self, bucket: &str, id: &str, data: Bytes) -> Result<(), StoreError>;

    /// 根据桶和标识检索二进制内容
    async fn get(&self, bucket: &str, id: &str) -> Result<Option<Bytes>, StoreError>;

    /// 根据桶和标识删除二进制内容，返回删除前是否存在
    async fn delete(&self, bucket: &str, id: &str) -> Result<bool, StoreError>;

    /// 检查桶中是否存在指定标识
    async fn exists(&self, bucket: &str, id: &str) -> Result<bool, StoreError>;
}
