// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::StoreSettings;
use crate::domain::repositories::blob_store::BlobStore;
use crate::domain::repositories::store_adapter::StoreAdapter;
use crate::infrastructure::store::memory::MemoryStore;
use crate::utils::errors::DocStreamError;
use std::sync::Arc;

/// 已打开的存储句柄
///
/// 文档接口和大对象接口共享同一个后端连接
#[derive(Clone)]
pub struct StoreHandle {
    /// 文档存储适配器
    pub documents: Arc<dyn StoreAdapter>,
    /// 大对象存储
    pub blobs: Arc<dyn BlobStore>,
}

impl StoreHandle {
    /// 从调用方提供的外部实现组装句柄
    pub fn new(documents: Arc<dyn StoreAdapter>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { documents, blobs }
    }
}

/// 存储工厂函数
///
/// 根据配置创建存储后端，未知的后端类型直接拒绝
pub fn create_store(settings: &StoreSettings) -> Result<StoreHandle, DocStreamError> {
    match settings.backend.as_str() {
        "memory" => {
            let store = Arc::new(MemoryStore::new());
            Ok(StoreHandle {
                documents: store.clone(),
                blobs: store,
            })
        }

        other => Err(DocStreamError::UnsupportedBackend(other.to_string())),
    }
}
