// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::record::{parse_timestamp, FieldMap, STORE_ID_FIELD};
use crate::domain::repositories::blob_store::BlobStore;
use crate::domain::repositories::store_adapter::{
    Filter, SortDirection, StoreAdapter, StoreError, UpdateOptions,
};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// 进程内存储实现
///
/// 同时实现文档存储和大对象存储两个接口，作为内置的参考后端，
/// 也用于单元测试和集成测试
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, Vec<FieldMap>>>,
    blobs: RwLock<HashMap<String, HashMap<String, Bytes>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// 判断记录是否命中过滤器
///
/// 等值约束逐字段比较；范围约束按时间戳比较，
/// 基准字段缺失或无法解析的记录视为未命中
fn matches(record: &FieldMap, filter: &Filter) -> bool {
    for (field, value) in &filter.equals {
        if record.get(field) != Some(value) {
            return false;
        }
    }

    if let Some(range) = &filter.range {
        let stamp = match record.get(&range.field).and_then(parse_timestamp) {
            Some(stamp) => stamp,
            None => return false,
        };
        if let Some(lower) = range.gt {
            if stamp <= lower {
                return false;
            }
        }
        if let Some(upper) = range.lte {
            if stamp > upper {
                return false;
            }
        }
    }

    true
}

#[async_trait]
impl StoreAdapter for MemoryStore {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<FieldMap>, StoreError> {
        let guard = self.documents.read().await;
        let matched = guard
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| matches(record, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(matched)
    }

    async fn find_sorted(
        &self,
        collection: &str,
        filter: &Filter,
        sort_field: &str,
        direction: SortDirection,
        limit: u32,
    ) -> Result<Vec<FieldMap>, StoreError> {
        let mut matched = self.find(collection, filter).await?;

        // 排序键缺失的记录排在最前，与范围过滤组合时不会出现
        matched.sort_by_key(|record| record.get(sort_field).and_then(parse_timestamp));
        if direction == SortDirection::Descending {
            matched.reverse();
        }
        if limit > 0 {
            matched.truncate(limit as usize);
        }

        Ok(matched)
    }

    async fn insert(&self, collection: &str, record: FieldMap) -> Result<(), StoreError> {
        let mut guard = self.documents.write().await;
        let records = guard.entry(collection.to_string()).or_default();

        if let Some(key) = record.get(STORE_ID_FIELD) {
            if records
                .iter()
                .any(|existing| existing.get(STORE_ID_FIELD) == Some(key))
            {
                return Err(StoreError::Backend(format!(
                    "duplicate key in collection [{}]",
                    collection
                )));
            }
        }

        records.push(record);
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        filter: &Filter,
        record: FieldMap,
        options: UpdateOptions,
    ) -> Result<u64, StoreError> {
        let mut guard = self.documents.write().await;
        let records = match guard.get_mut(collection) {
            Some(records) => records,
            None => return Ok(0),
        };

        let mut matched = 0u64;
        for existing in records.iter_mut() {
            if !matches(existing, filter) {
                continue;
            }
            matched += 1;

            if options.replace {
                *existing = record.clone();
            } else {
                for (field, value) in &record {
                    existing.insert(field.clone(), value.clone());
                }
            }

            if !options.multi {
                break;
            }
        }

        Ok(matched)
    }

    async fn remove(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let mut guard = self.documents.write().await;
        let records = match guard.get_mut(collection) {
            Some(records) => records,
            None => return Ok(0),
        };

        let before = records.len();
        records.retain(|record| !matches(record, filter));
        Ok((before - records.len()) as u64)
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn put(&self, bucket: &str, id: &str, data: Bytes) -> Result<(), StoreError> {
        let mut guard = self.blobs.write().await;
        guard
            .entry(bucket.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn get(&self, bucket: &str, id: &str) -> Result<Option<Bytes>, StoreError> {
        let guard = self.blobs.read().await;
        Ok(guard.get(bucket).and_then(|bucket| bucket.get(id)).cloned())
    }

    async fn delete(&self, bucket: &str, id: &str) -> Result<bool, StoreError> {
        let mut guard = self.blobs.write().await;
        Ok(guard
            .get_mut(bucket)
            .map(|bucket| bucket.remove(id).is_some())
            .unwrap_or(false))
    }

    async fn exists(&self, bucket: &str, id: &str) -> Result<bool, StoreError> {
        let guard = self.blobs.read().await;
        Ok(guard
            .get(bucket)
            .map(|bucket| bucket.contains_key(id))
            .unwrap_or(false))
    }
}
