// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use bytes::Bytes;
use docstream::application::dto::limitation_options::LimitationOptions;
use docstream::client::docstream::DocStream;
use docstream::domain::models::record::FieldMap;
use docstream::domain::repositories::blob_store::BlobStore;
use docstream::domain::repositories::store_adapter::{
    Filter, SortDirection, StoreAdapter, StoreError, UpdateOptions,
};
use docstream::utils::errors::DocStreamError;
use std::sync::Arc;

/// 每个操作都失败的模拟后端，用于验证错误原样上抛
struct BrokenStore;

#[async_trait]
impl StoreAdapter for BrokenStore {
    async fn find(&self, _collection: &str, _filter: &Filter) -> Result<Vec<FieldMap>, StoreError> {
        Err(StoreError::Backend("socket reset".to_string()))
    }

    async fn find_sorted(
        &self,
        _collection: &str,
        _filter: &Filter,
        _sort_field: &str,
        _direction: SortDirection,
        _limit: u32,
    ) -> Result<Vec<FieldMap>, StoreError> {
        Err(StoreError::Backend("socket reset".to_string()))
    }

    async fn insert(&self, _collection: &str, _record: FieldMap) -> Result<(), StoreError> {
        Err(StoreError::Backend("socket reset".to_string()))
    }

    async fn update(
        &self,
        _collection: &str,
        _filter: &Filter,
        _record: FieldMap,
        _options: UpdateOptions,
    ) -> Result<u64, StoreError> {
        Err(StoreError::Backend("socket reset".to_string()))
    }

    async fn remove(&self, _collection: &str, _filter: &Filter) -> Result<u64, StoreError> {
        Err(StoreError::Backend("socket reset".to_string()))
    }
}

#[async_trait]
impl BlobStore for BrokenStore {
    async fn put(&self, _bucket: &str, _id: &str, _data: Bytes) -> Result<(), StoreError> {
        Err(StoreError::Backend("socket reset".to_string()))
    }

    async fn get(&self, _bucket: &str, _id: &str) -> Result<Option<Bytes>, StoreError> {
        Err(StoreError::Backend("socket reset".to_string()))
    }

    async fn delete(&self, _bucket: &str, _id: &str) -> Result<bool, StoreError> {
        Err(StoreError::Backend("socket reset".to_string()))
    }

    async fn exists(&self, _bucket: &str, _id: &str) -> Result<bool, StoreError> {
        Err(StoreError::Backend("socket reset".to_string()))
    }
}

fn broken_client() -> DocStream {
    let store = Arc::new(BrokenStore);
    let mut client = DocStream::new();
    client.add_supported_collections(["user"]);
    client
        .open_with(store.clone(), store)
        .expect("open with injected store");
    client
}

fn assert_backend_error(err: DocStreamError) {
    match err {
        DocStreamError::Store(cause) => {
            assert!(cause.to_string().contains("socket reset"));
        }
        other => panic!("expected wrapped store error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_range_query_wraps_store_failure() {
    let client = broken_client();

    let err = client
        .query_by_limitation_options(
            "user",
            &FieldMap::new(),
            &LimitationOptions::new("created_at"),
        )
        .await
        .unwrap_err();

    assert_backend_error(err);
}

#[tokio::test]
async fn test_validation_failure_precedes_store_call() {
    // BrokenStore 的任何调用都会失败，校验错误先行返回即证明未触达存储
    let client = broken_client();

    let err = client
        .query_by_limitation_options("user", &FieldMap::new(), &LimitationOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, DocStreamError::Validation(_)));
}

#[tokio::test]
async fn test_crud_operations_wrap_store_failure() {
    let client = broken_client();
    let mut record = FieldMap::new();
    record.insert("id".to_string(), serde_json::json!("1"));

    assert_backend_error(client.insert("user", &record).await.unwrap_err());
    assert_backend_error(client.update_by_id("user", &record).await.unwrap_err());
    assert_backend_error(client.query_by_id("user", "1").await.unwrap_err());
    assert_backend_error(client.remove_by_id("user", "1").await.unwrap_err());
    assert_backend_error(client.query_file_by_id("user", "1").await.unwrap_err());
}
