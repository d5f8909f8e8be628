// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::limitation_options::LimitationOptions;
use crate::config::settings::{Settings, StoreSettings};
use crate::domain::models::file_object::FileObject;
use crate::domain::models::record::{record_id, to_application, to_stored, FieldMap};
use crate::domain::repositories::blob_store::BlobStore;
use crate::domain::repositories::store_adapter::{Filter, StoreAdapter, UpdateOptions};
use crate::domain::services::{bounded_query, range_resolver};
use crate::infrastructure::store::factory::{self, StoreHandle};
use crate::utils::errors::DocStreamError;
use bytes::Bytes;
use std::collections::HashSet;
use std::sync::Arc;

/// 文档存储客户端
///
/// 持有集合允许列表和一个共享的存储连接。允许列表在打开连接前配置完毕，
/// 之后客户端可放入 `Arc` 被并发使用；除后端自身的同步外，
/// 各操作之间不做任何内部协调，取消由调用方在外层实现。
///
/// 每个数据操作都先做两项检查并在失败时立即返回：
/// 集合是否在允许列表中、连接是否已打开。
/// 所有校验都发生在发起存储调用之前
pub struct DocStream {
    collections: HashSet<String>,
    connection: Option<StoreHandle>,
}

impl DocStream {
    /// 创建尚未打开连接的客户端
    pub fn new() -> Self {
        Self {
            collections: HashSet::new(),
            connection: None,
        }
    }

    /// 从配置创建客户端，允许列表取自配置
    pub fn from_settings(settings: &Settings) -> Self {
        let mut client = Self::new();
        client.add_supported_collections(settings.collections.iter().cloned());
        client
    }

    /// 追加允许操作的集合名称
    ///
    /// 集合名先登记再使用，避免拼写错误的集合名静默生效。
    /// 该方法要求独占引用，共享给多个调用方之后便不再可变
    pub fn add_supported_collections<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.collections.insert(name.into());
        }
        self
    }

    /// 打开数据库连接
    ///
    /// # 参数
    ///
    /// * `settings` - 存储后端配置
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 连接已建立
    /// * `Err(DocStreamError::AlreadyOpen)` - 已有打开的连接
    /// * `Err(DocStreamError::UnsupportedBackend)` - 后端类型未知
    pub async fn open(&mut self, settings: &StoreSettings) -> Result<(), DocStreamError> {
        if self.connection.is_some() {
            return Err(DocStreamError::AlreadyOpen);
        }

        let handle = factory::create_store(settings)?;
        tracing::info!(
            backend = %settings.backend,
            name = %settings.name,
            "document store opened"
        );
        self.connection = Some(handle);
        Ok(())
    }

    /// 使用调用方提供的外部存储实现打开连接
    pub fn open_with(
        &mut self,
        documents: Arc<dyn StoreAdapter>,
        blobs: Arc<dyn BlobStore>,
    ) -> Result<(), DocStreamError> {
        if self.connection.is_some() {
            return Err(DocStreamError::AlreadyOpen);
        }
        self.connection = Some(StoreHandle::new(documents, blobs));
        Ok(())
    }

    /// 关闭数据库连接，未打开时为空操作
    pub async fn close(&mut self) -> Result<(), DocStreamError> {
        if let Some(handle) = self.connection.take() {
            handle.documents.disconnect().await?;
            tracing::info!("document store closed");
        }
        Ok(())
    }

    /// 当前是否持有打开的连接
    pub fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    /// 插入一条记录
    ///
    /// 记录必须带有非空字符串 `id` 字段。写入的是记录的存储形态，
    /// 调用方的记录不会被修改，成功时原样返回其副本
    pub async fn insert(
        &self,
        collection: &str,
        record: &FieldMap,
    ) -> Result<FieldMap, DocStreamError> {
        let handle = self.handle(collection)?;
        let id = record_id(record)?;

        handle
            .documents
            .insert(collection, to_stored(record))
            .await?;

        tracing::debug!(collection, id = %id, "record inserted");
        Ok(record.clone())
    }

    /// 按标识整体替换一条记录
    ///
    /// 替换语义：存储中该记录的全部字段被新记录取代，
    /// 新记录中缺失的字段随之丢弃。返回命中数量
    pub async fn update_by_id(
        &self,
        collection: &str,
        record: &FieldMap,
    ) -> Result<u64, DocStreamError> {
        let handle = self.handle(collection)?;
        let id = record_id(record)?;

        let matched = handle
            .documents
            .update(
                collection,
                &Filter::by_id(&id),
                to_stored(record),
                UpdateOptions {
                    replace: true,
                    multi: false,
                },
            )
            .await?;

        tracing::debug!(collection, id = %id, matched, "record replaced");
        Ok(matched)
    }

    /// 按标识查询一条记录
    ///
    /// # 返回值
    ///
    /// * `Ok(FieldMap)` - 应用形态的记录
    /// * `Err(DocStreamError::NotFound)` - 未命中，与多记录查询的空列表相区分
    pub async fn query_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<FieldMap, DocStreamError> {
        let handle = self.handle(collection)?;

        let mut records = handle
            .documents
            .find(collection, &Filter::by_id(id))
            .await?;

        if records.is_empty() {
            return Err(DocStreamError::NotFound);
        }
        Ok(to_application(records.swap_remove(0)))
    }

    /// 按等值条件查询记录，未命中时返回空列表
    pub async fn query_by_options(
        &self,
        collection: &str,
        filter: &FieldMap,
    ) -> Result<Vec<FieldMap>, DocStreamError> {
        let handle = self.handle(collection)?;

        let records = handle
            .documents
            .find(collection, &Filter::by_equals(filter.clone()))
            .await?;

        Ok(records.into_iter().map(to_application).collect())
    }

    /// 按时间范围限定选项查询记录
    ///
    /// 先把限定选项解析为具体区间和取数方向，再发起有界查询。
    /// 无论内部用哪个方向取数，返回结果都按基准字段升序
    pub async fn query_by_limitation_options(
        &self,
        collection: &str,
        filter: &FieldMap,
        options: &LimitationOptions,
    ) -> Result<Vec<FieldMap>, DocStreamError> {
        let handle = self.handle(collection)?;
        let range = range_resolver::resolve(options)?;

        bounded_query::query_by_range(
            handle.documents.as_ref(),
            collection,
            filter,
            &range,
            &options.benchmark,
        )
        .await
    }

    /// 按标识删除记录，返回删除数量
    pub async fn remove_by_id(&self, collection: &str, id: &str) -> Result<u64, DocStreamError> {
        let handle = self.handle(collection)?;

        let removed = handle
            .documents
            .remove(collection, &Filter::by_id(id))
            .await?;

        tracing::debug!(collection, id = %id, removed, "record removed");
        Ok(removed)
    }

    /// 按等值条件删除记录，返回删除数量
    pub async fn remove_by_options(
        &self,
        collection: &str,
        filter: &FieldMap,
    ) -> Result<u64, DocStreamError> {
        let handle = self.handle(collection)?;

        let removed = handle
            .documents
            .remove(collection, &Filter::by_equals(filter.clone()))
            .await?;

        Ok(removed)
    }

    /// 保存文件，桶与集合同名，已存在时覆盖
    pub async fn insert_file(
        &self,
        collection: &str,
        file: &FileObject,
    ) -> Result<(), DocStreamError> {
        let handle = self.handle(collection)?;

        handle
            .blobs
            .put(collection, &file.id, file.data.clone())
            .await?;

        tracing::debug!(collection, id = %file.id, size = file.data.len(), "file inserted");
        Ok(())
    }

    /// 按标识读取文件内容
    ///
    /// # 返回值
    ///
    /// * `Ok(Bytes)` - 文件内容
    /// * `Err(DocStreamError::NotFound)` - 文件不存在
    pub async fn query_file_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Bytes, DocStreamError> {
        let handle = self.handle(collection)?;

        match handle.blobs.get(collection, id).await? {
            Some(data) => Ok(data),
            None => Err(DocStreamError::NotFound),
        }
    }

    /// 按标识删除文件，返回删除前是否存在
    pub async fn remove_file_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<bool, DocStreamError> {
        let handle = self.handle(collection)?;

        let existed = handle.blobs.delete(collection, id).await?;
        Ok(existed)
    }

    /// 操作前的统一校验：集合须在允许列表中，连接须已打开
    fn handle(&self, collection: &str) -> Result<&StoreHandle, DocStreamError> {
        if !self.collections.contains(collection) {
            return Err(DocStreamError::UnsupportedCollection(collection.to_string()));
        }
        self.connection.as_ref().ok_or(DocStreamError::NotOpen)
    }
}

impl Default for DocStream {
    fn default() -> Self {
        Self::new()
    }
}
