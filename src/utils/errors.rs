// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::store_adapter::StoreError;
use thiserror::Error;

/// 客户端错误类型
///
/// 所有公开操作统一返回该错误。校验类错误在发起任何存储调用之前产生，
/// 存储层错误通过 `Store` 变体原样上抛，不在内部吞掉或重试。
#[derive(Error, Debug)]
pub enum DocStreamError {
    /// 数据库尚未打开
    #[error("The database is not open. Call open first")]
    NotOpen,

    /// 数据库已处于打开状态
    #[error("The database is already open")]
    AlreadyOpen,

    /// 集合不在允许列表中
    #[error("The collection [{0}] is not supported. Call add_supported_collections to add it")]
    UnsupportedCollection(String),

    /// 参数校验失败
    #[error("Invalid options: {0}")]
    Validation(String),

    /// 按标识查询未命中
    #[error("Not found")]
    NotFound,

    /// 未知的存储后端
    #[error("Unsupported store backend: {0}")]
    UnsupportedBackend(String),

    /// 存储层错误
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
