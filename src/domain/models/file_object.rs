// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use bytes::Bytes;

/// 文件对象
///
/// 以集合名作为桶、以 `id` 作为键存放的二进制大对象
#[derive(Debug, Clone, PartialEq)]
pub struct FileObject {
    /// 文件标识，与记录标识采用同一套命名约定
    pub id: String,
    /// 文件内容
    pub data: Bytes,
}

impl FileObject {
    /// 创建新的文件对象
    pub fn new(id: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
        }
    }
}
