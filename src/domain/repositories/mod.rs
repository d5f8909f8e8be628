// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 存储接口模块
///
/// 该模块定义了领域层的存储接口，遵循依赖倒置原则。
/// 接口描述了本库对底层文档存储的最小要求，具体实现由基础设施层提供。
///
/// 包含的接口：
/// - 文档存储适配器（store_adapter）：带过滤、排序和上限的文档读写
/// - 大对象存储（blob_store）：按桶和标识存取二进制内容
pub mod blob_store;
pub mod store_adapter;
