// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含范围查询的核心业务逻辑，不持有任何共享可变状态。
///
/// 包含的服务：
/// - 范围解析（range_resolver）：把限定选项解析为具体的时间区间和排序方向
/// - 有界查询（bounded_query）：按解析结果向存储发起排序限量查询并恢复升序
pub mod bounded_query;
pub mod range_resolver;
