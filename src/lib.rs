// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用层模块
///
/// 包含面向调用方的数据传输对象，例如范围查询的限定选项
pub mod application;

/// 客户端模块
///
/// 提供文档存储客户端门面，是本库的公开调用入口
pub mod client;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务模型、服务和存储接口
pub mod domain;

/// 基础设施模块
///
/// 提供存储后端的具体实现与工厂
pub mod infrastructure;

/// 工具模块
///
/// 提供错误类型和遥测等通用辅助功能
pub mod utils;
