// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含存储后端连接参数和集合允许列表。允许列表在启动时构造一次，
/// 之后以只读方式传入客户端，不存在进程级可变状态
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 存储后端配置
    pub store: StoreSettings,
    /// 允许操作的集合名称列表
    #[serde(default)]
    pub collections: Vec<String>,
}

/// 存储后端配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    /// 后端类型 (memory)
    pub backend: String,
    /// 存储服务主机地址
    pub host: String,
    /// 存储服务端口
    pub port: u16,
    /// 数据库名称
    pub name: String,
    /// 用户名（可选）
    pub username: Option<String>,
    /// 密码（可选）
    pub password: Option<String>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件和环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("store.backend", "memory")?
            .set_default("store.host", "127.0.0.1")?
            .set_default("store.port", 27017)?
            .set_default("store.name", "docstream")?
            .set_default("store.connect_timeout", 10)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("DOCSTREAM").separator("__"));

        builder.build()?.try_deserialize()
    }
}
