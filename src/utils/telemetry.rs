// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 初始化日志订阅器
///
/// 库可能被嵌入到已经安装了全局订阅器的进程中，重复初始化时静默跳过
pub fn init_telemetry() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,docstream=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
