// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::DocStreamError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// 时间点
///
/// 接受纪元毫秒整数或 RFC 3339 字符串两种写法
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeSpec {
    /// 纪元毫秒
    Millis(i64),
    /// RFC 3339 文本
    Text(String),
}

impl TimeSpec {
    /// 解析为 UTC 时间戳，无法解析时返回 None
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            TimeSpec::Millis(millis) => DateTime::from_timestamp_millis(*millis),
            TimeSpec::Text(text) => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|stamp| stamp.with_timezone(&Utc)),
        }
    }
}

/// 范围查询限定选项DTO
///
/// 只在一次查询调用期间存在，不做持久化
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LimitationOptions {
    /// 基准字段名（必填），作为范围查询的时间轴
    #[validate(length(min = 1, message = "benchmark is required"))]
    pub benchmark: String,

    /// 范围下界（可选，不含）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<TimeSpec>,

    /// 范围上界（可选，含；缺省为当前时间）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<TimeSpec>,

    /// 持续时长（秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,

    /// 结果数量上限，缺省 20，0 表示不设上限
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl LimitationOptions {
    /// 创建只含基准字段的限定选项
    pub fn new(benchmark: impl Into<String>) -> Self {
        Self {
            benchmark: benchmark.into(),
            ..Default::default()
        }
    }

    /// 从未定型的 JSON 值构造限定选项
    ///
    /// 用于选项来自外部输入的场景。每项校验失败都立即返回，
    /// 不会带着错误的选项继续执行
    ///
    /// # 返回值
    ///
    /// * `Ok(LimitationOptions)` - 构造成功
    /// * `Err(DocStreamError::Validation)` - 字段缺失或类型不符
    pub fn from_value(value: &Value) -> Result<Self, DocStreamError> {
        let map = value.as_object().ok_or_else(|| {
            DocStreamError::Validation("limitation options must be an object".to_string())
        })?;

        let benchmark = match map.get("benchmark") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => {
                return Err(DocStreamError::Validation(
                    "benchmark is required".to_string(),
                ))
            }
        };

        let duration = match map.get("duration") {
            None | Some(Value::Null) => None,
            Some(Value::Number(number)) => match number.as_i64() {
                Some(seconds) => Some(seconds),
                None => number.as_f64().map(|seconds| seconds as i64),
            },
            Some(_) => {
                return Err(DocStreamError::Validation(
                    "duration must be a number".to_string(),
                ))
            }
        };

        let limit = match map.get("limit") {
            None | Some(Value::Null) => None,
            Some(Value::Number(number)) => match number.as_u64() {
                Some(limit) => Some(limit as u32),
                None => {
                    return Err(DocStreamError::Validation(
                        "limit must be a number".to_string(),
                    ))
                }
            },
            Some(_) => {
                return Err(DocStreamError::Validation(
                    "limit must be a number".to_string(),
                ))
            }
        };

        let start = Self::time_field(map, "start")?;
        let end = Self::time_field(map, "end")?;

        Ok(Self {
            benchmark,
            start,
            end,
            duration,
            limit,
        })
    }

    fn time_field(
        map: &serde_json::Map<String, Value>,
        field: &str,
    ) -> Result<Option<TimeSpec>, DocStreamError> {
        match map.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(number)) => match number.as_i64() {
                Some(millis) => Ok(Some(TimeSpec::Millis(millis))),
                None => Err(DocStreamError::Validation(format!(
                    "{} is not a valid timestamp",
                    field
                ))),
            },
            Some(Value::String(text)) => Ok(Some(TimeSpec::Text(text.clone()))),
            Some(_) => Err(DocStreamError::Validation(format!(
                "{} is not a valid timestamp",
                field
            ))),
        }
    }
}
