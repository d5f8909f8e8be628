// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::limitation_options::{LimitationOptions, TimeSpec};
use crate::utils::errors::DocStreamError;
use chrono::{DateTime, Duration, Utc};
use validator::Validate;

/// 结果数量上限的缺省值
pub const DEFAULT_LIMIT: u32 = 20;

/// 解析后的时间范围
///
/// 区间为左开右闭：`benchmark > start` 且 `benchmark <= end`。
/// `end` 仅在给出 `start` 而 `end` 与 `duration` 都缺省时为 None（上界开放），
/// 其余路径解析后必有具体上界。两端都存在时保证 `start` 严格早于 `end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    /// 下界（不含）
    pub start: Option<DateTime<Utc>>,
    /// 上界（含）
    pub end: Option<DateTime<Utc>>,
    /// 内部取数方向是否为升序
    pub ascending: bool,
    /// 结果数量上限，0 表示不设上限
    pub limit: u32,
}

/// 将限定选项解析为具体范围，上界缺省取当前时间
pub fn resolve(options: &LimitationOptions) -> Result<ResolvedRange, DocStreamError> {
    resolve_at(options, Utc::now())
}

/// 将限定选项解析为具体范围
///
/// 排序方向由锚定的一端决定：给出 `start` 表示"取该时刻之后最早的记录"，
/// 用升序取数；未给出 `start` 表示"取截止时刻之前最新的记录"，用降序取数。
/// 这样数量上限截断时丢弃的总是离锚定端最远的记录。
///
/// # 参数
///
/// * `options` - 限定选项
/// * `now` - 上界缺省时使用的当前时间
///
/// # 返回值
///
/// * `Ok(ResolvedRange)` - 解析后的范围
/// * `Err(DocStreamError::Validation)` - 选项校验失败，此时不会发起任何存储调用
pub fn resolve_at(
    options: &LimitationOptions,
    now: DateTime<Utc>,
) -> Result<ResolvedRange, DocStreamError> {
    options
        .validate()
        .map_err(|_| DocStreamError::Validation("benchmark is required".to_string()))?;

    let start = coerce(options.start.as_ref(), "start")?;
    let end = coerce(options.end.as_ref(), "end")?;
    let limit = options.limit.unwrap_or(DEFAULT_LIMIT);

    let range = match start {
        Some(start) => {
            // 显式上界优先，此时 duration 被忽略
            let end = match (end, options.duration) {
                (Some(end), _) => Some(end),
                (None, Some(seconds)) => Some(start + Duration::seconds(seconds)),
                (None, None) => None,
            };
            ResolvedRange {
                start: Some(start),
                end,
                ascending: true,
                limit,
            }
        }
        None => {
            let end = end.unwrap_or(now);
            let start = options
                .duration
                .map(|seconds| end - Duration::seconds(seconds));
            ResolvedRange {
                start,
                end: Some(end),
                ascending: false,
                limit,
            }
        }
    };

    if let (Some(start), Some(end)) = (range.start, range.end) {
        if start >= end {
            return Err(DocStreamError::Validation(
                "start must be earlier than end".to_string(),
            ));
        }
    }

    Ok(range)
}

fn coerce(
    point: Option<&TimeSpec>,
    field: &str,
) -> Result<Option<DateTime<Utc>>, DocStreamError> {
    match point {
        None => Ok(None),
        Some(point) => point.to_utc().map(Some).ok_or_else(|| {
            DocStreamError::Validation(format!("{} is not a valid timestamp", field))
        }),
    }
}
