// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::DocStreamError;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// 应用记录：无模式的字段映射
///
/// 记录必须包含字符串类型的 `id` 字段；参与范围查询的记录还必须包含
/// 基准字段，取值为 RFC 3339 字符串或纪元毫秒整数
pub type FieldMap = serde_json::Map<String, Value>;

/// 应用对象的标识字段名
pub const ID_FIELD: &str = "id";

/// 存储层原生主键字段名
///
/// 写入时由 `id` 复制而来，读取时剥除
pub const STORE_ID_FIELD: &str = "_id";

/// 存储层私有元数据信封字段名
///
/// 所有存储层附加数据收拢在这一个对象里，读取时一次剥除
pub const STORE_META_FIELD: &str = "_meta";

/// 将应用记录转换为存储记录
///
/// 做浅拷贝并附加存储层字段：把应用记录的 `id` 复制到原生主键 `_id`
/// （保证两者取值一致，并复用存储层对主键的索引），再附加 `_meta` 信封。
/// 传入的记录不会被修改
pub fn to_stored(record: &FieldMap) -> FieldMap {
    let mut stored = record.clone();

    if let Some(id) = record.get(ID_FIELD) {
        stored.insert(STORE_ID_FIELD.to_string(), id.clone());
    }
    stored.insert(STORE_META_FIELD.to_string(), json!({ "visibility": true }));

    stored
}

/// 将存储记录转换为应用记录
///
/// `to_stored` 的逆操作：剥除 `_id` 与 `_meta`，其余字段原样保留
pub fn to_application(mut stored: FieldMap) -> FieldMap {
    stored.remove(STORE_ID_FIELD);
    stored.remove(STORE_META_FIELD);
    stored
}

/// 读取记录的标识字段
///
/// # 返回值
///
/// * `Ok(String)` - 记录的标识
/// * `Err(DocStreamError::Validation)` - 标识缺失或不是非空字符串
pub fn record_id(record: &FieldMap) -> Result<String, DocStreamError> {
    match record.get(ID_FIELD) {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        _ => Err(DocStreamError::Validation(
            "record requires a non-empty string [id] field".to_string(),
        )),
    }
}

/// 将记录字段值解析为时间戳
///
/// 接受 RFC 3339 字符串或纪元毫秒整数，其余类型视为不可解析
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|stamp| stamp.with_timezone(&Utc)),
        Value::Number(number) => number.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}
