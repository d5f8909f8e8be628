// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::record::{to_application, FieldMap};
use crate::domain::repositories::store_adapter::{
    Filter, RangeConstraint, SortDirection, StoreAdapter,
};
use crate::domain::services::range_resolver::ResolvedRange;
use crate::utils::errors::DocStreamError;

/// 执行有界范围查询
///
/// 把基准字段的范围约束并入基础过滤器，按解析出的方向发起排序限量查询，
/// 降序取数时就地反转，保证最终输出总是按基准字段升序。
/// 一次调用完整物化全部结果，不向调用方暴露游标
///
/// # 参数
///
/// * `store` - 存储适配器
/// * `collection` - 集合名称
/// * `base_filter` - 基础等值过滤器
/// * `range` - 解析后的时间范围
/// * `benchmark` - 基准字段名
///
/// # 返回值
///
/// * `Ok(Vec<FieldMap>)` - 按基准字段升序的应用记录
/// * `Err(DocStreamError::Store)` - 底层取数失败，原因原样上抛，不返回部分结果
pub async fn query_by_range(
    store: &dyn StoreAdapter,
    collection: &str,
    base_filter: &FieldMap,
    range: &ResolvedRange,
    benchmark: &str,
) -> Result<Vec<FieldMap>, DocStreamError> {
    let filter = Filter {
        equals: base_filter.clone(),
        range: Some(RangeConstraint {
            field: benchmark.to_string(),
            gt: range.start,
            lte: range.end,
        }),
    };

    let direction = if range.ascending {
        SortDirection::Ascending
    } else {
        SortDirection::Descending
    };

    tracing::debug!(
        collection,
        benchmark,
        limit = range.limit,
        ascending = range.ascending,
        "bounded range query"
    );

    let mut records: Vec<FieldMap> = store
        .find_sorted(collection, &filter, benchmark, direction, range.limit)
        .await?;

    if !range.ascending {
        records.reverse();
    }

    Ok(records.into_iter().map(to_application).collect())
}
