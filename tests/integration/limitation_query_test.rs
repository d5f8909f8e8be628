// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{ids, open_client, user_record};
use docstream::application::dto::limitation_options::{LimitationOptions, TimeSpec};
use docstream::client::docstream::DocStream;
use docstream::domain::models::record::{parse_timestamp, FieldMap};
use futures::future::join_all;
use serde_json::json;

const T_15_10: &str = "2025-03-01T15:10:00Z";
const T_15_20: &str = "2025-03-01T15:20:00Z";
const T_15_30: &str = "2025-03-01T15:30:00Z";
const T_15_40: &str = "2025-03-01T15:40:00Z";

/// 以 10 分钟间隔插入四条记录，标识为 1..4
async fn seeded_client() -> DocStream {
    let client = open_client(&["user"]).await;
    for (id, stamp) in [
        ("1", T_15_10),
        ("2", T_15_20),
        ("3", T_15_30),
        ("4", T_15_40),
    ] {
        client.insert("user", &user_record(id, stamp)).await.unwrap();
    }
    client
}

fn options(benchmark: &str) -> LimitationOptions {
    LimitationOptions::new(benchmark)
}

#[tokio::test]
async fn test_latest_records_when_only_limit_given() {
    // Given: 四条按时间排列的记录
    let client = seeded_client().await;

    // When: 只给出数量上限，不给范围
    let hits = client
        .query_by_limitation_options(
            "user",
            &FieldMap::new(),
            &LimitationOptions {
                limit: Some(3),
                ..options("created_at")
            },
        )
        .await
        .unwrap();

    // Then: 取最新的三条，输出仍为升序
    assert_eq!(ids(&hits), vec!["2", "3", "4"]);
}

#[tokio::test]
async fn test_end_with_duration_window() {
    let client = seeded_client().await;

    let hits = client
        .query_by_limitation_options(
            "user",
            &FieldMap::new(),
            &LimitationOptions {
                end: Some(TimeSpec::Text(T_15_20.to_string())),
                duration: Some(2400),
                limit: Some(3),
                ..options("created_at")
            },
        )
        .await
        .unwrap();

    assert_eq!(ids(&hits), vec!["1", "2"]);
}

#[tokio::test]
async fn test_start_with_duration_window() {
    let client = seeded_client().await;

    let hits = client
        .query_by_limitation_options(
            "user",
            &FieldMap::new(),
            &LimitationOptions {
                start: Some(TimeSpec::Text("2025-03-01T15:00:00Z".to_string())),
                duration: Some(2400),
                limit: Some(2),
                ..options("created_at")
            },
        )
        .await
        .unwrap();

    assert_eq!(ids(&hits), vec!["1", "2"]);
}

#[tokio::test]
async fn test_explicit_bounds_are_open_below_closed_above() {
    let client = seeded_client().await;

    let hits = client
        .query_by_limitation_options(
            "user",
            &FieldMap::new(),
            &LimitationOptions {
                start: Some(TimeSpec::Text(T_15_10.to_string())),
                end: Some(TimeSpec::Text(T_15_20.to_string())),
                limit: Some(2),
                ..options("created_at")
            },
        )
        .await
        .unwrap();

    // 下界不含 15:10 的记录，上界含 15:20 的记录
    assert_eq!(ids(&hits), vec!["2"]);
}

#[tokio::test]
async fn test_start_alone_returns_earliest_after() {
    let client = seeded_client().await;

    let hits = client
        .query_by_limitation_options(
            "user",
            &FieldMap::new(),
            &LimitationOptions {
                start: Some(TimeSpec::Text(T_15_10.to_string())),
                limit: Some(2),
                ..options("created_at")
            },
        )
        .await
        .unwrap();

    // 上界开放时取下界之后最早的记录
    assert_eq!(ids(&hits), vec!["2", "3"]);
}

#[tokio::test]
async fn test_limit_zero_returns_all_matches() {
    let client = seeded_client().await;

    let hits = client
        .query_by_limitation_options(
            "user",
            &FieldMap::new(),
            &LimitationOptions {
                limit: Some(0),
                ..options("created_at")
            },
        )
        .await
        .unwrap();

    assert_eq!(ids(&hits), vec!["1", "2", "3", "4"]);
}

#[tokio::test]
async fn test_results_always_ascending_and_within_bounds() {
    let client = seeded_client().await;
    let limitation = LimitationOptions {
        end: Some(TimeSpec::Text(T_15_40.to_string())),
        duration: Some(1800),
        limit: Some(10),
        ..options("created_at")
    };

    let hits = client
        .query_by_limitation_options("user", &FieldMap::new(), &limitation)
        .await
        .unwrap();

    let stamps: Vec<_> = hits
        .iter()
        .map(|record| parse_timestamp(record.get("created_at").unwrap()).unwrap())
        .collect();
    let lower = parse_timestamp(&json!("2025-03-01T15:10:00Z")).unwrap();
    let upper = parse_timestamp(&json!(T_15_40)).unwrap();

    assert!(stamps.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(stamps.iter().all(|stamp| *stamp > lower && *stamp <= upper));
}

#[tokio::test]
async fn test_repeat_query_is_idempotent() {
    let client = seeded_client().await;
    let limitation = LimitationOptions {
        limit: Some(3),
        ..options("created_at")
    };

    let first = client
        .query_by_limitation_options("user", &FieldMap::new(), &limitation)
        .await
        .unwrap();
    let second = client
        .query_by_limitation_options("user", &FieldMap::new(), &limitation)
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_base_filter_merges_with_range() {
    let client = open_client(&["user"]).await;
    for (id, stamp, kind) in [
        ("1", T_15_10, "a"),
        ("2", T_15_20, "b"),
        ("3", T_15_30, "a"),
        ("4", T_15_40, "a"),
    ] {
        let mut record = user_record(id, stamp);
        record.insert("kind".to_string(), json!(kind));
        client.insert("user", &record).await.unwrap();
    }

    let mut filter = FieldMap::new();
    filter.insert("kind".to_string(), json!("a"));
    let hits = client
        .query_by_limitation_options(
            "user",
            &filter,
            &LimitationOptions {
                limit: Some(2),
                ..options("created_at")
            },
        )
        .await
        .unwrap();

    // 等值过滤先于数量截断生效
    assert_eq!(ids(&hits), vec!["3", "4"]);
}

#[tokio::test]
async fn test_numeric_benchmark_values_are_supported() {
    let client = open_client(&["event"]).await;
    for (id, stamp) in [("1", T_15_10), ("2", T_15_20), ("3", T_15_30)] {
        let millis = parse_timestamp(&json!(stamp)).unwrap().timestamp_millis();
        let mut record = FieldMap::new();
        record.insert("id".to_string(), json!(id));
        record.insert("occurred_at".to_string(), json!(millis));
        client.insert("event", &record).await.unwrap();
    }

    let hits = client
        .query_by_limitation_options(
            "event",
            &FieldMap::new(),
            &LimitationOptions {
                start: Some(TimeSpec::Text(T_15_10.to_string())),
                limit: Some(5),
                ..options("occurred_at")
            },
        )
        .await
        .unwrap();

    assert_eq!(ids(&hits), vec!["2", "3"]);
}

#[tokio::test]
async fn test_concurrent_queries_share_one_connection() {
    let client = std::sync::Arc::new(seeded_client().await);

    let queries = (0..8).map(|_| {
        let client = client.clone();
        async move {
            client
                .query_by_limitation_options(
                    "user",
                    &FieldMap::new(),
                    &LimitationOptions {
                        limit: Some(3),
                        ..LimitationOptions::new("created_at")
                    },
                )
                .await
                .unwrap()
        }
    });

    let results = join_all(queries).await;

    for hits in results {
        assert_eq!(ids(&hits), vec!["2", "3", "4"]);
    }
}
