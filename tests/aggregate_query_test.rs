// ABOUTME: Integration tests for bucketed aggregation queries
// ABOUTME: Validates bucket ordering, permission gating, omitted buckets, and failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit-Up Health Bridge

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use health_bridge::errors::BridgeError;
use health_bridge::metrics::AggregateMetric;
use health_bridge::permissions::HealthPermission;
use health_bridge::requests::QueryAggregatedRequest;

fn request(start: &str, end: &str, data_type: &str) -> QueryAggregatedRequest {
    QueryAggregatedRequest {
        start_date: Some(start.to_owned()),
        end_date: Some(end.to_owned()),
        data_type: Some(data_type.to_owned()),
        bucket: Some("day".to_owned()),
    }
}

#[tokio::test]
async fn daily_buckets_come_back_ordered_and_clamped() {
    let store = common::granted_store(&[HealthPermission::ReadSteps]);
    store.add_metric_sample(AggregateMetric::StepsCountTotal, common::at(1, 8, 0), 1000.0);
    store.add_metric_sample(AggregateMetric::StepsCountTotal, common::at(2, 9, 0), 500.0);
    store.add_metric_sample(AggregateMetric::StepsCountTotal, common::at(3, 1, 0), 250.0);
    let bridge = common::bridge_over(&store);

    let response = bridge
        .query_aggregated(&request(&common::iso(1, 0), &common::iso(3, 12), "steps"))
        .await
        .unwrap();

    let samples = &response.aggregated_data;
    assert_eq!(samples.len(), 3);
    for pair in samples.windows(2) {
        assert!(pair[0].start_date < pair[1].start_date);
    }
    assert_eq!(samples[0].start_date, common::at(1, 0, 0));
    assert_eq!(samples[0].end_date, common::at(2, 0, 0));
    assert_eq!(samples[2].end_date, common::at(3, 12, 0));
    assert_eq!(samples[0].value, Some(1000.0));
    assert_eq!(samples[1].value, Some(500.0));
    assert_eq!(samples[2].value, Some(250.0));
}

#[tokio::test]
async fn ungranted_metric_yields_empty_data_not_an_error() {
    let store = common::granted_store(&[]);
    store.add_metric_sample(AggregateMetric::StepsCountTotal, common::at(1, 8, 0), 1000.0);
    let bridge = common::bridge_over(&store);

    let response = bridge
        .query_aggregated(&request(&common::iso(1, 0), &common::iso(2, 0), "steps"))
        .await
        .unwrap();

    assert!(response.aggregated_data.is_empty());
}

#[tokio::test]
async fn buckets_without_data_are_omitted_not_zeroed() {
    let store = common::granted_store(&[HealthPermission::ReadDistance]);
    store.add_metric_sample(AggregateMetric::DistanceTotal, common::at(1, 8, 0), 1200.5);
    let bridge = common::bridge_over(&store);

    let response = bridge
        .query_aggregated(&request(&common::iso(1, 0), &common::iso(4, 0), "distance"))
        .await
        .unwrap();

    assert_eq!(response.aggregated_data.len(), 1);
    assert_eq!(response.aggregated_data[0].value, Some(1200.5));
}

#[tokio::test]
async fn calorie_metrics_are_distinct_data_types() {
    let store = common::granted_store(&[
        HealthPermission::ReadActiveCalories,
        HealthPermission::ReadTotalCalories,
    ]);
    store.add_metric_sample(
        AggregateMetric::ActiveCaloriesTotal,
        common::at(1, 8, 0),
        320.0,
    );
    store.add_metric_sample(
        AggregateMetric::TotalCaloriesTotal,
        common::at(1, 8, 0),
        1800.0,
    );
    let bridge = common::bridge_over(&store);

    let active = bridge
        .query_aggregated(&request(
            &common::iso(1, 0),
            &common::iso(2, 0),
            "active-calories",
        ))
        .await
        .unwrap();
    let total = bridge
        .query_aggregated(&request(
            &common::iso(1, 0),
            &common::iso(2, 0),
            "total-calories",
        ))
        .await
        .unwrap();

    assert_eq!(active.aggregated_data[0].value, Some(320.0));
    assert_eq!(total.aggregated_data[0].value, Some(1800.0));
}

#[tokio::test]
async fn unsupported_data_type_is_rejected_before_any_query() {
    let store = common::granted_store(&[HealthPermission::ReadMindfulness]);
    let bridge = common::bridge_over(&store);

    let result = bridge
        .query_aggregated(&request(&common::iso(1, 0), &common::iso(2, 0), "mindfulness"))
        .await;
    assert!(matches!(
        result,
        Err(BridgeError::UnsupportedMetric { .. })
    ));
}

#[tokio::test]
async fn unsupported_bucket_is_rejected() {
    let store = common::granted_store(&[HealthPermission::ReadSteps]);
    let bridge = common::bridge_over(&store);

    let mut req = request(&common::iso(1, 0), &common::iso(2, 0), "steps");
    req.bucket = Some("fortnight".to_owned());
    assert!(matches!(
        bridge.query_aggregated(&req).await,
        Err(BridgeError::UnsupportedBucket { .. })
    ));
}

#[tokio::test]
async fn platform_failure_propagates_as_an_error() {
    let store = common::granted_store(&[HealthPermission::ReadSteps]);
    store.fail_metric(AggregateMetric::StepsCountTotal);
    let bridge = common::bridge_over(&store);

    let result = bridge
        .query_aggregated(&request(&common::iso(1, 0), &common::iso(2, 0), "steps"))
        .await;
    assert!(matches!(result, Err(BridgeError::Platform { .. })));
}
