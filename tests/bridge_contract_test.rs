// ABOUTME: Integration tests for the bridge operation contract
// ABOUTME: Validates availability probing, synchronous validation, and wire JSON shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit-Up Health Bridge

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use health_bridge::errors::BridgeError;
use health_bridge::requests::{QueryAggregatedRequest, QueryRangeRequest, QueryWorkoutsRequest};
use health_bridge::synthetic_store::SyntheticStore;

#[tokio::test]
async fn availability_reports_false_without_a_store() {
    let store = Arc::new(SyntheticStore::new());
    store.set_available(false);
    let bridge = common::bridge_over(&store);

    assert!(!bridge.is_health_available().await.available);
}

#[tokio::test]
async fn availability_reprobes_until_the_store_appears() {
    let store = Arc::new(SyntheticStore::new());
    store.set_available(false);
    let bridge = common::bridge_over(&store);

    assert!(!bridge.is_health_available().await.available);
    store.set_available(true);
    assert!(bridge.is_health_available().await.available);
}

#[tokio::test]
async fn availability_stays_true_once_probed() {
    let store = Arc::new(SyntheticStore::new());
    store.set_available(true);
    let bridge = common::bridge_over(&store);

    assert!(bridge.is_health_available().await.available);
    store.set_available(false);
    assert!(bridge.is_health_available().await.available);
}

#[tokio::test]
async fn inverted_range_fails_before_touching_the_store() {
    let store = common::granted_store(&[]);
    let bridge = common::bridge_over(&store);

    let request = QueryRangeRequest {
        start_date: Some(common::iso(3, 0)),
        end_date: Some(common::iso(1, 0)),
    };
    assert!(matches!(
        bridge.query_sleep(&request).await,
        Err(BridgeError::InvalidRange)
    ));
}

#[tokio::test]
async fn missing_dates_name_the_offending_field() {
    let store = common::granted_store(&[]);
    let bridge = common::bridge_over(&store);

    let request = QueryWorkoutsRequest {
        start_date: Some(common::iso(1, 0)),
        end_date: None,
        include_heart_rate: false,
        include_route: false,
        include_steps: false,
    };
    match bridge.query_workouts(&request).await.unwrap_err() {
        BridgeError::MissingField { field } => assert_eq!(field, "endDate"),
        other => panic!("unexpected: {other}"),
    }
}

#[tokio::test]
async fn validation_errors_classify_as_such() {
    let err = BridgeError::MissingField { field: "startDate" };
    assert!(err.is_validation());
    assert!(!BridgeError::ConsentRequestPending.is_validation());
    assert!(!BridgeError::platform("store gone").is_validation());
}

#[tokio::test]
async fn aggregated_response_serializes_camel_case_with_null_values() {
    let store = common::granted_store(&[health_bridge::HealthPermission::ReadSteps]);
    store.add_metric_sample(
        health_bridge::metrics::AggregateMetric::StepsCountTotal,
        common::at(1, 8, 0),
        1000.0,
    );
    let bridge = common::bridge_over(&store);

    let request = QueryAggregatedRequest {
        start_date: Some(common::iso(1, 0)),
        end_date: Some(common::iso(2, 0)),
        data_type: Some("steps".to_owned()),
        bucket: Some("day".to_owned()),
    };
    let response = bridge.query_aggregated(&request).await.unwrap();
    let json = serde_json::to_value(&response).unwrap();

    let samples = json["aggregatedData"].as_array().unwrap();
    assert_eq!(samples.len(), 1);
    assert!(samples[0].get("startDate").is_some());
    assert!(samples[0].get("endDate").is_some());
    assert_eq!(samples[0]["value"], serde_json::json!(1000.0));
}

#[tokio::test]
async fn workout_response_omits_absent_optional_fields() {
    let store = common::granted_store(&[health_bridge::HealthPermission::ReadWorkouts]);
    store.add_workout(common::workout(
        "w1",
        common::at(1, 10, 0),
        common::at(1, 11, 0),
        56,
    ));
    let bridge = common::bridge_over(&store);

    let request = QueryWorkoutsRequest {
        start_date: Some(common::iso(1, 0)),
        end_date: Some(common::iso(2, 0)),
        include_heart_rate: false,
        include_route: false,
        include_steps: false,
    };
    let response = bridge.query_workouts(&request).await.unwrap();
    let json = serde_json::to_value(&response).unwrap();

    let workout = &json["workouts"][0];
    assert_eq!(workout["workoutType"], "RUNNING");
    assert_eq!(workout["sourceBundleId"], "org.example.synthetic");
    assert!(workout.get("steps").is_none());
    assert!(workout.get("route").is_none());
    assert!(workout.get("heartRate").is_none());
}

#[tokio::test]
async fn record_responses_use_their_session_key_names() {
    let store = common::granted_store(&[]);
    store.add_sleep_session(common::sleep_session(
        "s1",
        vec![(5, common::at(1, 0, 0), common::at(1, 7, 0))],
    ));
    let bridge = common::bridge_over(&store);

    let request = QueryRangeRequest {
        start_date: Some(common::iso(1, 0)),
        end_date: Some(common::iso(2, 0)),
    };
    let sleep = serde_json::to_value(bridge.query_sleep(&request).await.unwrap()).unwrap();
    assert!(sleep.get("sleepSessions").is_some());
    assert_eq!(sleep["sleepSessions"][0]["stages"][0]["stage"], "DEEP");

    let glucose =
        serde_json::to_value(bridge.query_blood_glucose(&request).await.unwrap()).unwrap();
    assert!(glucose.get("bloodGlucoseSessions").is_some());

    let oxygen =
        serde_json::to_value(bridge.query_oxygen_saturation(&request).await.unwrap()).unwrap();
    assert!(oxygen.get("oxygenSaturationSessions").is_some());

    let heart = serde_json::to_value(bridge.query_heart_rate(&request).await.unwrap()).unwrap();
    assert!(heart.get("heartRateMeasurements").is_some());
}
