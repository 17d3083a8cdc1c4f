// ABOUTME: Shared fixtures for integration tests
// ABOUTME: Bridge construction helpers and raw record builders over the synthetic store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit-Up Health Bridge

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use health_bridge::bridge::HealthBridge;
use health_bridge::permissions::HealthPermission;
use health_bridge::store::{
    RawHeartRate, RawHeartRateSample, RawSegment, RawSleepSession, RawSleepStage, RawWorkout,
};
use health_bridge::synthetic_store::SyntheticStore;

pub fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, hour, minute, 0).unwrap()
}

pub fn iso(day: u32, hour: u32) -> String {
    format!("2025-06-{day:02}T{hour:02}:00:00Z")
}

pub fn bridge_over(
    store: &Arc<SyntheticStore>,
) -> HealthBridge<SyntheticStore, SyntheticStore> {
    HealthBridge::new(Arc::clone(store), Arc::clone(store))
}

pub fn granted_store(permissions: &[HealthPermission]) -> Arc<SyntheticStore> {
    let store = Arc::new(SyntheticStore::new());
    store.set_available(true);
    store.grant(permissions);
    store
}

pub fn workout(id: &str, start: DateTime<Utc>, end: DateTime<Utc>, exercise_type: i32) -> RawWorkout {
    RawWorkout {
        id: id.to_owned(),
        source_name: "Synthetic Watch".to_owned(),
        source_bundle_id: "org.example.synthetic".to_owned(),
        start,
        end,
        exercise_type,
        title: None,
        segments: Vec::new(),
        route: None,
    }
}

pub fn segment(start: DateTime<Utc>, end: DateTime<Utc>) -> RawSegment {
    RawSegment { start, end }
}

pub fn sleep_session(id: &str, stages: Vec<(i32, DateTime<Utc>, DateTime<Utc>)>) -> RawSleepSession {
    let start = stages.first().map_or_else(|| at(1, 0, 0), |s| s.1);
    let end = stages.last().map_or_else(|| at(1, 7, 0), |s| s.2);
    RawSleepSession {
        id: id.to_owned(),
        start,
        end,
        stages: stages
            .into_iter()
            .map(|(stage, start, end)| RawSleepStage { start, end, stage })
            .collect(),
    }
}

pub fn heart_rate_series(
    id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    samples: &[(DateTime<Utc>, u32)],
) -> RawHeartRate {
    RawHeartRate {
        id: id.to_owned(),
        start,
        end,
        samples: samples
            .iter()
            .map(|&(time, bpm)| RawHeartRateSample { time, bpm })
            .collect(),
    }
}
