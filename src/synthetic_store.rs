// ABOUTME: In-memory synthetic health store for development and testing
// ABOUTME: Pre-loaded raw records, configurable grants, and injectable aggregate failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit-Up Health Bridge

//! # Synthetic store
//!
//! An in-process [`HealthStore`] and [`ConsentUi`] backed by `RwLock`-guarded
//! fixtures. Used by the integration tests and useful for development builds
//! that have no platform store. Honors the same contract as a real backend:
//! ascending reads, the record cap, omitted empty buckets, and consent
//! results computed from the configured user decision rather than echoing the
//! request.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::{BridgeError, BridgeResult};
use crate::metrics::AggregateMetric;
use crate::permissions::HealthPermission;
use crate::store::{
    AggregateValue, ConsentUi, GroupedAggregate, HealthStore, RawBasalBodyTemperature,
    RawBloodGlucose, RawHeartRate, RawOxygenSaturation, RawSleepSession, RawWorkout, TimeRange,
};

/// In-memory synthetic store.
///
/// Lock poisoning is converted to a platform error for propagation through
/// the normal failure path.
pub struct SyntheticStore {
    available: AtomicBool,
    granted: RwLock<HashSet<String>>,
    workouts: RwLock<Vec<RawWorkout>>,
    sleep_sessions: RwLock<Vec<RawSleepSession>>,
    blood_glucose: RwLock<Vec<RawBloodGlucose>>,
    basal_body_temperature: RwLock<Vec<RawBasalBodyTemperature>>,
    oxygen_saturation: RwLock<Vec<RawOxygenSaturation>>,
    heart_rate: RwLock<Vec<RawHeartRate>>,
    metric_samples: RwLock<HashMap<AggregateMetric, Vec<(DateTime<Utc>, f64)>>>,
    failing_metrics: RwLock<HashSet<AggregateMetric>>,
    consent_decision: RwLock<HashSet<String>>,
    consent_delay: RwLock<Option<Duration>>,
    consent_invocations: AtomicUsize,
}

fn poisoned() -> BridgeError {
    BridgeError::platform("synthetic store lock poisoned")
}

fn wrap_value(metric: AggregateMetric, total: f64) -> AggregateValue {
    match metric {
        AggregateMetric::StepsCountTotal => AggregateValue::Count(total as u64),
        AggregateMetric::BasalCaloriesTotal
        | AggregateMetric::ActiveCaloriesTotal
        | AggregateMetric::TotalCaloriesTotal => AggregateValue::Energy { kilocalories: total },
        AggregateMetric::DistanceTotal => AggregateValue::Length { meters: total },
    }
}

impl SyntheticStore {
    /// Create an empty store with nothing granted.
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: AtomicBool::new(true),
            granted: RwLock::new(HashSet::new()),
            workouts: RwLock::new(Vec::new()),
            sleep_sessions: RwLock::new(Vec::new()),
            blood_glucose: RwLock::new(Vec::new()),
            basal_body_temperature: RwLock::new(Vec::new()),
            oxygen_saturation: RwLock::new(Vec::new()),
            heart_rate: RwLock::new(Vec::new()),
            metric_samples: RwLock::new(HashMap::new()),
            failing_metrics: RwLock::new(HashSet::new()),
            consent_decision: RwLock::new(HashSet::new()),
            consent_delay: RwLock::new(None),
            consent_invocations: AtomicUsize::new(0),
        }
    }

    /// Generate a record id in the platform's format.
    #[must_use]
    pub fn record_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Mark the platform store present or absent.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Grant the native permissions for the given abstract permissions.
    pub fn grant(&self, permissions: &[HealthPermission]) {
        if let Ok(mut granted) = self.granted.write() {
            for p in permissions {
                granted.insert(p.native_permission().to_owned());
            }
        }
    }

    /// Revoke everything.
    pub fn revoke_all(&self) {
        if let Ok(mut granted) = self.granted.write() {
            granted.clear();
        }
    }

    /// Configure which abstract permissions the synthetic user will approve
    /// on the next consent screen.
    pub fn set_consent_decision(&self, permissions: &[HealthPermission]) {
        if let Ok(mut decision) = self.consent_decision.write() {
            decision.clear();
            for p in permissions {
                decision.insert(p.native_permission().to_owned());
            }
        }
    }

    /// Delay consent resolution, for exercising the in-flight guard.
    pub fn set_consent_delay(&self, delay: Duration) {
        if let Ok(mut slot) = self.consent_delay.write() {
            *slot = Some(delay);
        }
    }

    /// Number of times the consent screen was presented.
    #[must_use]
    pub fn consent_invocations(&self) -> usize {
        self.consent_invocations.load(Ordering::SeqCst)
    }

    /// Pre-load a workout record.
    pub fn add_workout(&self, workout: RawWorkout) {
        if let Ok(mut records) = self.workouts.write() {
            records.push(workout);
        }
    }

    /// Pre-load a sleep session record.
    pub fn add_sleep_session(&self, session: RawSleepSession) {
        if let Ok(mut records) = self.sleep_sessions.write() {
            records.push(session);
        }
    }

    /// Pre-load a blood glucose record.
    pub fn add_blood_glucose(&self, record: RawBloodGlucose) {
        if let Ok(mut records) = self.blood_glucose.write() {
            records.push(record);
        }
    }

    /// Pre-load a basal body temperature record.
    pub fn add_basal_body_temperature(&self, record: RawBasalBodyTemperature) {
        if let Ok(mut records) = self.basal_body_temperature.write() {
            records.push(record);
        }
    }

    /// Pre-load an oxygen saturation record.
    pub fn add_oxygen_saturation(&self, record: RawOxygenSaturation) {
        if let Ok(mut records) = self.oxygen_saturation.write() {
            records.push(record);
        }
    }

    /// Pre-load a heart rate series record.
    pub fn add_heart_rate(&self, record: RawHeartRate) {
        if let Ok(mut records) = self.heart_rate.write() {
            records.push(record);
        }
    }

    /// Add one point sample contributing to a metric's aggregates.
    pub fn add_metric_sample(&self, metric: AggregateMetric, time: DateTime<Utc>, value: f64) {
        if let Ok(mut samples) = self.metric_samples.write() {
            samples.entry(metric).or_default().push((time, value));
        }
    }

    /// Make aggregation calls for a metric fail with a platform error.
    pub fn fail_metric(&self, metric: AggregateMetric) {
        if let Ok(mut failing) = self.failing_metrics.write() {
            failing.insert(metric);
        }
    }

    fn check_metric_failure(&self, metric: AggregateMetric) -> BridgeResult<()> {
        let failing = self.failing_metrics.read().map_err(|_| poisoned())?;
        if failing.contains(&metric) {
            return Err(BridgeError::platform("synthetic aggregation failure"));
        }
        Ok(())
    }

    fn sum_in_window(&self, metric: AggregateMetric, window: TimeRange) -> BridgeResult<Option<f64>> {
        let samples = self.metric_samples.read().map_err(|_| poisoned())?;
        let Some(points) = samples.get(&metric) else {
            return Ok(None);
        };
        let mut total = 0.0;
        let mut any = false;
        for &(time, value) in points {
            if window.contains(time) {
                total += value;
                any = true;
            }
        }
        Ok(any.then_some(total))
    }

    fn read_sorted<R: Clone>(
        records: &RwLock<Vec<R>>,
        limit: usize,
        in_range: impl Fn(&R) -> bool,
        start_of: impl Fn(&R) -> DateTime<Utc>,
    ) -> BridgeResult<Vec<R>> {
        let guard = records.read().map_err(|_| poisoned())?;
        let mut selected: Vec<R> = guard.iter().filter(|r| in_range(r)).cloned().collect();
        selected.sort_by_key(start_of);
        selected.truncate(limit);
        Ok(selected)
    }
}

impl Default for SyntheticStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealthStore for SyntheticStore {
    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn granted_permissions(&self) -> BridgeResult<HashSet<String>> {
        Ok(self.granted.read().map_err(|_| poisoned())?.clone())
    }

    async fn aggregate(
        &self,
        metric: AggregateMetric,
        range: TimeRange,
    ) -> BridgeResult<Option<AggregateValue>> {
        self.check_metric_failure(metric)?;
        Ok(self
            .sum_in_window(metric, range)?
            .map(|total| wrap_value(metric, total)))
    }

    async fn aggregate_grouped(
        &self,
        metric: AggregateMetric,
        windows: &[TimeRange],
    ) -> BridgeResult<Vec<GroupedAggregate>> {
        self.check_metric_failure(metric)?;
        let mut results = Vec::new();
        for window in windows {
            // Empty buckets are omitted, matching the platform's grouped
            // aggregation behavior.
            if let Some(total) = self.sum_in_window(metric, *window)? {
                results.push(GroupedAggregate {
                    start: window.start,
                    end: window.end,
                    value: Some(wrap_value(metric, total)),
                });
            }
        }
        Ok(results)
    }

    async fn read_workouts(
        &self,
        range: TimeRange,
        limit: usize,
    ) -> BridgeResult<Vec<RawWorkout>> {
        Self::read_sorted(
            &self.workouts,
            limit,
            |r| range.intersects(r.start, r.end),
            |r| r.start,
        )
    }

    async fn read_sleep_sessions(
        &self,
        range: TimeRange,
        limit: usize,
    ) -> BridgeResult<Vec<RawSleepSession>> {
        Self::read_sorted(
            &self.sleep_sessions,
            limit,
            |r| range.intersects(r.start, r.end),
            |r| r.start,
        )
    }

    async fn read_blood_glucose(
        &self,
        range: TimeRange,
        limit: usize,
    ) -> BridgeResult<Vec<RawBloodGlucose>> {
        Self::read_sorted(
            &self.blood_glucose,
            limit,
            |r| range.contains(r.time),
            |r| r.time,
        )
    }

    async fn read_basal_body_temperature(
        &self,
        range: TimeRange,
        limit: usize,
    ) -> BridgeResult<Vec<RawBasalBodyTemperature>> {
        Self::read_sorted(
            &self.basal_body_temperature,
            limit,
            |r| range.contains(r.time),
            |r| r.time,
        )
    }

    async fn read_oxygen_saturation(
        &self,
        range: TimeRange,
        limit: usize,
    ) -> BridgeResult<Vec<RawOxygenSaturation>> {
        Self::read_sorted(
            &self.oxygen_saturation,
            limit,
            |r| range.contains(r.time),
            |r| r.time,
        )
    }

    async fn read_heart_rate(
        &self,
        range: TimeRange,
        limit: usize,
    ) -> BridgeResult<Vec<RawHeartRate>> {
        Self::read_sorted(
            &self.heart_rate,
            limit,
            |r| range.intersects(r.start, r.end),
            |r| r.start,
        )
    }
}

#[async_trait]
impl ConsentUi for SyntheticStore {
    async fn request_consent(
        &self,
        native_permissions: HashSet<String>,
    ) -> BridgeResult<HashSet<String>> {
        self.consent_invocations.fetch_add(1, Ordering::SeqCst);

        let delay = *self.consent_delay.read().map_err(|_| poisoned())?;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let approved: HashSet<String> = {
            let decision = self.consent_decision.read().map_err(|_| poisoned())?;
            native_permissions
                .iter()
                .filter(|p| decision.contains(*p))
                .cloned()
                .collect()
        };

        // The user's approval persists: later permission checks see it.
        {
            let mut granted = self.granted.write().map_err(|_| poisoned())?;
            granted.extend(approved.iter().cloned());
        }

        Ok(approved)
    }
}
