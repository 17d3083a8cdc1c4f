// ABOUTME: Core store traits and raw native record shapes for platform health data access
// ABOUTME: Defines the HealthStore and ConsentUi seams every platform backend implements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit-Up Health Bridge

//! # Platform store abstraction
//!
//! The underlying platform health store (permission storage, record storage,
//! aggregation primitives) is an external collaborator. [`HealthStore`] is the
//! seam every backend implements; the bridge only ever talks to the store
//! through it. Raw record shapes mirror what the platform hands back before
//! normalization; the stable output schema lives in [`crate::models`].
//!
//! Data flows one direction: native store to normalized output. Stores hold
//! no bridge state, and the bridge holds no store state beyond the handle.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::{BridgeError, BridgeResult};
use crate::metrics::AggregateMetric;

/// Maximum records returned by a single range read.
///
/// This cap is a platform constraint, not a bridge design choice; callers
/// needing more must page by narrowing the range.
pub const RECORD_READ_LIMIT: usize = 1000;

/// Absolute time range for a query, inclusive start, exclusive end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// Range start instant
    pub start: DateTime<Utc>,
    /// Range end instant
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Build a range, rejecting `start > end`.
    ///
    /// # Errors
    /// Returns [`BridgeError::InvalidRange`] when start is after end.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> BridgeResult<Self> {
        if start > end {
            return Err(BridgeError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Whether an instant falls within `[start, end)`.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Whether another range intersects this one.
    #[must_use]
    pub fn intersects(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && end > self.start
    }
}

/// Native unit representation of one aggregate result.
///
/// Metric extractors convert these into canonical scalar values
/// (kilocalories, meters, raw count); `None` at the store level stays
/// distinct from a zero measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AggregateValue {
    /// Discrete count (steps, pushes)
    Count(u64),
    /// Energy measurement
    Energy {
        /// Value in kilocalories
        kilocalories: f64,
    },
    /// Length measurement
    Length {
        /// Value in meters
        meters: f64,
    },
}

/// One platform aggregate result for a bucket window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupedAggregate {
    /// Bucket window start
    pub start: DateTime<Utc>,
    /// Bucket window end
    pub end: DateTime<Utc>,
    /// Aggregate value, absent when the platform has no data for the bucket
    pub value: Option<AggregateValue>,
}

/// Raw exercise-session record as read from the platform.
#[derive(Debug, Clone)]
pub struct RawWorkout {
    /// Platform record id
    pub id: String,
    /// Recording device/source name
    pub source_name: String,
    /// Package/bundle id of the recording app
    pub source_bundle_id: String,
    /// Session start
    pub start: DateTime<Utc>,
    /// Session end
    pub end: DateTime<Utc>,
    /// Native exercise-type code
    pub exercise_type: i32,
    /// Optional user-visible title
    pub title: Option<String>,
    /// Active sub-segments; may be empty for single-block sessions
    pub segments: Vec<RawSegment>,
    /// Recorded route, when the session carries one
    pub route: Option<Vec<RawRoutePoint>>,
}

/// Active sub-interval of a workout; gaps between segments are paused time.
#[derive(Debug, Clone, Copy)]
pub struct RawSegment {
    /// Segment start
    pub start: DateTime<Utc>,
    /// Segment end
    pub end: DateTime<Utc>,
}

/// Single location fix on a workout route.
#[derive(Debug, Clone, Copy)]
pub struct RawRoutePoint {
    /// Fix timestamp
    pub time: DateTime<Utc>,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Altitude in meters, when available
    pub altitude: Option<f64>,
}

/// Raw sleep session with coded stage intervals.
#[derive(Debug, Clone)]
pub struct RawSleepSession {
    /// Platform record id
    pub id: String,
    /// Session start
    pub start: DateTime<Utc>,
    /// Session end
    pub end: DateTime<Utc>,
    /// Stage intervals in chronological order
    pub stages: Vec<RawSleepStage>,
}

/// One coded sleep stage interval.
#[derive(Debug, Clone, Copy)]
pub struct RawSleepStage {
    /// Stage start
    pub start: DateTime<Utc>,
    /// Stage end
    pub end: DateTime<Utc>,
    /// Native stage code
    pub stage: i32,
}

/// Raw blood glucose measurement.
#[derive(Debug, Clone)]
pub struct RawBloodGlucose {
    /// Platform record id
    pub id: String,
    /// Measurement instant
    pub time: DateTime<Utc>,
    /// Glucose level in mg/dL
    pub level_mg_per_dl: f64,
    /// Native specimen-source code
    pub specimen_source: i32,
    /// Native meal-type code
    pub meal_type: i32,
    /// Native relation-to-meal code
    pub relation_to_meal: i32,
}

/// Raw basal body temperature measurement.
#[derive(Debug, Clone)]
pub struct RawBasalBodyTemperature {
    /// Platform record id
    pub id: String,
    /// Measurement instant
    pub time: DateTime<Utc>,
    /// Temperature in degrees Celsius
    pub temperature_celsius: f64,
}

/// Raw oxygen saturation measurement.
#[derive(Debug, Clone)]
pub struct RawOxygenSaturation {
    /// Platform record id
    pub id: String,
    /// Measurement instant
    pub time: DateTime<Utc>,
    /// Saturation percentage (0-100)
    pub percentage: f64,
}

/// Raw heart rate series record.
#[derive(Debug, Clone)]
pub struct RawHeartRate {
    /// Platform record id
    pub id: String,
    /// Series start
    pub start: DateTime<Utc>,
    /// Series end
    pub end: DateTime<Utc>,
    /// Samples in chronological order
    pub samples: Vec<RawHeartRateSample>,
}

/// One heart rate sample.
#[derive(Debug, Clone, Copy)]
pub struct RawHeartRateSample {
    /// Sample instant
    pub time: DateTime<Utc>,
    /// Beats per minute
    pub bpm: u32,
}

/// Opaque platform health store: permission queries, record reads, and
/// aggregation primitives.
///
/// All read methods return records intersecting the range in ascending start
/// order, truncated to `limit`. Implementations must not synthesize records
/// for empty sub-intervals.
#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Whether the platform store is present and usable on this device.
    async fn is_available(&self) -> bool;

    /// Native permission strings currently granted to the calling app.
    async fn granted_permissions(&self) -> BridgeResult<HashSet<String>>;

    /// Single-window aggregation for one metric.
    async fn aggregate(
        &self,
        metric: AggregateMetric,
        range: TimeRange,
    ) -> BridgeResult<Option<AggregateValue>>;

    /// Grouped aggregation: one result per supplied bucket window, in window
    /// order. Windows with no platform data are omitted, not zero-filled.
    async fn aggregate_grouped(
        &self,
        metric: AggregateMetric,
        windows: &[TimeRange],
    ) -> BridgeResult<Vec<GroupedAggregate>>;

    /// Read exercise sessions intersecting the range.
    async fn read_workouts(&self, range: TimeRange, limit: usize)
        -> BridgeResult<Vec<RawWorkout>>;

    /// Read sleep sessions intersecting the range.
    async fn read_sleep_sessions(
        &self,
        range: TimeRange,
        limit: usize,
    ) -> BridgeResult<Vec<RawSleepSession>>;

    /// Read blood glucose measurements in the range.
    async fn read_blood_glucose(
        &self,
        range: TimeRange,
        limit: usize,
    ) -> BridgeResult<Vec<RawBloodGlucose>>;

    /// Read basal body temperature measurements in the range.
    async fn read_basal_body_temperature(
        &self,
        range: TimeRange,
        limit: usize,
    ) -> BridgeResult<Vec<RawBasalBodyTemperature>>;

    /// Read oxygen saturation measurements in the range.
    async fn read_oxygen_saturation(
        &self,
        range: TimeRange,
        limit: usize,
    ) -> BridgeResult<Vec<RawOxygenSaturation>>;

    /// Read heart rate series records intersecting the range.
    async fn read_heart_rate(
        &self,
        range: TimeRange,
        limit: usize,
    ) -> BridgeResult<Vec<RawHeartRate>>;
}

/// Black-box asynchronous consent screen.
///
/// Takes the native permission strings to request and resolves with the set
/// the user actually granted. UI plumbing is outside this crate; tests and
/// development builds use the synthetic implementation.
#[async_trait]
pub trait ConsentUi: Send + Sync {
    /// Present the consent screen once and return the granted native set.
    async fn request_consent(
        &self,
        native_permissions: HashSet<String>,
    ) -> BridgeResult<HashSet<String>>;
}
