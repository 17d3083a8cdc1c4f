// ABOUTME: Stable output schema for normalized health records and aggregates
// ABOUTME: Per-request value objects serialized camelCase on the wire
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit-Up Health Bridge

//! # Normalized output models
//!
//! Every query constructs these fresh, returns them to the caller, and
//! discards them; nothing here is persisted. Dates serialize as ISO-8601
//! instants in UTC.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One time-bucketed aggregate value.
///
/// `value` is `None` when the platform returned no data for the bucket; it is
/// kept on the wire as an explicit null, distinct from zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedSample {
    /// Bucket start
    pub start_date: DateTime<Utc>,
    /// Bucket end
    pub end_date: DateTime<Utc>,
    /// Aggregate value in the metric's canonical unit
    pub value: Option<f64>,
}

/// Normalized workout (exercise session).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Platform record id
    pub id: String,
    /// Recording device/source name
    pub source_name: String,
    /// Package/bundle id of the recording app
    pub source_bundle_id: String,
    /// Session start
    pub start_date: DateTime<Utc>,
    /// Session end
    pub end_date: DateTime<Utc>,
    /// Exercise type label (`OTHER` for unrecognized codes)
    pub workout_type: &'static str,
    /// User-visible title, when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Active duration in seconds (sum of segments when present)
    pub duration: u64,
    /// Distance in meters, when granted and measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Step count, when requested, granted, and measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<f64>,
    /// Energy in kilocalories: total-calories when available, else
    /// active-calories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Route points, when requested and recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Vec<RouteSample>>,
    /// Heart rate samples within the session window, when requested and
    /// granted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<Vec<HeartRateSample>>,
}

/// One route location fix.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSample {
    /// Fix timestamp
    pub timestamp: DateTime<Utc>,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
    /// Altitude in meters, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<f64>,
}

/// One heart rate sample.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateSample {
    /// Sample instant
    pub timestamp: DateTime<Utc>,
    /// Beats per minute
    pub bpm: u32,
}

/// Normalized sleep session with flattened stage intervals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepSession {
    /// Platform record id
    pub id: String,
    /// Session start
    pub start_date: DateTime<Utc>,
    /// Session end
    pub end_date: DateTime<Utc>,
    /// Stage intervals in chronological order
    pub stages: Vec<SleepStage>,
}

/// One labeled sleep stage interval.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepStage {
    /// Stage start
    pub start_date: DateTime<Utc>,
    /// Stage end
    pub end_date: DateTime<Utc>,
    /// Stage label (`UNKNOWN` for unrecognized codes)
    pub stage: &'static str,
}

/// Normalized basal body temperature measurement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasalBodyTemperatureSample {
    /// Platform record id
    pub id: String,
    /// Measurement instant
    pub sample_date: DateTime<Utc>,
    /// Temperature in degrees Celsius
    pub temperature_celsius: f64,
}

/// Normalized blood glucose measurement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodGlucoseSample {
    /// Platform record id
    pub id: String,
    /// Measurement instant
    pub sample_date: DateTime<Utc>,
    /// Glucose level in mg/dL
    pub level: f64,
    /// Specimen source label
    pub specimen_source: &'static str,
    /// Meal type label
    pub meal_type: &'static str,
    /// Relation-to-meal label
    pub relation_to_meal: &'static str,
}

/// Normalized oxygen saturation measurement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OxygenSaturationSample {
    /// Platform record id
    pub id: String,
    /// Measurement instant
    pub sample_date: DateTime<Utc>,
    /// Saturation percentage (0-100)
    pub percentage: f64,
}

/// Normalized heart rate series measurement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateMeasurement {
    /// Platform record id
    pub id: String,
    /// Series start
    pub start_date: DateTime<Utc>,
    /// Series end
    pub end_date: DateTime<Utc>,
    /// Samples in chronological order
    pub samples: Vec<HeartRateSample>,
}
