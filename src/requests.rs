// ABOUTME: Wire request and response DTOs with synchronous validation
// ABOUTME: Date parsing, required-field checks, and range ordering before any async work
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit-Up Health Bridge

//! # Boundary contract
//!
//! Dates are ISO-8601 instant strings in UTC on the wire. Validation runs
//! synchronously and names the offending field; no platform call happens for
//! an invalid request. Unknown permission strings are dropped, not rejected.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::BucketPeriod;
use crate::errors::{BridgeError, BridgeResult};
use crate::metrics::MetricDescriptor;
use crate::models::{
    AggregatedSample, BasalBodyTemperatureSample, BloodGlucoseSample, HeartRateMeasurement,
    OxygenSaturationSample, SleepSession, Workout,
};
use crate::permissions::{parse_requested, HealthPermission};
use crate::store::TimeRange;

/// Parse an ISO-8601 instant string for a named field.
///
/// # Errors
/// [`BridgeError::MissingField`] when absent, [`BridgeError::InvalidDate`]
/// when unparseable.
pub fn parse_instant(field: &'static str, value: Option<&str>) -> BridgeResult<DateTime<Utc>> {
    let raw = value.ok_or(BridgeError::MissingField { field })?;
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| BridgeError::InvalidDate {
            field,
            message: e.to_string(),
        })
}

fn parse_range(start: Option<&str>, end: Option<&str>) -> BridgeResult<TimeRange> {
    let start = parse_instant("startDate", start)?;
    let end = parse_instant("endDate", end)?;
    TimeRange::new(start, end)
}

/// Permission check/request payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsRequest {
    /// Wire permission names; unknown entries are dropped during validation
    pub permissions: Option<Vec<String>>,
}

impl PermissionsRequest {
    /// Validate and resolve the requested permission set.
    ///
    /// # Errors
    /// [`BridgeError::MissingField`] when the permissions array is absent.
    pub fn validate(&self) -> BridgeResult<Vec<HealthPermission>> {
        let names = self.permissions.as_ref().ok_or(BridgeError::MissingField {
            field: "permissions",
        })?;
        Ok(parse_requested(names))
    }
}

/// Aggregated query payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryAggregatedRequest {
    /// Range start, ISO-8601 instant
    pub start_date: Option<String>,
    /// Range end, ISO-8601 instant
    pub end_date: Option<String>,
    /// Aggregate data type name
    pub data_type: Option<String>,
    /// Bucket period name
    pub bucket: Option<String>,
}

impl QueryAggregatedRequest {
    /// Validate dates, data type, and bucket synchronously.
    ///
    /// # Errors
    /// Validation errors naming the missing/invalid field, or
    /// `UnsupportedMetric`/`UnsupportedBucket`.
    pub fn validate(&self) -> BridgeResult<(TimeRange, MetricDescriptor, BucketPeriod)> {
        let range = parse_range(self.start_date.as_deref(), self.end_date.as_deref())?;
        let data_type = self
            .data_type
            .as_deref()
            .ok_or(BridgeError::MissingField { field: "dataType" })?;
        let descriptor = MetricDescriptor::resolve(data_type)?;
        let bucket = self
            .bucket
            .as_deref()
            .ok_or(BridgeError::MissingField { field: "bucket" })?;
        let period = BucketPeriod::parse(bucket)?;
        Ok((range, descriptor, period))
    }
}

/// Workout query payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryWorkoutsRequest {
    /// Range start, ISO-8601 instant
    pub start_date: Option<String>,
    /// Range end, ISO-8601 instant
    pub end_date: Option<String>,
    /// Attach per-workout heart rate samples
    #[serde(default)]
    pub include_heart_rate: bool,
    /// Attach recorded route points
    #[serde(default)]
    pub include_route: bool,
    /// Attach step-count enrichment
    #[serde(default)]
    pub include_steps: bool,
}

impl QueryWorkoutsRequest {
    /// Validate the date range synchronously.
    ///
    /// # Errors
    /// Validation errors naming the missing/invalid field.
    pub fn validate(&self) -> BridgeResult<TimeRange> {
        parse_range(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

/// Plain date-range payload shared by sleep and vitals queries.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRangeRequest {
    /// Range start, ISO-8601 instant
    pub start_date: Option<String>,
    /// Range end, ISO-8601 instant
    pub end_date: Option<String>,
}

impl QueryRangeRequest {
    /// Validate the date range synchronously.
    ///
    /// # Errors
    /// Validation errors naming the missing/invalid field.
    pub fn validate(&self) -> BridgeResult<TimeRange> {
        parse_range(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

/// Availability probe response.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    /// Whether the platform health store is usable
    pub available: bool,
}

/// Per-permission grant map response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionResponse {
    /// Exactly one boolean per requested permission
    pub permissions: BTreeMap<&'static str, bool>,
}

impl PermissionResponse {
    /// Build the wire map from a resolved grant map.
    #[must_use]
    pub fn from_grants(grants: &BTreeMap<HealthPermission, bool>) -> Self {
        Self {
            permissions: grants.iter().map(|(p, &ok)| (p.name(), ok)).collect(),
        }
    }
}

/// Aggregated query response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryAggregatedResponse {
    /// Ordered bucket samples
    pub aggregated_data: Vec<AggregatedSample>,
}

/// Workout query response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryWorkoutsResponse {
    /// Ordered workouts
    pub workouts: Vec<Workout>,
}

/// Sleep query response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySleepResponse {
    /// Ordered sleep sessions
    pub sleep_sessions: Vec<SleepSession>,
}

/// Basal body temperature query response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryBasalBodyTemperatureResponse {
    /// Ordered measurements
    pub basal_body_temperature_sessions: Vec<BasalBodyTemperatureSample>,
}

/// Blood glucose query response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryBloodGlucoseResponse {
    /// Ordered measurements
    pub blood_glucose_sessions: Vec<BloodGlucoseSample>,
}

/// Oxygen saturation query response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOxygenSaturationResponse {
    /// Ordered measurements
    pub oxygen_saturation_sessions: Vec<OxygenSaturationSample>,
}

/// Heart rate query response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryHeartRateResponse {
    /// Ordered series measurements
    pub heart_rate_measurements: Vec<HeartRateMeasurement>,
}
