// ABOUTME: HealthBridge facade exposing the uniform request/response operation set
// ABOUTME: Lazy store availability, consent in-flight guard, and query dispatch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit-Up Health Bridge

//! # Bridge facade
//!
//! One [`HealthBridge`] per application, shared behind `Arc`. Every operation
//! validates its request synchronously, then runs as an independent async
//! unit of work; concurrent queries share only the read-only store handle.
//! The single point of mutual exclusion is the consent in-flight guard: the
//! consent UI result is correlated to exactly one caller, so a second
//! concurrent `request_permissions` is rejected instead of overwriting the
//! pending slot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::aggregate;
use crate::config::BridgeConfig;
use crate::errors::{BridgeError, BridgeResult};
use crate::normalizer::{self, WorkoutOptions};
use crate::permissions::grant_map;
use crate::requests::{
    AvailabilityResponse, PermissionResponse, PermissionsRequest, QueryAggregatedRequest,
    QueryAggregatedResponse, QueryBasalBodyTemperatureResponse, QueryBloodGlucoseResponse,
    QueryHeartRateResponse, QueryOxygenSaturationResponse, QueryRangeRequest, QuerySleepResponse,
    QueryWorkoutsRequest, QueryWorkoutsResponse,
};
use crate::store::{ConsentUi, HealthStore};

/// Uniform async facade over a platform health store.
pub struct HealthBridge<S, C> {
    store: Arc<S>,
    consent: Arc<C>,
    config: BridgeConfig,
    /// Sticky once the platform store has been probed successfully
    available: AtomicBool,
    /// Single-slot consent guard; held for the lifetime of one consent flow
    consent_guard: Mutex<()>,
}

impl<S, C> HealthBridge<S, C>
where
    S: HealthStore,
    C: ConsentUi,
{
    /// Create a bridge with default configuration.
    #[must_use]
    pub fn new(store: Arc<S>, consent: Arc<C>) -> Self {
        Self::with_config(store, consent, BridgeConfig::default())
    }

    /// Create a bridge with explicit configuration.
    #[must_use]
    pub fn with_config(store: Arc<S>, consent: Arc<C>, config: BridgeConfig) -> Self {
        Self {
            store,
            consent,
            config,
            available: AtomicBool::new(false),
            consent_guard: Mutex::new(()),
        }
    }

    /// Probe platform store availability.
    ///
    /// The handle is initialized lazily on first success and treated as
    /// read-only afterwards; an unavailable store is re-probed on each call.
    /// Never errors: absence is reported as `available: false`.
    pub async fn is_health_available(&self) -> AvailabilityResponse {
        if !self.available.load(Ordering::SeqCst) {
            let probed = self.store.is_available().await;
            if probed {
                info!("health store available");
            }
            self.available.store(probed, Ordering::SeqCst);
        }
        AvailabilityResponse {
            available: self.available.load(Ordering::SeqCst),
        }
    }

    /// Report, per requested permission, whether its native mapping is
    /// currently granted. Unknown permission names were already dropped
    /// during validation; known-but-ungranted report `false`.
    ///
    /// # Errors
    /// Validation errors, or a platform failure from the grant query.
    pub async fn check_permissions(
        &self,
        request: &PermissionsRequest,
    ) -> BridgeResult<PermissionResponse> {
        let requested = request.validate()?;
        let granted = self.store.granted_permissions().await?;
        Ok(PermissionResponse::from_grants(&grant_map(
            &requested, &granted,
        )))
    }

    /// Drive the consent flow for a set of permissions.
    ///
    /// The consent UI is invoked exactly once per call and the response is
    /// computed from the set the user actually granted, not from the request.
    /// Only one consent flow may be in flight; a concurrent second call fails
    /// with [`BridgeError::ConsentRequestPending`].
    ///
    /// # Errors
    /// Validation errors, `ConsentRequestPending`, or a platform failure
    /// from the consent UI.
    pub async fn request_permissions(
        &self,
        request: &PermissionsRequest,
    ) -> BridgeResult<PermissionResponse> {
        let requested = request.validate()?;

        let _slot = self
            .consent_guard
            .try_lock()
            .map_err(|_| BridgeError::ConsentRequestPending)?;

        let native: std::collections::HashSet<String> = requested
            .iter()
            .map(|p| p.native_permission().to_owned())
            .collect();

        debug!(count = native.len(), "launching consent request");
        let granted = self.consent.request_consent(native).await?;

        // Guard releases here whether the consent UI resolved or failed.
        Ok(PermissionResponse::from_grants(&grant_map(
            &requested, &granted,
        )))
    }

    /// Query one metric aggregated into ordered buckets over a range.
    ///
    /// An ungranted metric yields an empty sample list, never an error.
    ///
    /// # Errors
    /// Validation errors, or a platform failure from the aggregation query.
    pub async fn query_aggregated(
        &self,
        request: &QueryAggregatedRequest,
    ) -> BridgeResult<QueryAggregatedResponse> {
        let (range, descriptor, period) = request.validate()?;
        let granted = self.store.granted_permissions().await?;
        let aggregated_data = aggregate::query_aggregated(
            self.store.as_ref(),
            &granted,
            &descriptor,
            range,
            period,
            self.config.bucket_zone,
        )
        .await?;
        Ok(QueryAggregatedResponse { aggregated_data })
    }

    /// Query normalized workouts with optional enrichment attachments.
    ///
    /// # Errors
    /// Validation errors, or a platform failure from the session read;
    /// per-workout enrichment failures degrade to absent fields.
    pub async fn query_workouts(
        &self,
        request: &QueryWorkoutsRequest,
    ) -> BridgeResult<QueryWorkoutsResponse> {
        let range = request.validate()?;
        let granted = self.store.granted_permissions().await?;
        let opts = WorkoutOptions {
            include_heart_rate: request.include_heart_rate,
            include_route: request.include_route,
            include_steps: request.include_steps,
        };
        let workouts = normalizer::query_workouts(
            self.store.as_ref(),
            &granted,
            range,
            opts,
            self.config.record_read_limit,
        )
        .await?;
        Ok(QueryWorkoutsResponse { workouts })
    }

    /// Query normalized sleep sessions with flattened stages.
    ///
    /// # Errors
    /// Validation errors, or a platform failure from the record read.
    pub async fn query_sleep(
        &self,
        request: &QueryRangeRequest,
    ) -> BridgeResult<QuerySleepResponse> {
        let range = request.validate()?;
        let sleep_sessions = normalizer::query_sleep(
            self.store.as_ref(),
            range,
            self.config.record_read_limit,
        )
        .await?;
        Ok(QuerySleepResponse { sleep_sessions })
    }

    /// Query basal body temperature measurements.
    ///
    /// # Errors
    /// Validation errors, or a platform failure from the record read.
    pub async fn query_basal_body_temperature(
        &self,
        request: &QueryRangeRequest,
    ) -> BridgeResult<QueryBasalBodyTemperatureResponse> {
        let range = request.validate()?;
        let basal_body_temperature_sessions = normalizer::query_basal_body_temperature(
            self.store.as_ref(),
            range,
            self.config.record_read_limit,
        )
        .await?;
        Ok(QueryBasalBodyTemperatureResponse {
            basal_body_temperature_sessions,
        })
    }

    /// Query blood glucose measurements with categorical labels resolved.
    ///
    /// # Errors
    /// Validation errors, or a platform failure from the record read.
    pub async fn query_blood_glucose(
        &self,
        request: &QueryRangeRequest,
    ) -> BridgeResult<QueryBloodGlucoseResponse> {
        let range = request.validate()?;
        let blood_glucose_sessions = normalizer::query_blood_glucose(
            self.store.as_ref(),
            range,
            self.config.record_read_limit,
        )
        .await?;
        Ok(QueryBloodGlucoseResponse {
            blood_glucose_sessions,
        })
    }

    /// Query oxygen saturation measurements.
    ///
    /// # Errors
    /// Validation errors, or a platform failure from the record read.
    pub async fn query_oxygen_saturation(
        &self,
        request: &QueryRangeRequest,
    ) -> BridgeResult<QueryOxygenSaturationResponse> {
        let range = request.validate()?;
        let oxygen_saturation_sessions = normalizer::query_oxygen_saturation(
            self.store.as_ref(),
            range,
            self.config.record_read_limit,
        )
        .await?;
        Ok(QueryOxygenSaturationResponse {
            oxygen_saturation_sessions,
        })
    }

    /// Query heart rate series measurements.
    ///
    /// # Errors
    /// Validation errors, or a platform failure from the record read.
    pub async fn query_heart_rate(
        &self,
        request: &QueryRangeRequest,
    ) -> BridgeResult<QueryHeartRateResponse> {
        let range = request.validate()?;
        let heart_rate_measurements = normalizer::query_heart_rate(
            self.store.as_ref(),
            range,
            self.config.record_read_limit,
        )
        .await?;
        Ok(QueryHeartRateResponse {
            heart_rate_measurements,
        })
    }
}
