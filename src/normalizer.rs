// ABOUTME: Record normalizer mapping raw native records into the stable output schema
// ABOUTME: Workout enrichment, sleep stage flattening, and vitals projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit-Up Health Bridge

//! # Record normalization
//!
//! Each category follows the same single-pass shape: read raw records in a
//! range (ascending, capped at the platform read limit), project each record
//! into its stable output model, translate categorical codes through the
//! label tables. Workouts additionally receive per-record enrichment through
//! the aggregation engine scoped to the workout's own time window; an
//! enrichment failure degrades to an absent field and never aborts the batch.

use std::collections::HashSet;

use tracing::warn;

use crate::aggregate::query_single;
use crate::errors::BridgeResult;
use crate::labels::{
    exercise_type_label, meal_type_label, relation_to_meal_label, sleep_stage_label,
    specimen_source_label,
};
use crate::metrics::MetricDescriptor;
use crate::models::{
    BasalBodyTemperatureSample, BloodGlucoseSample, HeartRateMeasurement, HeartRateSample,
    OxygenSaturationSample, RouteSample, SleepSession, SleepStage, Workout,
};
use crate::permissions::{has_permission, HealthPermission};
use crate::store::{HealthStore, RawSleepSession, RawWorkout, TimeRange};

/// Optional attachments for a workout query.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkoutOptions {
    /// Attach heart rate samples within each workout window
    pub include_heart_rate: bool,
    /// Attach recorded route points
    pub include_route: bool,
    /// Attach step-count enrichment
    pub include_steps: bool,
}

/// Active duration in seconds: sum of segment spans when segments exist,
/// otherwise the session span.
///
/// Sessions assembled from disjoint active segments carry paused gaps that
/// must not count toward duration.
fn active_duration_seconds(raw: &RawWorkout) -> u64 {
    if raw.segments.is_empty() {
        (raw.end - raw.start).num_seconds().max(0) as u64
    } else {
        raw.segments
            .iter()
            .map(|s| (s.end - s.start).num_seconds().max(0) as u64)
            .sum()
    }
}

/// Scoped enrichment for one metric over the workout's own window.
///
/// Permission gating and missing data both yield `None`; a platform failure
/// is logged and also degrades to `None`.
async fn enrich_metric<S: HealthStore + ?Sized>(
    store: &S,
    granted: &HashSet<String>,
    data_type: &'static str,
    window: TimeRange,
    workout_id: &str,
) -> Option<f64> {
    let descriptor = MetricDescriptor::resolve(data_type).ok()?;
    match query_single(store, granted, &descriptor, window).await {
        Ok(value) => value,
        Err(e) => {
            warn!(workout_id, data_type, error = %e, "workout enrichment failed");
            None
        }
    }
}

async fn heart_rate_for_window<S: HealthStore + ?Sized>(
    store: &S,
    window: TimeRange,
    limit: usize,
    workout_id: &str,
) -> Option<Vec<HeartRateSample>> {
    match store.read_heart_rate(window, limit).await {
        Ok(records) => Some(
            records
                .iter()
                .flat_map(|r| r.samples.iter())
                .filter(|s| window.contains(s.time))
                .map(|s| HeartRateSample {
                    timestamp: s.time,
                    bpm: s.bpm,
                })
                .collect(),
        ),
        Err(e) => {
            warn!(workout_id, error = %e, "heart rate attachment failed");
            None
        }
    }
}

/// Normalize one raw workout, running its scoped enrichment queries.
async fn normalize_workout<S: HealthStore + ?Sized>(
    store: &S,
    granted: &HashSet<String>,
    raw: RawWorkout,
    opts: WorkoutOptions,
    limit: usize,
) -> Workout {
    let window = TimeRange {
        start: raw.start,
        end: raw.end,
    };

    let steps = if opts.include_steps {
        enrich_metric(store, granted, "steps", window, &raw.id).await
    } else {
        None
    };

    // total-calories wins; active-calories only fills the gap
    let mut calories = enrich_metric(store, granted, "total-calories", window, &raw.id).await;
    if calories.is_none() {
        calories = enrich_metric(store, granted, "active-calories", window, &raw.id).await;
    }

    let distance = enrich_metric(store, granted, "distance", window, &raw.id).await;

    let heart_rate = if opts.include_heart_rate
        && has_permission(granted, HealthPermission::ReadHeartRate)
    {
        heart_rate_for_window(store, window, limit, &raw.id).await
    } else {
        None
    };

    let route = if opts.include_route {
        raw.route.as_ref().map(|points| {
            points
                .iter()
                .map(|p| RouteSample {
                    timestamp: p.time,
                    lat: p.latitude,
                    lng: p.longitude,
                    alt: p.altitude,
                })
                .collect()
        })
    } else {
        None
    };

    Workout {
        duration: active_duration_seconds(&raw),
        workout_type: exercise_type_label(raw.exercise_type),
        id: raw.id,
        source_name: raw.source_name,
        source_bundle_id: raw.source_bundle_id,
        start_date: raw.start,
        end_date: raw.end,
        title: raw.title,
        distance,
        steps,
        calories,
        route,
        heart_rate,
    }
}

/// Query and normalize workouts intersecting a range.
///
/// # Errors
/// Propagates a platform failure from the session read; per-workout
/// enrichment failures degrade to absent fields instead.
pub async fn query_workouts<S: HealthStore + ?Sized>(
    store: &S,
    granted: &HashSet<String>,
    range: TimeRange,
    opts: WorkoutOptions,
    limit: usize,
) -> BridgeResult<Vec<Workout>> {
    let raw = store.read_workouts(range, limit).await?;
    let mut workouts = Vec::with_capacity(raw.len());
    for record in raw {
        workouts.push(normalize_workout(store, granted, record, opts, limit).await);
    }
    Ok(workouts)
}

/// Project one raw sleep session, flattening its stage intervals.
fn map_sleep_session(raw: RawSleepSession) -> SleepSession {
    SleepSession {
        id: raw.id,
        start_date: raw.start,
        end_date: raw.end,
        stages: raw
            .stages
            .iter()
            .map(|s| SleepStage {
                start_date: s.start,
                end_date: s.end,
                stage: sleep_stage_label(s.stage),
            })
            .collect(),
    }
}

/// Query and normalize sleep sessions in a range.
///
/// # Errors
/// Propagates platform failures from the record read.
pub async fn query_sleep<S: HealthStore + ?Sized>(
    store: &S,
    range: TimeRange,
    limit: usize,
) -> BridgeResult<Vec<SleepSession>> {
    let raw = store.read_sleep_sessions(range, limit).await?;
    Ok(raw.into_iter().map(map_sleep_session).collect())
}

/// Query and normalize basal body temperature measurements in a range.
///
/// # Errors
/// Propagates platform failures from the record read.
pub async fn query_basal_body_temperature<S: HealthStore + ?Sized>(
    store: &S,
    range: TimeRange,
    limit: usize,
) -> BridgeResult<Vec<BasalBodyTemperatureSample>> {
    let raw = store.read_basal_body_temperature(range, limit).await?;
    Ok(raw
        .into_iter()
        .map(|r| BasalBodyTemperatureSample {
            id: r.id,
            sample_date: r.time,
            temperature_celsius: r.temperature_celsius,
        })
        .collect())
}

/// Query and normalize blood glucose measurements in a range.
///
/// # Errors
/// Propagates platform failures from the record read.
pub async fn query_blood_glucose<S: HealthStore + ?Sized>(
    store: &S,
    range: TimeRange,
    limit: usize,
) -> BridgeResult<Vec<BloodGlucoseSample>> {
    let raw = store.read_blood_glucose(range, limit).await?;
    Ok(raw
        .into_iter()
        .map(|r| BloodGlucoseSample {
            id: r.id,
            sample_date: r.time,
            level: r.level_mg_per_dl,
            specimen_source: specimen_source_label(r.specimen_source),
            meal_type: meal_type_label(r.meal_type),
            relation_to_meal: relation_to_meal_label(r.relation_to_meal),
        })
        .collect())
}

/// Query and normalize oxygen saturation measurements in a range.
///
/// # Errors
/// Propagates platform failures from the record read.
pub async fn query_oxygen_saturation<S: HealthStore + ?Sized>(
    store: &S,
    range: TimeRange,
    limit: usize,
) -> BridgeResult<Vec<OxygenSaturationSample>> {
    let raw = store.read_oxygen_saturation(range, limit).await?;
    Ok(raw
        .into_iter()
        .map(|r| OxygenSaturationSample {
            id: r.id,
            sample_date: r.time,
            percentage: r.percentage,
        })
        .collect())
}

/// Query and normalize heart rate series in a range.
///
/// # Errors
/// Propagates platform failures from the record read.
pub async fn query_heart_rate<S: HealthStore + ?Sized>(
    store: &S,
    range: TimeRange,
    limit: usize,
) -> BridgeResult<Vec<HeartRateMeasurement>> {
    let raw = store.read_heart_rate(range, limit).await?;
    Ok(raw
        .into_iter()
        .map(|r| HeartRateMeasurement {
            id: r.id,
            start_date: r.start,
            end_date: r.end,
            samples: r
                .samples
                .iter()
                .map(|s| HeartRateSample {
                    timestamp: s.time,
                    bpm: s.bpm,
                })
                .collect(),
        })
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::store::{RawSegment, RawSleepStage};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, h, m, 0).unwrap()
    }

    fn raw_workout(segments: Vec<RawSegment>) -> RawWorkout {
        RawWorkout {
            id: "w1".to_owned(),
            source_name: "Watch".to_owned(),
            source_bundle_id: "com.example".to_owned(),
            start: at(10, 0),
            end: at(11, 0),
            exercise_type: 56,
            title: None,
            segments,
            route: None,
        }
    }

    #[test]
    fn duration_without_segments_is_session_span() {
        assert_eq!(active_duration_seconds(&raw_workout(vec![])), 3600);
    }

    #[test]
    fn duration_with_segments_skips_paused_gaps() {
        let raw = raw_workout(vec![
            RawSegment {
                start: at(10, 0),
                end: at(10, 30),
            },
            RawSegment {
                start: at(10, 45),
                end: at(11, 0),
            },
        ]);
        assert_eq!(active_duration_seconds(&raw), 2700);
    }

    #[test]
    fn sleep_stages_flatten_with_labels() {
        let raw = RawSleepSession {
            id: "s1".to_owned(),
            start: at(0, 0),
            end: at(7, 0),
            stages: vec![
                RawSleepStage {
                    start: at(0, 0),
                    end: at(1, 0),
                    stage: 4,
                },
                RawSleepStage {
                    start: at(1, 0),
                    end: at(3, 0),
                    stage: 5,
                },
            ],
        };
        let session = map_sleep_session(raw);
        assert_eq!(session.stages.len(), 2);
        assert_eq!(session.stages[0].stage, "LIGHT");
        assert_eq!(session.stages[1].stage, "DEEP");
    }
}
