// ABOUTME: Aggregation engine: bucket partitioning and permission-gated grouped queries
// ABOUTME: Maps native grouped aggregates through metric extractors into ordered samples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit-Up Health Bridge

use std::collections::HashSet;

use chrono::{DateTime, Days, Local, Utc};
use tracing::debug;

use crate::config::BucketZone;
use crate::errors::{BridgeError, BridgeResult};
use crate::metrics::MetricDescriptor;
use crate::models::AggregatedSample;
use crate::permissions::has_permission;
use crate::store::{HealthStore, TimeRange};

/// Supported bucket granularities.
///
/// Adding a granularity means adding a variant and its stepping rule; the
/// engine contract does not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum BucketPeriod {
    /// One calendar day per bucket
    Day,
}

impl BucketPeriod {
    /// Parse a wire bucket name.
    ///
    /// # Errors
    /// Returns [`BridgeError::UnsupportedBucket`] for names outside the
    /// supported set.
    pub fn parse(bucket: &str) -> BridgeResult<Self> {
        match bucket {
            "day" => Ok(Self::Day),
            other => Err(BridgeError::UnsupportedBucket {
                bucket: other.to_owned(),
            }),
        }
    }

    /// Advance an instant by one bucket in the given zone.
    ///
    /// Local stepping follows wall-clock calendar days, so buckets spanning
    /// a DST transition are 23 or 25 hours long.
    fn step(self, from: DateTime<Utc>, zone: BucketZone) -> Option<DateTime<Utc>> {
        match self {
            Self::Day => match zone {
                BucketZone::Utc => from.checked_add_days(Days::new(1)),
                BucketZone::Local => from
                    .with_timezone(&Local)
                    .checked_add_days(Days::new(1))
                    .map(|stepped| stepped.with_timezone(&Utc)),
            },
        }
    }
}

/// Partition a range into consecutive bucket windows.
///
/// Windows start at `range.start` and step by the period; the final window is
/// clamped to `range.end`, so no window extends outside the range.
#[must_use]
pub fn bucket_windows(range: TimeRange, period: BucketPeriod, zone: BucketZone) -> Vec<TimeRange> {
    let mut windows = Vec::new();
    let mut cursor = range.start;
    while cursor < range.end {
        let Some(next) = period.step(cursor, zone) else {
            break;
        };
        let end = next.min(range.end);
        windows.push(TimeRange { start: cursor, end });
        cursor = next;
    }
    windows
}

/// Query one metric aggregated over bucketed sub-windows of a range.
///
/// When the metric's required permission is not granted the result is an
/// empty sequence, never an error: composite queries (workout enrichment)
/// probe multiple metrics and must not fail the whole request. Output order
/// equals chronological bucket order; buckets the platform omitted are not
/// synthesized.
///
/// # Errors
/// Propagates platform failures from the grouped aggregation call.
pub async fn query_aggregated<S: HealthStore + ?Sized>(
    store: &S,
    granted_native: &HashSet<String>,
    descriptor: &MetricDescriptor,
    range: TimeRange,
    period: BucketPeriod,
    zone: BucketZone,
) -> BridgeResult<Vec<AggregatedSample>> {
    if !has_permission(granted_native, descriptor.permission) {
        debug!(
            data_type = descriptor.data_type,
            "aggregate skipped: permission not granted"
        );
        return Ok(Vec::new());
    }

    let windows = bucket_windows(range, period, zone);
    let grouped = store.aggregate_grouped(descriptor.metric, &windows).await?;

    Ok(grouped
        .iter()
        .map(|bucket| AggregatedSample {
            start_date: bucket.start,
            end_date: bucket.end,
            value: descriptor.extract(bucket.value.as_ref()),
        })
        .collect())
}

/// Single-window aggregate for one metric, used for workout enrichment.
///
/// Same permission gating as [`query_aggregated`]: ungranted yields `None`.
///
/// # Errors
/// Propagates platform failures from the aggregation call.
pub async fn query_single<S: HealthStore + ?Sized>(
    store: &S,
    granted_native: &HashSet<String>,
    descriptor: &MetricDescriptor,
    range: TimeRange,
) -> BridgeResult<Option<f64>> {
    if !has_permission(granted_native, descriptor.permission) {
        return Ok(None);
    }
    let value = store.aggregate(descriptor.metric, range).await?;
    Ok(descriptor.extract(value.as_ref()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn windows_step_daily_and_clamp_the_tail() {
        let range = TimeRange::new(at(1, 6), at(3, 12)).unwrap();
        let windows = bucket_windows(range, BucketPeriod::Day, BucketZone::Utc);
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].start, at(1, 6));
        assert_eq!(windows[0].end, at(2, 6));
        assert_eq!(windows[1].end, at(3, 6));
        assert_eq!(windows[2].end, at(3, 12));
    }

    #[test]
    fn empty_range_yields_no_windows() {
        let range = TimeRange::new(at(1, 6), at(1, 6)).unwrap();
        assert!(bucket_windows(range, BucketPeriod::Day, BucketZone::Utc).is_empty());
    }

    #[test]
    fn windows_stay_inside_the_range() {
        let range = TimeRange::new(at(1, 0), at(2, 1)).unwrap();
        for window in bucket_windows(range, BucketPeriod::Day, BucketZone::Utc) {
            assert!(window.start >= range.start);
            assert!(window.end <= range.end);
            assert!(window.start < window.end);
        }
    }

    #[test]
    fn local_zone_windows_chain_and_stay_clamped() {
        let range = TimeRange::new(at(1, 6), at(4, 6)).unwrap();
        let windows = bucket_windows(range, BucketPeriod::Day, BucketZone::Local);

        assert!(!windows.is_empty());
        assert_eq!(windows[0].start, range.start);
        assert_eq!(windows.last().unwrap().end, range.end);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        // Wall-clock days run 23 to 25 hours across DST transitions; only
        // the clamped tail may be shorter.
        for window in &windows[..windows.len() - 1] {
            let hours = (window.end - window.start).num_hours();
            assert!((23..=25).contains(&hours));
        }
    }

    #[test]
    fn unsupported_bucket_name_is_rejected() {
        assert!(matches!(
            BucketPeriod::parse("week"),
            Err(BridgeError::UnsupportedBucket { .. })
        ));
        assert!(BucketPeriod::parse("day").is_ok());
    }
}
