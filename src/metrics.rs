// ABOUTME: Metric descriptor registry mapping abstract data types to native aggregation handles
// ABOUTME: Pairs each metric with its required permission and canonical-unit extractor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit-Up Health Bridge

use crate::errors::{BridgeError, BridgeResult};
use crate::permissions::HealthPermission;
use crate::store::AggregateValue;

/// Native aggregation handle understood by the platform store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum AggregateMetric {
    /// Total step count over a window
    StepsCountTotal,
    /// Basal metabolic energy over a window
    BasalCaloriesTotal,
    /// Active energy burned over a window
    ActiveCaloriesTotal,
    /// Total energy burned over a window
    TotalCaloriesTotal,
    /// Distance covered over a window
    DistanceTotal,
}

/// Extraction function turning a native aggregate into a canonical scalar.
///
/// Canonical units: kilocalories for energy, meters for distance, raw count
/// for steps. `None` means the platform had no value for the window, which is
/// distinct from a measured zero.
pub type ValueExtractor = fn(Option<&AggregateValue>) -> Option<f64>;

/// Immutable descriptor for one supported aggregate metric.
#[derive(Debug, Clone, Copy)]
pub struct MetricDescriptor {
    /// Wire data-type name this descriptor is registered under
    pub data_type: &'static str,
    /// Permission required to read the metric
    pub permission: HealthPermission,
    /// Native aggregation handle
    pub metric: AggregateMetric,
    /// Canonical-unit extractor
    pub extractor: ValueExtractor,
}

fn extract_count(value: Option<&AggregateValue>) -> Option<f64> {
    match value {
        Some(AggregateValue::Count(n)) => Some(*n as f64),
        _ => None,
    }
}

fn extract_kilocalories(value: Option<&AggregateValue>) -> Option<f64> {
    match value {
        Some(AggregateValue::Energy { kilocalories }) => Some(*kilocalories),
        _ => None,
    }
}

fn extract_meters(value: Option<&AggregateValue>) -> Option<f64> {
    match value {
        Some(AggregateValue::Length { meters }) => Some(*meters),
        _ => None,
    }
}

impl MetricDescriptor {
    /// Resolve a wire data-type name to its descriptor.
    ///
    /// # Errors
    /// Returns [`BridgeError::UnsupportedMetric`] for names outside the
    /// registry.
    pub fn resolve(data_type: &str) -> BridgeResult<Self> {
        match data_type {
            "steps" => Ok(Self {
                data_type: "steps",
                permission: HealthPermission::ReadSteps,
                metric: AggregateMetric::StepsCountTotal,
                extractor: extract_count,
            }),
            "basal-calories" => Ok(Self {
                data_type: "basal-calories",
                permission: HealthPermission::ReadBasalMetabolicRate,
                metric: AggregateMetric::BasalCaloriesTotal,
                extractor: extract_kilocalories,
            }),
            "active-calories" => Ok(Self {
                data_type: "active-calories",
                permission: HealthPermission::ReadActiveCalories,
                metric: AggregateMetric::ActiveCaloriesTotal,
                extractor: extract_kilocalories,
            }),
            "total-calories" => Ok(Self {
                data_type: "total-calories",
                permission: HealthPermission::ReadTotalCalories,
                metric: AggregateMetric::TotalCaloriesTotal,
                extractor: extract_kilocalories,
            }),
            "distance" => Ok(Self {
                data_type: "distance",
                permission: HealthPermission::ReadDistance,
                metric: AggregateMetric::DistanceTotal,
                extractor: extract_meters,
            }),
            other => Err(BridgeError::UnsupportedMetric {
                data_type: other.to_owned(),
            }),
        }
    }

    /// Apply the extractor to a native aggregate value.
    #[must_use]
    pub fn extract(&self, value: Option<&AggregateValue>) -> Option<f64> {
        (self.extractor)(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn resolves_all_registered_metrics() {
        for name in [
            "steps",
            "basal-calories",
            "active-calories",
            "total-calories",
            "distance",
        ] {
            let descriptor = MetricDescriptor::resolve(name).unwrap();
            assert_eq!(descriptor.data_type, name);
        }
    }

    #[test]
    fn unknown_metric_is_rejected() {
        let err = MetricDescriptor::resolve("mindfulness").unwrap_err();
        assert!(matches!(err, BridgeError::UnsupportedMetric { .. }));
    }

    #[test]
    fn extractors_convert_to_canonical_units() {
        let steps = MetricDescriptor::resolve("steps").unwrap();
        assert_eq!(steps.extract(Some(&AggregateValue::Count(812))), Some(812.0));

        let calories = MetricDescriptor::resolve("total-calories").unwrap();
        assert_eq!(
            calories.extract(Some(&AggregateValue::Energy { kilocalories: 2.5 })),
            Some(2.5)
        );

        let distance = MetricDescriptor::resolve("distance").unwrap();
        assert_eq!(
            distance.extract(Some(&AggregateValue::Length { meters: 1500.0 })),
            Some(1500.0)
        );
    }

    #[test]
    fn missing_value_stays_none_not_zero() {
        let steps = MetricDescriptor::resolve("steps").unwrap();
        assert_eq!(steps.extract(None), None);
    }

    #[test]
    fn mismatched_unit_yields_none() {
        let distance = MetricDescriptor::resolve("distance").unwrap();
        assert_eq!(distance.extract(Some(&AggregateValue::Count(5))), None);
    }
}
