// ABOUTME: Abstract health permission identifiers and the catalog mapping them to native strings
// ABOUTME: Grant-map computation with canonical-suffix normalization owned by the catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit-Up Health Bridge

use std::collections::{BTreeMap, HashSet};

/// Abstract read permission understood by the bridge.
///
/// Every variant maps 1:1 to a native platform permission string via
/// [`HealthPermission::native_permission`]. The bridge models read-only
/// access exclusively; there are no write variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)] // Variant names are the wire identifiers themselves
#[non_exhaustive]
pub enum HealthPermission {
    ReadSteps,
    ReadWorkouts,
    ReadHeartRate,
    ReadRoute,
    ReadActivityIntensity,
    ReadActiveCalories,
    ReadTotalCalories,
    ReadDistance,
    ReadBloodGlucose,
    ReadBloodPressure,
    ReadBodyFat,
    ReadBodyTemperature,
    ReadBodyWaterMass,
    ReadBodyBoneMass,
    ReadBasalBodyTemperature,
    ReadBasalMetabolicRate,
    ReadCervicalMucus,
    ReadElevationGained,
    ReadFloorsClimbed,
    ReadHeartRateVariability,
    ReadHeight,
    ReadHydration,
    ReadIntermenstrualBleeding,
    ReadLeanBodyMass,
    ReadMenstruation,
    ReadMindfulness,
    ReadNutrition,
    ReadOvulationTest,
    ReadOxygenSaturation,
    ReadPlannedExercise,
    ReadPower,
    ReadRespiratoryRate,
    ReadRestingHeartRate,
    ReadSleep,
    ReadSpeed,
    ReadStepsCadence,
    ReadVo2Max,
    ReadWeight,
    ReadWheelchairPushes,
}

impl HealthPermission {
    /// All known permissions, in wire order.
    pub const ALL: [Self; 39] = [
        Self::ReadSteps,
        Self::ReadWorkouts,
        Self::ReadHeartRate,
        Self::ReadRoute,
        Self::ReadActivityIntensity,
        Self::ReadActiveCalories,
        Self::ReadTotalCalories,
        Self::ReadDistance,
        Self::ReadBloodGlucose,
        Self::ReadBloodPressure,
        Self::ReadBodyFat,
        Self::ReadBodyTemperature,
        Self::ReadBodyWaterMass,
        Self::ReadBodyBoneMass,
        Self::ReadBasalBodyTemperature,
        Self::ReadBasalMetabolicRate,
        Self::ReadCervicalMucus,
        Self::ReadElevationGained,
        Self::ReadFloorsClimbed,
        Self::ReadHeartRateVariability,
        Self::ReadHeight,
        Self::ReadHydration,
        Self::ReadIntermenstrualBleeding,
        Self::ReadLeanBodyMass,
        Self::ReadMenstruation,
        Self::ReadMindfulness,
        Self::ReadNutrition,
        Self::ReadOvulationTest,
        Self::ReadOxygenSaturation,
        Self::ReadPlannedExercise,
        Self::ReadPower,
        Self::ReadRespiratoryRate,
        Self::ReadRestingHeartRate,
        Self::ReadSleep,
        Self::ReadSpeed,
        Self::ReadStepsCadence,
        Self::ReadVo2Max,
        Self::ReadWeight,
        Self::ReadWheelchairPushes,
    ];

    /// Wire identifier of this permission (e.g. `READ_STEPS`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReadSteps => "READ_STEPS",
            Self::ReadWorkouts => "READ_WORKOUTS",
            Self::ReadHeartRate => "READ_HEART_RATE",
            Self::ReadRoute => "READ_ROUTE",
            Self::ReadActivityIntensity => "READ_ACTIVITY_INTENSITY",
            Self::ReadActiveCalories => "READ_ACTIVE_CALORIES",
            Self::ReadTotalCalories => "READ_TOTAL_CALORIES",
            Self::ReadDistance => "READ_DISTANCE",
            Self::ReadBloodGlucose => "READ_BLOOD_GLUCOSE",
            Self::ReadBloodPressure => "READ_BLOOD_PRESSURE",
            Self::ReadBodyFat => "READ_BODY_FAT",
            Self::ReadBodyTemperature => "READ_BODY_TEMPERATURE",
            Self::ReadBodyWaterMass => "READ_BODY_WATER_MASS",
            Self::ReadBodyBoneMass => "READ_BODY_BONE_MASS",
            Self::ReadBasalBodyTemperature => "READ_BASAL_BODY_TEMPERATURE",
            Self::ReadBasalMetabolicRate => "READ_BASAL_METABOLIC_RATE",
            Self::ReadCervicalMucus => "READ_CERVICAL_MUCUS",
            Self::ReadElevationGained => "READ_ELEVATION_GAINED",
            Self::ReadFloorsClimbed => "READ_FLOORS_CLIMBED",
            Self::ReadHeartRateVariability => "READ_HEART_RATE_VARIABILITY",
            Self::ReadHeight => "READ_HEIGHT",
            Self::ReadHydration => "READ_HYDRATION",
            Self::ReadIntermenstrualBleeding => "READ_INTERMENSTRUAL_BLEEDING",
            Self::ReadLeanBodyMass => "READ_LEAN_BODY_MASS",
            Self::ReadMenstruation => "READ_MENSTRUATION",
            Self::ReadMindfulness => "READ_MINDFULNESS",
            Self::ReadNutrition => "READ_NUTRITION",
            Self::ReadOvulationTest => "READ_OVULATION_TEST",
            Self::ReadOxygenSaturation => "READ_OXYGEN_SATURATION",
            Self::ReadPlannedExercise => "READ_PLANNED_EXERCISE",
            Self::ReadPower => "READ_POWER",
            Self::ReadRespiratoryRate => "READ_RESPIRATORY_RATE",
            Self::ReadRestingHeartRate => "READ_RESTING_HEART_RATE",
            Self::ReadSleep => "READ_SLEEP",
            Self::ReadSpeed => "READ_SPEED",
            Self::ReadStepsCadence => "READ_STEPS_CADENCE",
            Self::ReadVo2Max => "READ_VO2_MAX",
            Self::ReadWeight => "READ_WEIGHT",
            Self::ReadWheelchairPushes => "READ_WHEELCHAIR_PUSHES",
        }
    }

    /// Parse a wire identifier. Unknown names yield `None`; requests drop
    /// them silently rather than rejecting the call.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Native platform permission string this permission maps to.
    ///
    /// A handful of identifiers differ from a mechanical `READ_*` translation
    /// (exercise, exercise route, calorie burn variants, bone mass).
    #[must_use]
    pub const fn native_permission(self) -> &'static str {
        match self {
            Self::ReadSteps => "android.permission.health.READ_STEPS",
            Self::ReadWorkouts => "android.permission.health.READ_EXERCISE",
            Self::ReadHeartRate => "android.permission.health.READ_HEART_RATE",
            Self::ReadRoute => "android.permission.health.READ_EXERCISE_ROUTE",
            Self::ReadActivityIntensity => "android.permission.health.READ_ACTIVITY_INTENSITY",
            Self::ReadActiveCalories => "android.permission.health.READ_ACTIVE_CALORIES_BURNED",
            Self::ReadTotalCalories => "android.permission.health.READ_TOTAL_CALORIES_BURNED",
            Self::ReadDistance => "android.permission.health.READ_DISTANCE",
            Self::ReadBloodGlucose => "android.permission.health.READ_BLOOD_GLUCOSE",
            Self::ReadBloodPressure => "android.permission.health.READ_BLOOD_PRESSURE",
            Self::ReadBodyFat => "android.permission.health.READ_BODY_FAT",
            Self::ReadBodyTemperature => "android.permission.health.READ_BODY_TEMPERATURE",
            Self::ReadBodyWaterMass => "android.permission.health.READ_BODY_WATER_MASS",
            Self::ReadBodyBoneMass => "android.permission.health.READ_BONE_MASS",
            Self::ReadBasalBodyTemperature => {
                "android.permission.health.READ_BASAL_BODY_TEMPERATURE"
            }
            Self::ReadBasalMetabolicRate => "android.permission.health.READ_BASAL_METABOLIC_RATE",
            Self::ReadCervicalMucus => "android.permission.health.READ_CERVICAL_MUCUS",
            Self::ReadElevationGained => "android.permission.health.READ_ELEVATION_GAINED",
            Self::ReadFloorsClimbed => "android.permission.health.READ_FLOORS_CLIMBED",
            Self::ReadHeartRateVariability => {
                "android.permission.health.READ_HEART_RATE_VARIABILITY"
            }
            Self::ReadHeight => "android.permission.health.READ_HEIGHT",
            Self::ReadHydration => "android.permission.health.READ_HYDRATION",
            Self::ReadIntermenstrualBleeding => {
                "android.permission.health.READ_INTERMENSTRUAL_BLEEDING"
            }
            Self::ReadLeanBodyMass => "android.permission.health.READ_LEAN_BODY_MASS",
            Self::ReadMenstruation => "android.permission.health.READ_MENSTRUATION",
            Self::ReadMindfulness => "android.permission.health.READ_MINDFULNESS",
            Self::ReadNutrition => "android.permission.health.READ_NUTRITION",
            Self::ReadOvulationTest => "android.permission.health.READ_OVULATION_TEST",
            Self::ReadOxygenSaturation => "android.permission.health.READ_OXYGEN_SATURATION",
            Self::ReadPlannedExercise => "android.permission.health.READ_PLANNED_EXERCISE",
            Self::ReadPower => "android.permission.health.READ_POWER",
            Self::ReadRespiratoryRate => "android.permission.health.READ_RESPIRATORY_RATE",
            Self::ReadRestingHeartRate => "android.permission.health.READ_RESTING_HEART_RATE",
            Self::ReadSleep => "android.permission.health.READ_SLEEP",
            Self::ReadSpeed => "android.permission.health.READ_SPEED",
            Self::ReadStepsCadence => "android.permission.health.READ_STEPS_CADENCE",
            Self::ReadVo2Max => "android.permission.health.READ_VO2_MAX",
            Self::ReadWeight => "android.permission.health.READ_WEIGHT",
            Self::ReadWheelchairPushes => "android.permission.health.READ_WHEELCHAIR_PUSHES",
        }
    }

    /// Canonical identifier used for grant comparison: the native permission
    /// with its dotted namespace prefix removed.
    #[must_use]
    pub fn canonical_suffix(self) -> &'static str {
        strip_namespace(self.native_permission())
    }
}

/// Strip the dotted namespace prefix from a native permission string.
///
/// Grant sets reported by the platform may carry the full namespace; the
/// comparison is an exact match on the final segment, normalized in exactly
/// one place.
#[must_use]
pub fn strip_namespace(native: &str) -> &str {
    native.rsplit('.').next().unwrap_or(native)
}

/// Parse requested wire permission names, silently dropping unknown strings.
#[must_use]
pub fn parse_requested(names: &[String]) -> Vec<HealthPermission> {
    let mut seen = Vec::new();
    for name in names {
        if let Some(p) = HealthPermission::from_name(name) {
            if !seen.contains(&p) {
                seen.push(p);
            }
        }
    }
    seen
}

/// Compute the per-permission grant map for a requested set.
///
/// Exactly one boolean is reported per requested permission. The granted set
/// is normalized to canonical suffixes before comparison, so both prefixed
/// and bare native identifiers match.
#[must_use]
pub fn grant_map(
    requested: &[HealthPermission],
    granted_native: &HashSet<String>,
) -> BTreeMap<HealthPermission, bool> {
    let granted_suffixes: HashSet<&str> = granted_native
        .iter()
        .map(|s| strip_namespace(s))
        .collect();

    requested
        .iter()
        .map(|&p| (p, granted_suffixes.contains(p.canonical_suffix())))
        .collect()
}

/// Whether a granted native set covers one permission.
#[must_use]
pub fn has_permission(granted_native: &HashSet<String>, permission: HealthPermission) -> bool {
    granted_native
        .iter()
        .any(|s| strip_namespace(s) == permission.canonical_suffix())
}
