// ABOUTME: Static native-code to label translation tables
// ABOUTME: Exercise type, sleep stage, specimen source, meal type, relation-to-meal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit-Up Health Bridge

//! # Enum-code label tables
//!
//! The platform encodes categorical fields as integers. Each table here
//! resolves a code to its stable wire label and returns a sentinel
//! (`OTHER`/`UNKNOWN`) for codes it does not recognize; lookups never fail.

/// Exercise type label for a native exercise-session code.
///
/// Codes follow the platform's exercise-type table; unrecognized codes map
/// to `OTHER`.
#[must_use]
pub const fn exercise_type_label(code: i32) -> &'static str {
    match code {
        2 => "BADMINTON",
        4 => "BASEBALL",
        5 => "BASKETBALL",
        8 => "BIKING",
        9 => "BIKING_STATIONARY",
        10 => "BOOT_CAMP",
        11 => "BOXING",
        13 => "CALISTHENICS",
        14 => "CRICKET",
        16 => "DANCING",
        25 => "ELLIPTICAL",
        26 => "EXERCISE_CLASS",
        27 => "FENCING",
        28 => "FOOTBALL_AMERICAN",
        29 => "FOOTBALL_AUSTRALIAN",
        31 => "FRISBEE_DISC",
        32 => "GOLF",
        33 => "GUIDED_BREATHING",
        34 => "GYMNASTICS",
        35 => "HANDBALL",
        36 => "HIGH_INTENSITY_INTERVAL_TRAINING",
        37 => "HIKING",
        38 => "ICE_HOCKEY",
        39 => "ICE_SKATING",
        44 => "MARTIAL_ARTS",
        46 => "PADDLING",
        47 => "PARAGLIDING",
        48 => "PILATES",
        50 => "RACQUETBALL",
        51 => "ROCK_CLIMBING",
        52 => "ROLLER_HOCKEY",
        53 => "ROWING",
        54 => "ROWING_MACHINE",
        55 => "RUGBY",
        56 => "RUNNING",
        57 => "RUNNING_TREADMILL",
        58 => "SAILING",
        59 => "SCUBA_DIVING",
        60 => "SKATING",
        61 => "SKIING",
        62 => "SNOWBOARDING",
        63 => "SNOWSHOEING",
        64 => "SOCCER",
        65 => "SOFTBALL",
        66 => "SQUASH",
        68 => "STAIR_CLIMBING",
        69 => "STAIR_CLIMBING_MACHINE",
        70 => "STRENGTH_TRAINING",
        71 => "STRETCHING",
        72 => "SURFING",
        73 => "SWIMMING_OPEN_WATER",
        74 => "SWIMMING_POOL",
        75 => "TABLE_TENNIS",
        76 => "TENNIS",
        78 => "VOLLEYBALL",
        79 => "WALKING",
        80 => "WATER_POLO",
        81 => "WEIGHTLIFTING",
        82 => "WHEELCHAIR",
        83 => "YOGA",
        _ => "OTHER",
    }
}

/// Sleep stage label for a native stage code.
#[must_use]
pub const fn sleep_stage_label(code: i32) -> &'static str {
    match code {
        1 => "AWAKE",
        2 => "SLEEPING",
        3 => "OUT_OF_BED",
        4 => "LIGHT",
        5 => "DEEP",
        6 => "REM",
        7 => "AWAKE_IN_BED",
        _ => "UNKNOWN",
    }
}

/// Blood glucose specimen source label for a native code.
#[must_use]
pub const fn specimen_source_label(code: i32) -> &'static str {
    match code {
        1 => "INTERSTITIAL_FLUID",
        2 => "CAPILLARY_BLOOD",
        3 => "PLASMA",
        4 => "SERUM",
        5 => "TEARS",
        6 => "WHOLE_BLOOD",
        _ => "UNKNOWN",
    }
}

/// Meal type label for a native code.
#[must_use]
pub const fn meal_type_label(code: i32) -> &'static str {
    match code {
        1 => "BREAKFAST",
        2 => "LUNCH",
        3 => "DINNER",
        4 => "SNACK",
        _ => "UNKNOWN",
    }
}

/// Relation-to-meal label for a native code.
#[must_use]
pub const fn relation_to_meal_label(code: i32) -> &'static str {
    match code {
        1 => "GENERAL",
        2 => "FASTING",
        3 => "BEFORE_MEAL",
        4 => "AFTER_MEAL",
        _ => "UNKNOWN",
    }
}
