// ABOUTME: Environment-driven bridge configuration
// ABOUTME: Bucket boundary time zone selection and record read cap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit-Up Health Bridge

use std::env;

use crate::store::RECORD_READ_LIMIT;

/// Environment variable selecting the bucket boundary zone (`utc` or `local`).
pub const ENV_BUCKET_ZONE: &str = "HEALTH_BRIDGE_BUCKET_ZONE";

/// Time zone used to compute aggregation bucket boundaries.
///
/// The original device implementation slices buckets in the host's local
/// wall-clock zone, which is not reproducible across devices or DST
/// transitions. UTC is the default here; `Local` is retained for
/// wire-compatibility with the device behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BucketZone {
    /// Bucket boundaries stepped in UTC
    #[default]
    Utc,
    /// Bucket boundaries stepped in the host's local zone
    Local,
}

impl BucketZone {
    fn from_env_value(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "local" => Self::Local,
            _ => Self::Utc,
        }
    }
}

/// Bridge configuration, loaded from the environment with defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Zone for bucket boundary computation
    pub bucket_zone: BucketZone,
    /// Per-read record cap; the platform maximum, never raised
    pub record_read_limit: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bucket_zone: BucketZone::default(),
            record_read_limit: RECORD_READ_LIMIT,
        }
    }
}

impl BridgeConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for unset or unrecognized values.
    #[must_use]
    pub fn from_env() -> Self {
        let bucket_zone = env::var(ENV_BUCKET_ZONE)
            .map(|v| BucketZone::from_env_value(&v))
            .unwrap_or_default();
        Self {
            bucket_zone,
            record_read_limit: RECORD_READ_LIMIT,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_utc_and_platform_cap() {
        let config = BridgeConfig::default();
        assert_eq!(config.bucket_zone, BucketZone::Utc);
        assert_eq!(config.record_read_limit, 1000);
    }

    #[test]
    fn zone_parsing_is_case_insensitive_with_utc_fallback() {
        assert_eq!(BucketZone::from_env_value("LOCAL"), BucketZone::Local);
        assert_eq!(BucketZone::from_env_value("utc"), BucketZone::Utc);
        assert_eq!(BucketZone::from_env_value("garbage"), BucketZone::Utc);
    }
}
