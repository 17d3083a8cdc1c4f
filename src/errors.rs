// ABOUTME: Unified error taxonomy for health bridge operations
// ABOUTME: Validation, unsupported-request, consent-flow, and platform failure variants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit-Up Health Bridge

use thiserror::Error;

/// Result alias used across the bridge.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Errors surfaced by bridge operations.
///
/// Permission denial is deliberately not represented here: an ungranted
/// metric degrades to empty/absent data instead of failing the call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BridgeError {
    /// A required request field is missing.
    #[error("Missing required parameter: {field}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// A date field could not be parsed as an ISO-8601 instant.
    #[error("Invalid date in '{field}': {message}")]
    InvalidDate {
        /// Name of the offending field
        field: &'static str,
        /// Parser message
        message: String,
    },

    /// The requested range has `startDate` after `endDate`.
    #[error("Invalid range: startDate must not be after endDate")]
    InvalidRange,

    /// The requested aggregate data type is not in the descriptor registry.
    #[error("Unsupported dataType: {data_type}")]
    UnsupportedMetric {
        /// Data type name from the request
        data_type: String,
    },

    /// The requested bucket period is not supported.
    #[error("Unsupported bucket: {bucket}")]
    UnsupportedBucket {
        /// Bucket name from the request
        bucket: String,
    },

    /// A consent request is already in flight.
    ///
    /// The consent UI result is correlated to exactly one caller; a second
    /// concurrent request is rejected instead of overwriting the pending slot.
    #[error("A permission request is already in progress")]
    ConsentRequestPending,

    /// The underlying platform store failed; carries the platform's message.
    #[error("Platform error: {message}")]
    Platform {
        /// Message reported by the platform store
        message: String,
    },
}

impl BridgeError {
    /// Build a platform failure from any displayable source.
    #[must_use]
    pub fn platform(source: impl std::fmt::Display) -> Self {
        Self::Platform {
            message: source.to_string(),
        }
    }

    /// True for errors detected synchronously, before any platform call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidDate { .. }
                | Self::InvalidRange
                | Self::UnsupportedMetric { .. }
                | Self::UnsupportedBucket { .. }
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn validation_classification() {
        assert!(BridgeError::MissingField { field: "startDate" }.is_validation());
        assert!(BridgeError::InvalidRange.is_validation());
        assert!(!BridgeError::platform("boom").is_validation());
        assert!(!BridgeError::ConsentRequestPending.is_validation());
    }

    #[test]
    fn messages_name_the_field() {
        let err = BridgeError::MissingField { field: "dataType" };
        assert_eq!(err.to_string(), "Missing required parameter: dataType");
    }
}
