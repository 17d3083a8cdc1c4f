// ABOUTME: Main library entry point for the health data bridge
// ABOUTME: Provides permission mapping, record normalization, and bucketed aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit-Up Health Bridge

#![deny(unsafe_code)]

//! # Health Bridge
//!
//! A uniform async interface over a platform health data store. The bridge
//! translates portable permission names into their native equivalents,
//! normalizes raw platform records into a stable camelCase wire schema, and
//! aggregates metrics into ordered time buckets.
//!
//! ## Features
//!
//! - **Permission catalog**: A closed set of read permissions with native
//!   mappings and per-permission grant reporting
//! - **Record normalization**: Workouts, sleep sessions, and vitals projected
//!   into a stable output schema with categorical codes resolved to labels
//! - **Bucketed aggregation**: Metric totals partitioned into calendar-day
//!   buckets, permission-gated and never synthesized
//! - **Pluggable store**: The platform store and consent UI are trait seams,
//!   with a synthetic in-memory implementation for tests
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use health_bridge::bridge::HealthBridge;
//! use health_bridge::config::BridgeConfig;
//! use health_bridge::synthetic_store::SyntheticStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(SyntheticStore::new());
//!     let bridge = HealthBridge::with_config(
//!         Arc::clone(&store),
//!         store,
//!         BridgeConfig::from_env(),
//!     );
//!     let availability = bridge.is_health_available().await;
//!     println!("available: {}", availability.available);
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by integration tests (tests/) and downstream
// embedders. They must remain `pub`.

/// Aggregation engine: bucket partitioning and grouped metric queries
pub mod aggregate;

/// `HealthBridge` facade exposing the uniform operation set
pub mod bridge;

/// Runtime configuration for bucketing and read limits
pub mod config;

/// Bridge error types and validation classification
pub mod errors;

/// Categorical code to label tables
pub mod labels;

/// Structured logging configuration
pub mod logging;

/// Aggregate metric registry and value extractors
pub mod metrics;

/// Stable output schema value objects
pub mod models;

/// Record normalization from raw platform shapes
pub mod normalizer;

/// Permission catalog and native mappings
pub mod permissions;

/// Wire request and response DTOs
pub mod requests;

/// Platform store and consent UI trait seams
pub mod store;

/// In-memory store implementation for tests and development
pub mod synthetic_store;

pub use bridge::HealthBridge;
pub use config::{BridgeConfig, BucketZone};
pub use errors::{BridgeError, BridgeResult};
pub use permissions::HealthPermission;
pub use store::{ConsentUi, HealthStore, TimeRange};
