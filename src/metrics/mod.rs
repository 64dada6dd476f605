// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Metrics infrastructure for relbase observability.
//!
//! Lightweight in-process monitoring:
//! - **Types**: Metric and unit definitions
//! - **Collector**: Global singleton for recording metrics
//!
//! Index structures record structural events here (splits, directory
//! doublings, rejected duplicate keys), which keeps diagnostics out of
//! the operator return paths.
//!
//! ## Quick Start
//!
//! ```rust
//! use relbase::metrics::{Metric, MetricUnit, MetricsCollector};
//!
//! let metric = Metric::new("bptree.leaf_split", 1.0, MetricUnit::Count)
//!     .with_tag("relation", "student");
//!
//! MetricsCollector::global().record(metric);
//! ```
//!
//! ## Thread Safety
//!
//! - `MetricsCollector` uses `RwLock` for thread-safe access
//! - Multiple threads can record metrics concurrently
//!
//! Unlike a persistent deployment there is no storage backend: the engine
//! is memory-only, so the collector is a bounded in-process buffer.

pub mod collector;
pub mod types;

#[cfg(test)]
mod collector_test;

// Re-export commonly used types for convenience
pub use collector::MetricsCollector;
pub use types::{Metric, MetricUnit};
