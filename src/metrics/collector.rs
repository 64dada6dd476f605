// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Global metrics collector.

use crate::metrics::types::Metric;
use once_cell::sync::Lazy;
use std::sync::RwLock;

/// Upper bound on buffered observations; the oldest half is dropped
/// when the bound is reached.
const MAX_BUFFERED: usize = 65_536;

static GLOBAL: Lazy<MetricsCollector> = Lazy::new(MetricsCollector::new);

/// In-memory metrics collector.
///
/// ## Thread Safety
/// - `record` takes a write lock; readers take a read lock
/// - Safe to share across threads (`&'static` via [`MetricsCollector::global`])
///
/// ## Example
/// ```rust
/// use relbase::metrics::{Metric, MetricUnit, MetricsCollector};
///
/// let collector = MetricsCollector::new();
/// collector.record(Metric::new("table.insert_rejected", 1.0, MetricUnit::Count));
/// assert_eq!(collector.count_of("table.insert_rejected"), 1.0);
/// ```
#[derive(Debug)]
pub struct MetricsCollector {
    metrics: RwLock<Vec<Metric>>,
}

impl MetricsCollector {
    /// Create a private collector (used by tests; production code shares
    /// the global instance).
    pub fn new() -> Self {
        Self {
            metrics: RwLock::new(Vec::new()),
        }
    }

    /// Process-wide shared collector.
    pub fn global() -> &'static MetricsCollector {
        &GLOBAL
    }

    /// Record one observation.
    ///
    /// ## Performance
    /// - O(1) amortised: lock + push
    pub fn record(&self, metric: Metric) {
        let mut buf = self.metrics.write().expect("metrics lock poisoned");
        if buf.len() >= MAX_BUFFERED {
            buf.drain(..MAX_BUFFERED / 2);
        }
        buf.push(metric);
    }

    /// Clone out all buffered observations.
    pub fn snapshot(&self) -> Vec<Metric> {
        self.metrics.read().expect("metrics lock poisoned").clone()
    }

    /// Sum of recorded values for one metric name.
    ///
    /// ## Input
    /// - `name`: Metric name to aggregate
    ///
    /// ## Output
    /// - Sum of `value` over matching observations (0.0 when none)
    pub fn count_of(&self, name: &str) -> f64 {
        self.metrics
            .read()
            .expect("metrics lock poisoned")
            .iter()
            .filter(|m| m.name == name)
            .map(|m| m.value)
            .sum()
    }

    /// Number of buffered observations.
    pub fn len(&self) -> usize {
        self.metrics.read().expect("metrics lock poisoned").len()
    }

    /// Check whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all buffered observations.
    pub fn clear(&self) {
        self.metrics.write().expect("metrics lock poisoned").clear();
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
