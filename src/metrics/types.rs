// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Metric types and units.

use std::fmt;

/// Unit of a recorded metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    /// Plain event count.
    Count,

    /// Duration in microseconds.
    Micros,

    /// Size in bytes.
    Bytes,
}

impl fmt::Display for MetricUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricUnit::Count => write!(f, "count"),
            MetricUnit::Micros => write!(f, "μs"),
            MetricUnit::Bytes => write!(f, "bytes"),
        }
    }
}

/// One recorded observation.
///
/// ## Example
/// ```rust
/// use relbase::metrics::{Metric, MetricUnit};
///
/// let metric = Metric::new("exthash.bucket_split", 1.0, MetricUnit::Count)
///     .with_tag("relation", "enroll");
///
/// assert_eq!(metric.name, "exthash.bucket_split");
/// assert_eq!(metric.tags.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Metric {
    /// Metric name (dotted, lowercase).
    pub name: String,

    /// Observed value.
    pub value: f64,

    /// Unit of the value.
    pub unit: MetricUnit,

    /// Optional key=value tags.
    pub tags: Vec<(String, String)>,
}

impl Metric {
    /// Create a new metric observation.
    pub fn new(name: &str, value: f64, unit: MetricUnit) -> Self {
        Self {
            name: name.to_string(),
            value,
            unit,
            tags: Vec::new(),
        }
    }

    /// Attach a tag (builder style).
    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.push((key.to_string(), value.to_string()));
        self
    }
}
